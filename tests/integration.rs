//! End-to-end scenarios driven against the in-process scripted server
//! (§8), exercising the public API the way a real caller would: connect,
//! authenticate, issue an object operation, inspect the typed result.

use std::time::Duration;

use epp_fi::client::Client;
use epp_fi::error::Error;
use epp_fi::model::domain;
use epp_fi::testing::{frame, ScriptedServer};
use epp_fi::Credentials;

const GREETING: &[u8] = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><greeting>
    <svID>EPP server</svID>
    <svDate>2020-06-07T02:05:52.267Z</svDate>
    <svcMenu>
        <version>1.0</version>
        <lang>en</lang>
        <objURI>urn:ietf:params:xml:ns:domain-1.0</objURI>
        <objURI>urn:ietf:params:xml:ns:host-1.0</objURI>
        <objURI>urn:ietf:params:xml:ns:contact-1.0</objURI>
    </svcMenu>
</greeting></epp>"#;

fn result_only(code: u16, msg: &str) -> Vec<u8> {
    format!(
        r#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response><result code="{code}"><msg>{msg}</msg></result></response></epp>"#
    )
    .into_bytes()
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn handshake(server: &ScriptedServer) -> Client<std::net::TcpStream> {
    let mut client = Client::handshake(server.connect(), credentials("test", "test123")).unwrap();
    client.set_post_write_delay(Duration::from_millis(1));
    client
}

#[test]
fn connect_then_hello_then_close() {
    let server = ScriptedServer::start(vec![frame(GREETING), frame(GREETING)]);
    let mut client = handshake(&server);

    assert_eq!(client.greeting().unwrap().server_id, "EPP server");

    let hello_greeting = client.hello().unwrap();
    assert_eq!(hello_greeting.version, "1.0");

    client.close().unwrap();
    server.join().unwrap();
}

#[test]
fn login_success_marks_authenticated() {
    let server = ScriptedServer::start(vec![frame(GREETING), frame(&result_only(1000, "Command completed successfully"))]);
    let mut client = handshake(&server);

    client.login().unwrap();

    assert!(client.is_logged_in());
    assert_eq!(client.state(), epp_fi::State::Authenticated);
    server.join().unwrap();
}

#[test]
fn login_failure_leaves_handle_unauthenticated() {
    let server = ScriptedServer::start(vec![frame(GREETING), frame(&result_only(2200, "Authentication error"))]);
    let mut client = handshake(&server);

    let err = client.login().unwrap_err();

    assert!(matches!(err, Error::ServerResult { code: 2200, .. }));
    assert!(!client.is_logged_in());
    server.join().unwrap();
}

#[test]
fn domain_check_batch_reports_availability_and_reason() {
    let check_response = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response>
        <result code="1000"><msg>Command completed successfully</msg></result>
        <resData>
            <chkData xmlns="urn:ietf:params:xml:ns:domain-1.0">
                <cd><name avail="1">testdomain1.fi</name></cd>
                <cd><name avail="0">testdomain2.fi</name><reason>In use</reason></cd>
                <cd><name avail="1">testdomain3.fi</name></cd>
            </chkData>
        </resData>
    </response></epp>"#;

    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(check_response),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    let names = vec!["testdomain1.fi".to_string(), "testdomain2.fi".to_string(), "testdomain3.fi".to_string()];
    let results = client.check_domains(&names).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().map(|r| r.available).collect::<Vec<_>>(), vec![true, false, true]);
    assert_eq!(results[1].reason.as_deref(), Some("In use"));
    server.join().unwrap();
}

#[test]
fn domain_create_parses_expiry_and_rejects_bad_name_before_any_io() {
    let create_response = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response>
        <result code="1000"><msg>Command completed successfully</msg></result>
        <resData>
            <creData xmlns="urn:ietf:params:xml:ns:domain-1.0">
                <name>testdomain3.fi</name>
                <crDate>2020-08-01T16:27:27.743</crDate>
                <exDate>2022-08-01T16:27:27.743</exDate>
            </creData>
        </resData>
    </response></epp>"#;

    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(create_response),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    let nameservers = vec!["ns1.testhosting.fi".to_string(), "ns2.testhosting.fi".to_string()];
    let details = domain::new_domain_details("testdomain3.fi", 2, "TST1234", &nameservers);
    let created = client.create_domain(&details).unwrap();
    assert_eq!(created.expires.raw, "2022-08-01T16:27:27.743");

    let bad = domain::new_domain_details("testdomain3.co.uk", 2, "TST1234", &nameservers);
    assert!(matches!(client.create_domain(&bad), Err(Error::InvalidInput(_))));

    server.join().unwrap();
}

#[test]
fn poll_empty_then_dequeue_then_ack() {
    let empty = result_only(1300, "Command completed successfully; ack to dequeue");
    let populated = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response>
        <result code="1301"><msg>Command completed successfully; ack to dequeue</msg></result>
        <msgQ count="1" id="cabd78dd-a0b0-4fe1-b4d0-abd300229250">
            <qDate>2020-06-07T02:05:52</qDate>
            <msg>Contact created</msg>
        </msgQ>
        <resData>
            <obj:trnData><obj:name>C574767</obj:name></obj:trnData>
        </resData>
    </response></epp>"#;
    let ack = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response>
        <result code="1000"><msg>Command completed successfully</msg></result>
        <msgQ id="cabd78dd-a0b0-4fe1-b4d0-abd300229250" count="0"/>
    </response></epp>"#;

    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(&empty),
        frame(populated),
        frame(ack),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    assert!(matches!(client.poll(), Err(Error::PollEmpty)));

    let message = client.poll().unwrap();
    assert_eq!(message.id, "cabd78dd-a0b0-4fe1-b4d0-abd300229250");
    assert_eq!(message.object_name.as_deref(), Some("C574767"));

    let remaining = client.poll_ack(&message.id).unwrap();
    assert_eq!(remaining, 0);

    server.join().unwrap();
}

#[test]
fn transfer_key_validator_accepts_iff_all_four_classes_present() {
    assert!(epp_fi::validate::transfer_key("invalidKey123").is_err());
    assert!(epp_fi::validate::transfer_key("fgs+562Fds").is_ok());
}

#[test]
fn domain_update_round_trips_nameserver_and_contact_changes() {
    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(&result_only(1000, "Command completed successfully")),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    let update = domain::update_nameservers(
        "testdomain1.fi",
        &["ns1.old.fi".to_string()],
        &["ns1.new.fi".to_string()],
    );
    client.update_domain(&update).unwrap();

    server.join().unwrap();
}

#[test]
fn domain_renew_matching_date_succeeds_mismatch_surfaces_server_result() {
    let renewed = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response>
        <result code="1000"><msg>Command completed successfully</msg></result>
        <resData>
            <renData xmlns="urn:ietf:params:xml:ns:domain-1.0">
                <name>testdomain1.fi</name>
                <exDate>2023-08-01T16:27:27.743</exDate>
            </renData>
        </resData>
    </response></epp>"#;

    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(renewed),
        frame(&result_only(2306, "Object status prohibits operation")),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    let ok = client.renew_domain("testdomain1.fi", "2022-08-01T16:27:27.743", 1).unwrap();
    assert_eq!(ok.expires.raw, "2023-08-01T16:27:27.743");

    let mismatch = client.renew_domain("testdomain1.fi", "1999-01-01T00:00:00.000", 1).unwrap_err();
    assert!(matches!(mismatch, Error::ServerResult { code: 2306, .. }));

    server.join().unwrap();
}

#[test]
fn domain_transfer_request_returns_parsed_status() {
    let transfer = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><response>
        <result code="1000"><msg>Command completed successfully</msg></result>
        <resData>
            <trnData xmlns="urn:ietf:params:xml:ns:domain-1.0">
                <name>testdomain1.fi</name>
                <trStatus>pending</trStatus>
                <reID>ClientX</reID>
                <reDate>2020-06-07T02:05:52</reDate>
                <acID>ClientY</acID>
            </trnData>
        </resData>
    </response></epp>"#;

    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(transfer),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    let result = client.transfer_domain("testdomain1.fi", "fgs+562Fds", &[]).unwrap();
    assert_eq!(result.status, "pending");
    assert_eq!(result.acted_by, "ClientY");

    server.join().unwrap();
}

#[test]
fn domain_and_contact_delete_succeed_or_surface_server_result() {
    let server = ScriptedServer::start(vec![
        frame(GREETING),
        frame(&result_only(1000, "Command completed successfully")),
        frame(&result_only(1000, "Command completed successfully")),
        frame(&result_only(2303, "Object does not exist")),
    ]);
    let mut client = handshake(&server);
    client.login().unwrap();

    client.delete_domain("testdomain1.fi").unwrap();

    let err = client.delete_contact("C574767").unwrap_err();
    assert!(matches!(err, Error::ServerResult { code: 2303, .. }));

    server.join().unwrap();
}
