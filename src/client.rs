//! The connection handle (§3, §4.4), generalising the teacher's
//! `stream::sync::Client<Stream>` wrapper down to this protocol's simpler
//! four-state session machine, grounded in `pkg/registry/client.go`,
//! `connection.go`, `greeting.go`, and `session.go`.

use std::io::{Read, Write};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::greeting::Greeting;
use crate::namespaces::{CONTACT, DOMAIN, DOMAIN_EXT, EPP, HOST, SEC_DNS};
use crate::net::connection::{ApplyDeadlines, Connection};
use crate::net::tls::{self, TlsStream};
use crate::result::{classify, ResultEnvelope, TransactionIds};
use crate::state::State;
use crate::transaction;
use crate::xml::{Element, Writer};

/// Username and password sent in the `<login>` command body. The TLS
/// client certificate is a separate credential, supplied to
/// [`connect`]/[`Client::handshake`] rather than stored here.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The connection lifecycle handle (§3 Connection handle). Generic over
/// any `Read + Write` stream so test code can drive it over a loopback
/// `TcpStream` (see [`crate::testing`]) while production code always uses
/// a [`TlsStream`].
pub struct Client<S> {
    connection: Connection<S>,
    state: State,
    greeting: Option<Greeting>,
    credentials: Credentials,
    logged_in: bool,
}

/// Opens a mutually-authenticated TLS connection to the registry and
/// completes the greeting handshake, matching `NewRegistryClient` +
/// `Connect` combined.
pub fn connect(
    host: &str,
    port: u16,
    cert_pem: &[u8],
    key_pem: &[u8],
    ca_pem: Option<&[u8]>,
    credentials: Credentials,
) -> Result<Client<TlsStream>> {
    let stream = tls::connect(host, port, cert_pem, key_pem, ca_pem)?;
    Client::handshake(stream, credentials)
}

impl<S> Client<S> {
    pub fn state(&self) -> State {
        self.state
    }

    pub fn greeting(&self) -> Option<&Greeting> {
        self.greeting.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn set_read_timeout(&mut self, seconds: i64) -> Result<()> {
        self.connection.set_read_timeout(seconds)
    }

    pub fn set_write_timeout(&mut self, seconds: i64) -> Result<()> {
        self.connection.set_write_timeout(seconds)
    }

    pub fn set_post_write_delay(&mut self, delay: std::time::Duration) {
        self.connection.set_post_write_delay(delay)
    }

    pub(crate) fn mark_broken(&mut self) {
        self.state = State::Broken;
    }
}

impl<S: Read + Write + ApplyDeadlines> Client<S> {
    /// Reads the server's unsolicited greeting off a freshly opened stream
    /// and validates its protocol version, matching the body of `Connect`
    /// after the `tls.Dial` call.
    pub fn handshake(stream: S, credentials: Credentials) -> Result<Self> {
        let mut connection = Connection::new(stream);
        let raw = connection.receive()?;
        debug!("received {} greeting bytes", raw.len());

        let root = crate::xml::parse(&raw)?;
        let greeting = Greeting::from_root(&root, &raw)?;
        greeting.validate_version()?;

        Ok(Client {
            connection,
            state: State::Greeted,
            greeting: Some(greeting),
            credentials,
            logged_in: false,
        })
    }

    /// Sends `<login>` with this registry's fixed object/extension URI set
    /// (§4.4), matching `Login`.
    pub fn login(&mut self) -> Result<()> {
        let cl_trid = transaction::generate();
        let mut w = Writer::new();
        w.start("epp", &[("xmlns", EPP)]);
        w.start("command", &[]);
        w.start("login", &[]);
        w.element("clID", &[], &self.credentials.username);
        w.element("pw", &[], &self.credentials.password);
        w.start("options", &[]);
        w.element("version", &[], crate::namespaces::EPP_VERSION);
        w.element("lang", &[], crate::namespaces::LANGUAGE);
        w.end("options");
        w.start("svcs", &[]);
        w.element("objURI", &[], DOMAIN);
        w.element("objURI", &[], HOST);
        w.element("objURI", &[], CONTACT);
        w.start("svcExtension", &[]);
        w.element("extURI", &[], SEC_DNS);
        w.element("extURI", &[], DOMAIN_EXT);
        w.end("svcExtension");
        w.end("svcs");
        w.end("login");
        w.element("clTRID", &[], &cl_trid);
        w.end("command");
        w.end("epp");

        let response = self.call(&cl_trid, w.into_bytes())?;
        let envelope = response_result(&response)?;
        classify(envelope)?;

        self.state = State::Authenticated;
        self.logged_in = true;
        info!("logged in as {}", self.credentials.username);
        Ok(())
    }

    /// Sends `<logout>`, expecting result `1500` (§4.4), matching `Logout`.
    pub fn logout(&mut self) -> Result<()> {
        let cl_trid = transaction::generate();
        let body = crate::command::build(&[], &cl_trid, |w| {
            w.empty("logout", &[]);
        });

        let response = self.call(&cl_trid, body)?;
        let envelope = response_result(&response)?;
        if envelope.code != 1500 {
            return Err(if envelope.code >= 2500 {
                Error::ServerFatal { code: envelope.code, message: envelope.message }
            } else {
                Error::ServerResult { code: envelope.code, message: envelope.message }
            });
        }

        self.logged_in = false;
        self.state = State::Disconnected;
        info!("logged out");
        Ok(())
    }

    /// Re-fetches the greeting without re-authenticating (§4.4), matching
    /// `Hello`.
    pub fn hello(&mut self) -> Result<&Greeting> {
        let cl_trid = transaction::generate();
        let raw = self
            .connection
            .send(&cl_trid, &crate::command::build_hello())
            .map_err(|e| self.broken(e))?;
        let root = crate::xml::parse(&raw).map_err(|e| self.broken(e))?;
        let greeting = Greeting::from_root(&root, &raw)?;
        greeting.validate_version()?;
        self.greeting = Some(greeting);
        Ok(self.greeting.as_ref().expect("just set"))
    }

    /// Tears down the stream unconditionally (§4.4), matching `Close`. The
    /// handle is consumed; a new one must be created to reconnect.
    pub fn close(mut self) -> Result<()> {
        self.state = State::Disconnected;
        self.logged_in = false;
        drop(self.connection.into_inner());
        Ok(())
    }

    fn broken(&mut self, err: Error) -> Error {
        self.state = State::Broken;
        err
    }

    /// Sends a pre-built command frame and parses the response into its
    /// root `<epp>` element, marking the handle [`State::Broken`] on any
    /// transport or decode failure.
    pub(crate) fn call(&mut self, cl_trid: &str, body: Vec<u8>) -> Result<Element> {
        let raw = self.connection.send(cl_trid, &body).map_err(|e| self.broken(e))?;
        crate::xml::parse(&raw).map_err(|e| self.broken(e))
    }

    /// As [`Self::call`], but refuses to send unless the handle is
    /// [`State::Authenticated`], and leaves result classification to the
    /// caller — used by `Poll`/`PollAck`, whose success codes (`1300`,
    /// `1301`) aren't the generic `1000`/`1500` [`classify`] expects.
    pub(crate) fn call_authenticated_raw(&mut self, cl_trid: &str, body: Vec<u8>) -> Result<Element> {
        if !self.state.is_authenticated() {
            return Err(Error::invalid_input("client is not authenticated"));
        }
        self.call(cl_trid, body)
    }

    /// As [`Self::call_authenticated_raw`], additionally classifying the
    /// result via the generic `1000`/`1500` success codes — every object
    /// operation besides poll goes through this.
    pub(crate) fn call_authenticated(&mut self, cl_trid: &str, body: Vec<u8>) -> Result<Element> {
        let response = self.call_authenticated_raw(cl_trid, body)?;
        let envelope = response_result(&response)?;
        if envelope.code >= 2500 {
            self.state = State::Broken;
        }
        classify(envelope)?;
        Ok(response)
    }
}

/// Extracts `<response><result>` from a parsed root and classifies it,
/// without consuming the `<response>` element — callers that need
/// `<resData>` pull it out themselves afterward.
pub(crate) fn response_result(root: &Element) -> Result<ResultEnvelope> {
    let response = root
        .child("response")
        .ok_or_else(|| Error::decode_xml("missing <response> element", Vec::new()))?;
    let result = response
        .child("result")
        .ok_or_else(|| Error::decode_xml("missing <result> element", Vec::new()))?;
    ResultEnvelope::from_element(result)
}

pub(crate) fn response_element(root: &Element) -> Result<&Element> {
    root.child("response")
        .ok_or_else(|| Error::decode_xml("missing <response> element", Vec::new()))
}

#[allow(dead_code)]
pub(crate) fn transaction_ids(root: &Element) -> TransactionIds {
    TransactionIds::from_element(root.child("response").and_then(|r| r.child("trID")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Duplex {
        inbox: Cursor<Vec<u8>>,
        written: Vec<u8>,
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inbox.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl ApplyDeadlines for Duplex {
        fn apply_read_timeout(&self, _timeout: std::time::Duration) -> std::io::Result<()> {
            Ok(())
        }
        fn apply_write_timeout(&self, _timeout: std::time::Duration) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn greeting_frame() -> Vec<u8> {
        let mut buf = Vec::new();
        crate::net::frame::write_frame(
            &mut buf,
            br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><greeting>
                <svID>EPP server</svID>
                <svDate>2020-06-07T02:05:52.267Z</svDate>
                <svcMenu>
                    <version>1.0</version>
                    <lang>en</lang>
                    <objURI>urn:ietf:params:xml:ns:domain-1.0</objURI>
                </svcMenu>
            </greeting></epp>"#,
        )
        .unwrap();
        buf
    }

    #[test]
    fn handshake_captures_greeting_and_advances_state() {
        let duplex = Duplex {
            inbox: Cursor::new(greeting_frame()),
            written: Vec::new(),
        };
        let client = Client::handshake(
            duplex,
            Credentials {
                username: "test".to_string(),
                password: "test123".to_string(),
            },
        )
        .unwrap();
        assert_eq!(client.state(), State::Greeted);
        assert_eq!(client.greeting().unwrap().server_id, "EPP server");
    }
}
