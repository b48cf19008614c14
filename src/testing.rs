//! In-process scripted TCP server for exercising [`crate::client::Client`]
//! without a real mutually-authenticated TLS endpoint (§4a).
//!
//! The generic `Read + Write` bound on `Connection`/`Client` means any
//! stream will do; this harness hands out a plain loopback `TcpStream`
//! instead of a [`crate::net::tls::TlsStream`]. It mirrors the source's own
//! test-server approach: a fixed sequence of fixture frames is scripted up
//! front (greeting, then one response per expected request) and served in
//! order as connections come in, the same shape as that codebase's
//! `SetupNewResponses(expectedRequest, successResponse, failureResponse)`
//! helper driving its `*_test.go` suites.
//!
//! Request bytes aren't inspected against an expectation here: those tests
//! assert on response-code routing through the client, not on the exact
//! bytes a command builder emitted, so a server that ignores the request
//! and just serves the next scripted response in order is the faithful
//! equivalent.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use crate::net::frame::{read_frame, write_frame};

/// A loopback TCP listener scripted to reply with a fixed sequence of
/// frames: the first frame is sent unsolicited as the connection's
/// greeting, and every frame after that is sent in reply to one inbound
/// request, in order.
pub struct ScriptedServer {
    addr: SocketAddr,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl ScriptedServer {
    /// Binds an ephemeral loopback port and spawns the serving thread.
    /// `responses[0]` is written as soon as the client connects; each
    /// later entry is written after reading exactly one request frame.
    pub fn start(responses: Vec<Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener has a local address");

        let handle = thread::spawn(move || -> std::io::Result<()> {
            let (mut stream, _) = listener.accept()?;
            let mut responses = responses.into_iter();

            if let Some(greeting) = responses.next() {
                write_frame(&mut stream, &greeting)?;
            }
            for response in responses {
                read_frame(&mut stream)?;
                write_frame(&mut stream, &response)?;
            }
            Ok(())
        });

        ScriptedServer {
            addr,
            handle: Some(handle),
        }
    }

    /// Opens a fresh connection to the scripted listener.
    pub fn connect(&self) -> TcpStream {
        TcpStream::connect(self.addr).expect("connect to scripted server")
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the serving thread to finish its script and surfaces any
    /// I/O error it hit (e.g. a test that scripted fewer responses than
    /// the client actually sent requests).
    pub fn join(mut self) -> std::io::Result<()> {
        self.handle.take().expect("join called once").join().expect("server thread panicked")
    }
}

/// Wraps a raw XML body (without the declaration or length prefix — those
/// are `write_frame`'s job) into a scripted response frame.
pub fn frame(body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_frame(&mut buf, body).expect("writing to a Vec<u8> cannot fail");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;

    #[test]
    fn serves_scripted_frames_in_order() {
        let server = ScriptedServer::start(vec![
            b"<epp><greeting/></epp>".to_vec(),
            b"<epp><response/></epp>".to_vec(),
        ]);

        let mut stream = server.connect();
        let greeting = read_frame(&mut stream).unwrap();
        assert!(greeting.ends_with(b"<epp><greeting/></epp>"));

        write_frame(&mut stream, b"<epp><command/></epp>").unwrap();
        let response = read_frame(&mut stream).unwrap();
        assert!(response.ends_with(b"<epp><response/></epp>"));

        drop(stream);
        server.join().unwrap();
    }

    #[test]
    fn frame_helper_round_trips() {
        let mut buf = frame(b"<epp/>");
        let decoded = read_frame(&mut std::io::Cursor::new(&mut buf)).unwrap();
        assert!(decoded.ends_with(b"<epp/>"));
    }
}
