//! The generic transport + correlator: a stream, its read/write deadlines,
//! and the mandatory write→sleep→read send protocol.
//!
//! Generic over any `Read + Write` stream so production code can hand it a
//! [`crate::net::tls::TlsStream`] while tests hand it a plain `TcpStream`
//! talking to an in-process scripted server (see [`crate::testing`]).

use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use log::{debug, error};

use super::frame::{read_frame, write_frame};
use crate::error::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const POST_WRITE_DELAY: Duration = Duration::from_secs(1);

/// Lets [`Connection`] push its configured deadlines down onto whatever
/// concrete socket it holds, without forcing every stream type (including
/// the in-memory ones used in tests) to be a real OS socket.
///
/// [`std::net::TcpStream`] and [`crate::net::tls::TlsStream`] apply the
/// deadline to the underlying file descriptor; in-memory test doubles
/// implement this as a no-op.
pub trait ApplyDeadlines {
    fn apply_read_timeout(&self, timeout: Duration) -> std::io::Result<()>;
    fn apply_write_timeout(&self, timeout: Duration) -> std::io::Result<()>;
}

impl ApplyDeadlines for std::net::TcpStream {
    fn apply_read_timeout(&self, timeout: Duration) -> std::io::Result<()> {
        self.set_read_timeout(Some(timeout))
    }

    fn apply_write_timeout(&self, timeout: Duration) -> std::io::Result<()> {
        self.set_write_timeout(Some(timeout))
    }
}

/// A framed connection over some byte stream, plus the deadlines and the
/// one-second post-write delay the target server requires.
pub struct Connection<S> {
    stream: S,
    read_timeout: Duration,
    write_timeout: Duration,
    post_write_delay: Duration,
}

impl<S> Connection<S> {
    pub fn new(stream: S) -> Self {
        Connection {
            stream,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
            post_write_delay: POST_WRITE_DELAY,
        }
    }

    /// Overrides the read deadline. Rejects non-positive values, matching
    /// the source's `SetReadTimeout`/`SetWriteTimeout` validation.
    pub fn set_read_timeout(&mut self, seconds: i64) -> Result<()> {
        if seconds <= 0 {
            return Err(Error::invalid_input(
                "read timeout must be a positive integer",
            ));
        }
        self.read_timeout = Duration::from_secs(seconds as u64);
        Ok(())
    }

    pub fn set_write_timeout(&mut self, seconds: i64) -> Result<()> {
        if seconds <= 0 {
            return Err(Error::invalid_input(
                "write timeout must be a positive integer",
            ));
        }
        self.write_timeout = Duration::from_secs(seconds as u64);
        Ok(())
    }

    /// Overrides the delay `send` sleeps between writing a request and
    /// reading its response. Exposed as a tunable per §4.2, but defaults
    /// to one second and should not be disabled against the real registry.
    pub fn set_post_write_delay(&mut self, delay: Duration) {
        self.post_write_delay = delay;
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + ApplyDeadlines> Connection<S> {
    /// Reads one framed message without writing anything first — the
    /// server sends its greeting unsolicited as soon as the stream opens,
    /// matching the source's bare `Read()` call in `Connect`.
    pub fn receive(&mut self) -> Result<Vec<u8>> {
        self.stream.apply_read_timeout(self.read_timeout).map_err(Error::Transport)?;
        read_frame(&mut self.stream).map_err(|e| {
            error!("connection read failed while awaiting greeting: {e}");
            Error::Transport(e)
        })
    }
}

impl<S: Read + Write + ApplyDeadlines> Connection<S> {
    /// Writes a framed `payload`, sleeps [`Self::set_post_write_delay`]'s
    /// duration (one second by default), then reads one framed response.
    ///
    /// The sleep is a protocol quirk of the target server, which rejects
    /// back-to-back commands sent without it; it is preserved here rather
    /// than optimised away. The configured read/write deadlines are applied
    /// to the stream immediately before the corresponding I/O call.
    pub fn send(&mut self, request_id: &str, payload: &[u8]) -> Result<Vec<u8>> {
        self.stream.apply_write_timeout(self.write_timeout).map_err(Error::Transport)?;
        write_frame(&mut self.stream, payload).map_err(|e| {
            error!("connection write failed for request {request_id}: {e}");
            Error::Transport(e)
        })?;
        debug!("wrote {} payload bytes for request {request_id}", payload.len());

        thread::sleep(self.post_write_delay);

        self.stream.apply_read_timeout(self.read_timeout).map_err(Error::Transport)?;
        let response = read_frame(&mut self.stream).map_err(|e| {
            error!("connection read failed for request {request_id}: {e}");
            Error::Transport(e)
        })?;
        debug!(
            "read {} response bytes for request {request_id}",
            response.len()
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// An in-memory duplex good enough to exercise `send` without any real
    /// socket: written bytes go to `written`, read bytes come from `inbox`.
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
        fn apply_read_timeout(&self, _timeout: Duration) -> std::io::Result<()> {
            Ok(())
        }
        fn apply_write_timeout(&self, _timeout: Duration) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn send_writes_then_reads_after_delay() {
        let mut framed_response = Vec::new();
        write_frame(&mut framed_response, b"<epp/>").unwrap();

        let duplex = Duplex {
            inbox: Cursor::new(framed_response),
            written: Vec::new(),
        };

        let mut conn = Connection::new(duplex);
        conn.set_post_write_delay(Duration::from_millis(1));

        let response = conn.send("ABCDE", b"<epp><hello/></epp>").unwrap();
        assert_eq!(response, b"<epp/>");
        assert!(conn.stream.written.windows(5).any(|w| w == b"<epp>"));
    }

    #[test]
    fn rejects_non_positive_timeouts() {
        let duplex = Duplex {
            inbox: Cursor::new(Vec::new()),
            written: Vec::new(),
        };
        let mut conn = Connection::new(duplex);
        assert!(conn.set_read_timeout(0).is_err());
        assert!(conn.set_write_timeout(-1).is_err());
    }
}
