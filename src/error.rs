use thiserror::Error;

/// Everything that can go wrong between a caller's method call and a typed
/// response coming back.
///
/// Variants line up with the taxonomy a complete reimplementation of this
/// client needs: validators fail before any network I/O, transport/TLS
/// failures leave the handle broken, and server-reported result codes keep
/// their numeric code and message so a caller can branch on them without
/// re-parsing a string.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("TLS handshake failed: {0}")]
    TlsHandshake(#[from] rustls::Error),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("malformed XML response: {message} ({bytes} raw bytes retained)")]
    DecodeXml { message: String, bytes: Vec<u8> },

    #[error("unrecognised date format: {0:?}")]
    DecodeDate(String),

    #[error("server advertised protocol version {got:?}, expected {want:?}")]
    ProtocolVersion { got: String, want: &'static str },

    #[error("server result {code}: {message}")]
    ServerResult { code: u16, message: String },

    #[error("fatal server result {code}: {message}")]
    ServerFatal { code: u16, message: String },

    #[error("poll queue is empty")]
    PollEmpty,

    #[error("acked message id {expected:?} but server echoed {got:?}")]
    AckMismatch { expected: String, got: String },
}

impl Error {
    pub fn decode_xml(message: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Error::DecodeXml {
            message: message.into(),
            bytes: bytes.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// True once the handle that produced this error must be closed and
    /// cannot continue to be used for further operations.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::TlsHandshake(_) | Error::ServerFatal { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
