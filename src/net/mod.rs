//! Transport layer: TLS stream setup, length-prefixed framing, and the
//! write-then-read correlator built on top of both.

pub mod connection;
pub mod frame;
pub mod tls;
