//! Length-prefixed message framing.
//!
//! A frame is a 32-bit big-endian length, counting itself, followed by the
//! payload. Unlike IMAP's line/literal framing this has no continuation
//! protocol: the whole payload length is known up front, so there is no
//! equivalent of a `FramingState` state machine here, just a read of the
//! prefix followed by a bounded read of the body.

use std::io::{self, Read, Write};

const PREFIX_LEN: usize = 4;

/// Prepends the XML declaration, frames `payload` with its 4-byte big-endian
/// length prefix (including the prefix itself), and writes it to `stream`.
pub fn write_frame<S: Write>(stream: &mut S, payload: &[u8]) -> io::Result<()> {
    const DECLARATION: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>"#;

    let total_len = PREFIX_LEN + DECLARATION.len() + payload.len();
    let len_bytes = u32::try_from(total_len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "payload too large to frame"))?
        .to_be_bytes();

    stream.write_all(&len_bytes)?;
    stream.write_all(DECLARATION)?;
    stream.write_all(payload)?;
    Ok(())
}

/// Reads one length-prefixed frame from `stream` and returns its payload
/// (including the leading XML declaration, exactly as received).
///
/// A length of 0 or a length smaller than the 4-byte prefix itself is
/// refused with `UnexpectedEof`, matching the source's refusal of negative
/// lengths (which cannot occur here since the prefix is unsigned).
pub fn read_frame<S: Read>(stream: &mut S) -> io::Result<Vec<u8>> {
    let mut len_bytes = [0u8; PREFIX_LEN];
    stream.read_exact(&mut len_bytes)?;
    let total_len = u32::from_be_bytes(len_bytes) as usize;

    if total_len < PREFIX_LEN {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "frame length shorter than the length prefix itself",
        ));
    }

    let payload_len = total_len - PREFIX_LEN;
    let mut payload = vec![0u8; payload_len];
    stream.read_exact(&mut payload)?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trip() {
        let payload = br#"<epp xmlns="urn:ietf:params:xml:ns:epp-1.0"><hello/></epp>"#;
        let mut buf = Vec::new();
        write_frame(&mut buf, payload).unwrap();

        // first 4 bytes equal 4 + len(payload-with-declaration)
        let declared_len = u32::from_be_bytes(buf[0..4].try_into().unwrap()) as usize;
        assert_eq!(declared_len, buf.len());

        let mut cursor = Cursor::new(buf);
        let decoded = read_frame(&mut cursor).unwrap();
        assert!(decoded.starts_with(b"<?xml"));
        assert!(decoded.ends_with(b"</epp>"));
    }

    #[test]
    fn zero_length_frame_is_rejected() {
        let mut cursor = Cursor::new(vec![0u8, 0, 0, 0]);
        let err = read_frame(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
