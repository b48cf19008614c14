//! Mutual-TLS stream construction.
//!
//! The registry requires a client certificate; this module turns caller-
//! supplied PEM bytes into a `rustls::StreamOwned` wrapping a plain
//! `TcpStream`, which then satisfies the same `Read + Write` bound the
//! frame codec and connection (`net::connection`) are generic over.

use std::io::BufReader;
use std::net::TcpStream;
use std::sync::Arc;

use rustls::{Certificate, ClientConfig, ClientConnection, PrivateKey, RootCertStore, StreamOwned};

use crate::error::{Error, Result};
use crate::net::connection::ApplyDeadlines;

pub type TlsStream = StreamOwned<ClientConnection, TcpStream>;

impl ApplyDeadlines for TlsStream {
    fn apply_read_timeout(&self, timeout: std::time::Duration) -> std::io::Result<()> {
        self.sock.set_read_timeout(Some(timeout))
    }

    fn apply_write_timeout(&self, timeout: std::time::Duration) -> std::io::Result<()> {
        self.sock.set_write_timeout(Some(timeout))
    }
}

/// Builds a mutually-authenticated TLS stream to `host:port`.
///
/// `cert_pem`/`key_pem` are the client's own certificate and private key;
/// `ca_pem`, when given, replaces the system trust store with exactly the
/// CAs the caller installed, matching `SetCACertificates` in the public API
/// surface.
pub fn connect(
    host: &str,
    port: u16,
    cert_pem: &[u8],
    key_pem: &[u8],
    ca_pem: Option<&[u8]>,
) -> Result<TlsStream> {
    let certs = parse_certs(cert_pem)?;
    let key = parse_key(key_pem)?;

    let mut roots = RootCertStore::empty();
    match ca_pem {
        Some(pem) => {
            for cert in parse_certs(pem)? {
                roots
                    .add(&cert)
                    .map_err(|e| Error::TlsHandshake(rustls::Error::General(e.to_string())))?;
            }
        }
        None => {
            roots.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
                rustls::OwnedTrustAnchor::from_subject_spki_name_constraints(
                    ta.subject,
                    ta.spki,
                    ta.name_constraints,
                )
            }));
        }
    }

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_client_auth_cert(certs, key)
        .map_err(Error::TlsHandshake)?;

    let server_name = rustls::ServerName::try_from(host)
        .map_err(|_| Error::invalid_input(format!("invalid server hostname: {host}")))?;

    let conn = ClientConnection::new(Arc::new(config), server_name).map_err(Error::TlsHandshake)?;

    let tcp = TcpStream::connect((host, port)).map_err(Error::Transport)?;

    Ok(StreamOwned::new(conn, tcp))
}

fn parse_certs(pem: &[u8]) -> Result<Vec<Certificate>> {
    let mut reader = BufReader::new(pem);
    let raw = rustls_pemfile::certs(&mut reader)
        .map_err(|e| Error::TlsHandshake(rustls::Error::General(e.to_string())))?;
    Ok(raw.into_iter().map(Certificate).collect())
}

fn parse_key(pem: &[u8]) -> Result<PrivateKey> {
    let mut reader = BufReader::new(pem);
    let mut keys = rustls_pemfile::pkcs8_private_keys(&mut reader)
        .map_err(|e| Error::TlsHandshake(rustls::Error::General(e.to_string())))?;

    if keys.is_empty() {
        let mut reader = BufReader::new(pem);
        keys = rustls_pemfile::rsa_private_keys(&mut reader)
            .map_err(|e| Error::TlsHandshake(rustls::Error::General(e.to_string())))?;
    }

    keys.into_iter()
        .next()
        .map(PrivateKey)
        .ok_or_else(|| Error::invalid_input("no private key found in PEM input"))
}
