//! Server greeting (§3, §4.4), grounded in `pkg/epp/greeting.go` and
//! `pkg/registry/greeting.go`'s `unmarshalGreeting`.

use crate::error::{Error, Result};
use crate::namespaces::EPP_VERSION;
use crate::xml::datetime::Timestamp;
use crate::xml::Element;

/// Captured once per connection by [`crate::client::Client::connect`] and
/// re-fetchable without re-authenticating via
/// [`crate::client::Client::hello`].
#[derive(Debug, Clone)]
pub struct Greeting {
    pub server_id: String,
    pub server_date: Timestamp,
    pub version: String,
    pub language: String,
    pub object_uris: Vec<String>,
    pub extension_uris: Vec<String>,
}

impl Greeting {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let root = crate::xml::parse(bytes)?;
        Self::from_root(&root, bytes)
    }

    /// As [`Self::from_bytes`], but starting from an already-parsed tree —
    /// used by [`crate::client::Client::handshake`] and
    /// [`crate::client::Client::hello`], which have already parsed the
    /// frame's `<epp>` root to inspect its shape.
    pub(crate) fn from_root(root: &Element, bytes: &[u8]) -> Result<Self> {
        let greeting = root
            .child("greeting")
            .ok_or_else(|| Error::decode_xml("missing <greeting> element", bytes.to_vec()))?;

        let svc_menu = greeting
            .child("svcMenu")
            .ok_or_else(|| Error::decode_xml("missing <svcMenu> element", bytes.to_vec()))?;

        let object_uris = svc_menu
            .children("objURI")
            .map(|e| e.text().to_string())
            .collect();

        let extension_uris = svc_menu
            .child("svcExtension")
            .map(|ext| ext.children("extURI").map(|e| e.text().to_string()).collect())
            .unwrap_or_default();

        Ok(Greeting {
            server_id: greeting.child_text("svID").to_string(),
            server_date: Timestamp::parse(greeting.child_text("svDate"))?,
            version: svc_menu.child_text("version").to_string(),
            language: svc_menu.child_text("lang").to_string(),
            object_uris,
            extension_uris,
        })
    }

    /// Validates the advertised protocol version against the one constant
    /// this client speaks (§4.4).
    pub fn validate_version(&self) -> Result<()> {
        if self.version != EPP_VERSION {
            return Err(Error::ProtocolVersion {
                got: self.version.clone(),
                want: EPP_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<epp xmlns="urn:ietf:params:xml:ns:epp-1.0">
  <greeting>
    <svID>EPP server</svID>
    <svDate>2020-06-07T02:05:52.267Z</svDate>
    <svcMenu>
      <version>1.0</version>
      <lang>en</lang>
      <objURI>urn:ietf:params:xml:ns:domain-1.0</objURI>
      <objURI>urn:ietf:params:xml:ns:host-1.0</objURI>
      <objURI>urn:ietf:params:xml:ns:contact-1.0</objURI>
      <svcExtension>
        <extURI>urn:ietf:params:xml:ns:secDNS-1.1</extURI>
        <extURI>urn:ietf:params:xml:ns:domain-ext-1.0</extURI>
      </svcExtension>
    </svcMenu>
  </greeting>
</epp>"#;

    #[test]
    fn parses_greeting_and_validates_version() {
        let greeting = Greeting::from_bytes(GREETING).unwrap();
        assert_eq!(greeting.server_id, "EPP server");
        assert_eq!(greeting.object_uris.len(), 3);
        assert_eq!(greeting.extension_uris.len(), 2);
        greeting.validate_version().unwrap();
    }

    #[test]
    fn rejects_unexpected_version() {
        let doc = String::from_utf8_lossy(GREETING).replace("<version>1.0</version>", "<version>2.0</version>");
        let greeting = Greeting::from_bytes(doc.as_bytes()).unwrap();
        assert!(matches!(
            greeting.validate_version(),
            Err(Error::ProtocolVersion { .. })
        ));
    }
}
