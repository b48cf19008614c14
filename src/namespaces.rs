//! XML namespace constants (§4.3), grounded in `pkg/epp/namespaces.go`.

pub const EPP: &str = "urn:ietf:params:xml:ns:epp-1.0";
pub const CONTACT: &str = "urn:ietf:params:xml:ns:contact-1.0";
pub const DOMAIN: &str = "urn:ietf:params:xml:ns:domain-1.0";
pub const HOST: &str = "urn:ietf:params:xml:ns:host-1.0";
pub const SEC_DNS: &str = "urn:ietf:params:xml:ns:secDNS-1.1";
pub const DOMAIN_EXT: &str = "urn:ietf:params:xml:ns:domain-ext-1.0";
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const EPP_VERSION: &str = "1.0";
pub const LANGUAGE: &str = "en";
