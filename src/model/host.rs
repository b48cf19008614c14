//! Host object model (§3, §4.5), grounded in `pkg/epp/host.go` and
//! `pkg/registry/host.go`.

use std::net::IpAddr;

use crate::error::{Error, Result};
use crate::namespaces::HOST;
use crate::xml::datetime::Timestamp;
use crate::xml::{Element, Writer};

/// Which address family a [`HostAddress`] belongs to, tagged by parsing
/// rather than caller assertion (§4.7 IP address validator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    fn as_wire(self) -> &'static str {
        match self {
            AddressFamily::V4 => "v4",
            AddressFamily::V6 => "v6",
        }
    }
}

/// A host's IP address, tagged v4/v6 by what it parses as. Constructed via
/// [`HostAddress::parse`], which is the Rust shape of the source's
/// `FormatHostIP` free function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddress {
    pub address: String,
    pub family: AddressFamily,
}

impl HostAddress {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => Ok(HostAddress {
                address: raw.to_string(),
                family: AddressFamily::V4,
            }),
            Ok(IpAddr::V6(_)) => Ok(HostAddress {
                address: raw.to_string(),
                family: AddressFamily::V6,
            }),
            Err(_) => Err(Error::invalid_input(format!(
                "unrecognised IP address format: {raw}"
            ))),
        }
    }

    fn write(&self, w: &mut Writer, tag: &str) {
        w.element(tag, &[("ip", self.family.as_wire())], &self.address);
    }

    fn from_element(el: &Element) -> Self {
        let family = match el.attr("ip") {
            Some("v6") => AddressFamily::V6,
            _ => AddressFamily::V4,
        };
        HostAddress {
            address: el.text().to_string(),
            family,
        }
    }
}

fn parse_all(raw: &[String]) -> Result<Vec<HostAddress>> {
    raw.iter().map(|ip| HostAddress::parse(ip)).collect()
}

/// Parsed `<infData>` for `GetHost` (§4.5).
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub hostname: String,
    pub addresses: Vec<HostAddress>,
    pub client_id: String,
    pub creator_id: String,
    pub created: Timestamp,
    pub updated: Option<Timestamp>,
}

impl HostInfo {
    pub(crate) fn from_element(info: &Element) -> Result<Self> {
        let updated = match info.child_text("upDate") {
            "" => None,
            raw => Some(Timestamp::parse(raw)?),
        };
        Ok(HostInfo {
            hostname: info.child_text("name").to_string(),
            addresses: info.children("addr").map(HostAddress::from_element).collect(),
            client_id: info.child_text("clID").to_string(),
            creator_id: info.child_text("crID").to_string(),
            created: Timestamp::parse(info.child_text("crDate"))?,
            updated,
        })
    }
}

/// `CreateHost`'s success result: the hostname plus its creation time.
#[derive(Debug, Clone)]
pub struct HostCreated {
    pub hostname: String,
    pub created: Timestamp,
}

pub(crate) fn build_check(names: &[String], cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("check", &[]);
        w.start("host:check", &[("xmlns:host", HOST)]);
        for name in names {
            w.element("host:name", &[], name);
        }
        w.end("host:check");
        w.end("check");
    })
}

pub(crate) fn build_info(hostname: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("info", &[]);
        w.start("host:info", &[("xmlns:host", HOST)]);
        w.element("host:name", &[], hostname);
        w.end("host:info");
        w.end("info");
    })
}

pub(crate) fn build_create(hostname: &str, addresses: &[HostAddress], cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("create", &[]);
        w.start("host:create", &[("xmlns:host", HOST)]);
        w.element("host:name", &[], hostname);
        for addr in addresses {
            addr.write(w, "host:addr");
        }
        w.end("host:create");
        w.end("create");
    })
}

pub(crate) fn build_update(
    hostname: &str,
    add: &[HostAddress],
    remove: &[HostAddress],
    cl_trid: &str,
) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("update", &[]);
        w.start("host:update", &[("xmlns:host", HOST)]);
        w.element("host:name", &[], hostname);
        w.start("host:add", &[]);
        for addr in add {
            addr.write(w, "host:addr");
        }
        w.end("host:add");
        w.start("host:rem", &[]);
        for addr in remove {
            addr.write(w, "host:addr");
        }
        w.end("host:rem");
        w.end("host:update");
        w.end("update");
    })
}

pub(crate) fn build_delete(hostname: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("delete", &[]);
        w.start("host:delete", &[("xmlns:host", HOST)]);
        w.element("host:name", &[], hostname);
        w.end("host:delete");
        w.end("delete");
    })
}

/// Validates and tags every raw address string, short-circuiting on the
/// first unparsable entry (§4.7 IP address validator).
pub fn format_addresses(raw: &[String]) -> Result<Vec<HostAddress>> {
    parse_all(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_v4_and_v6() {
        let v4 = HostAddress::parse("192.0.2.1").unwrap();
        assert_eq!(v4.family, AddressFamily::V4);
        let v6 = HostAddress::parse("2001:db8::1").unwrap();
        assert_eq!(v6.family, AddressFamily::V6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(HostAddress::parse("not-an-ip").is_err());
    }

    #[test]
    fn parses_host_info() {
        let doc = br#"<infData>
            <name>ns1.example.fi</name>
            <addr ip="v4">192.0.2.1</addr>
            <addr ip="v6">2001:db8::1</addr>
            <clID>ClientX</clID>
            <crID>ClientY</crID>
            <crDate>2020-06-07T02:05:52.267</crDate>
        </infData>"#;
        let el = crate::xml::parse(doc).unwrap();
        let info = HostInfo::from_element(&el).unwrap();
        assert_eq!(info.addresses.len(), 2);
        assert!(info.updated.is_none());
    }
}
