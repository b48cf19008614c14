//! Typed request/response records for the object operation families
//! (§3, §4.5-§4.6).

pub mod contact;
pub mod domain;
pub mod host;
pub mod poll;

/// One line of a `Check*` response: the identifier that was checked,
/// whether it's available, and the server's reason when it isn't.
///
/// The upstream source parses all three `check` operations (domain,
/// contact, host) into one `ItemCheck` struct carrying both a `ContactId`
/// and a `Name` sub-field so either object kind's XML shape unmarshals
/// into the same type; which one actually got populated is implicit in
/// which method the caller invoked. Since `CheckDomains`/`CheckContacts`/
/// `CheckHosts` are separate operations against separate namespaces and
/// the server never mixes object kinds in one response, there is nothing
/// for a tagged variant to disambiguate at runtime — a single flat
/// `CheckResult` with one `identifier` field is the equivalent Rust
/// shape, not a generalisation away from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub identifier: String,
    pub available: bool,
    pub reason: Option<String>,
}

impl CheckResult {
    pub(crate) fn from_element(cd: &crate::xml::Element, name_tag: &str) -> Self {
        let name_el = cd.child(name_tag);
        let available = name_el.and_then(|e| e.attr("avail")).map(|v| v == "1").unwrap_or(false);
        let identifier = name_el.map(crate::xml::Element::text).unwrap_or("").to_string();
        let reason = cd.child("reason").map(|e| e.text().to_string());
        CheckResult {
            identifier,
            available,
            reason,
        }
    }
}
