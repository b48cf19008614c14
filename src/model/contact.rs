//! Contact object model (§3, §4.5, §4.7), grounded in `pkg/epp/contact.go`
//! and `pkg/registry/contact.go`.

use crate::namespaces::CONTACT;
use crate::xml::datetime::Timestamp;
use crate::xml::{Element, Writer};

/// A contact's postal address. 1-3 street lines, per §4.7.
#[derive(Debug, Clone, Default)]
pub struct Address {
    pub street: Vec<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2.
    pub country: String,
}

/// The on-wire attribute/elements are all numeric `0`/`1`, never a string
/// variant — §9 resolves the upstream source's inconsistency (it has both
/// an `int` and a `string` copy of this across files) in favour of the
/// numeric shape throughout.
#[derive(Debug, Clone, Copy)]
pub struct Disclosure {
    pub flag: i32,
    pub email: i32,
    pub address: i32,
}

/// Type 0 is a private person; 1-7 are organisation variants (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    PrivatePerson,
    Organisation(u8),
}

impl ContactKind {
    pub(crate) fn wire_type(self) -> i32 {
        match self {
            ContactKind::PrivatePerson => 0,
            ContactKind::Organisation(n) => n as i32,
        }
    }
}

/// A postal-info block, fixed form `"loc"` (§3). The private-person and
/// organisation fields are mutually exclusive on the wire, but both live
/// here as `Option`s rather than as a Rust enum so the struct tracks the
/// upstream `ContactPostalInfo` shape 1:1 for the codec; [`validate`]
/// enforces which combination is actually legal for a given [`ContactKind`].
#[derive(Debug, Clone, Default)]
pub struct PostalInfo {
    pub is_finnish: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub org: Option<String>,
    pub birth_date: Option<String>,
    pub identity: Option<String>,
    pub register_number: Option<String>,
    pub address: Address,
}

/// A command-body contact record (§3, §4.5), as built by
/// [`private_person`]/[`organisation`] or assembled directly for an update.
#[derive(Debug, Clone)]
pub struct ContactInfo {
    pub role: i32,
    pub kind: ContactKind,
    pub postal_info: PostalInfo,
    pub phone: String,
    pub email: String,
    pub legal_email: String,
    pub disclose: Disclosure,
}

/// Builds a private-person (`type = 0`) contact with disclosure of both
/// email and address switched off, matching `NewPrivatePersonContact`.
#[allow(clippy::too_many_arguments)]
pub fn private_person(
    role: i32,
    finnish: bool,
    first_name: &str,
    last_name: &str,
    id_number: &str,
    birth_date: &str,
    city: &str,
    country_code: &str,
    street: &[String],
    postal_code: &str,
    email: &str,
    phone: &str,
) -> ContactInfo {
    ContactInfo {
        role,
        kind: ContactKind::PrivatePerson,
        postal_info: PostalInfo {
            is_finnish: finnish,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            identity: if finnish { Some(id_number.to_string()) } else { None },
            birth_date: if finnish { None } else { Some(birth_date.to_string()) },
            address: Address {
                street: street.to_vec(),
                city: city.to_string(),
                postal_code: postal_code.to_string(),
                country: country_code.to_string(),
                state: None,
            },
            ..Default::default()
        },
        phone: phone.to_string(),
        email: email.to_string(),
        legal_email: email.to_string(),
        disclose: Disclosure {
            flag: 0,
            email: 0,
            address: 0,
        },
    }
}

/// Builds an organisation contact (`type = 1`) with address disclosure
/// forced on, matching `NewBusinessContact` — and the invariant that
/// organisation contacts may not disable address disclosure (§3, §4.7).
#[allow(clippy::too_many_arguments)]
pub fn organisation(
    role: i32,
    finnish: bool,
    org_name: &str,
    register_number: &str,
    contact_name: &str,
    city: &str,
    country_code: &str,
    street: &[String],
    postal_code: &str,
    email: &str,
    phone: &str,
) -> ContactInfo {
    ContactInfo {
        role,
        kind: ContactKind::Organisation(1),
        postal_info: PostalInfo {
            is_finnish: finnish,
            name: Some(contact_name.to_string()),
            org: Some(org_name.to_string()),
            register_number: Some(register_number.to_string()),
            address: Address {
                street: street.to_vec(),
                city: city.to_string(),
                postal_code: postal_code.to_string(),
                country: country_code.to_string(),
                state: None,
            },
            ..Default::default()
        },
        phone: phone.to_string(),
        email: email.to_string(),
        legal_email: email.to_string(),
        disclose: Disclosure {
            flag: 0,
            email: 0,
            address: 1,
        },
    }
}

impl ContactInfo {
    fn write_postal_info(&self, w: &mut Writer) {
        w.start("contact:postalInfo", &[("type", "loc")]);
        w.element(
            "contact:isfinnish",
            &[],
            if self.postal_info.is_finnish { "1" } else { "0" },
        );
        if let Some(v) = &self.postal_info.first_name {
            w.element("contact:firstname", &[], v);
        }
        if let Some(v) = &self.postal_info.last_name {
            w.element("contact:lastname", &[], v);
        }
        if let Some(v) = &self.postal_info.name {
            w.element("contact:name", &[], v);
        }
        if let Some(v) = &self.postal_info.org {
            w.element("contact:org", &[], v);
        }
        if let Some(v) = &self.postal_info.birth_date {
            w.element("contact:birthDate", &[], v);
        }
        if let Some(v) = &self.postal_info.identity {
            w.element("contact:identity", &[], v);
        }
        if let Some(v) = &self.postal_info.register_number {
            w.element("contact:registernumber", &[], v);
        }
        w.start("contact:addr", &[]);
        for line in &self.postal_info.address.street {
            w.element("contact:street", &[], line);
        }
        w.element("contact:city", &[], &self.postal_info.address.city);
        if let Some(state) = &self.postal_info.address.state {
            w.element("contact:sp", &[], state);
        }
        w.element("contact:pc", &[], &self.postal_info.address.postal_code);
        w.element("contact:cc", &[], &self.postal_info.address.country);
        w.end("contact:addr");
        w.end("contact:postalInfo");
    }

    fn write_body(&self, w: &mut Writer) {
        w.element("contact:role", &[], &self.role.to_string());
        w.element("contact:type", &[], &self.kind.wire_type().to_string());
        self.write_postal_info(w);
        w.element("contact:voice", &[], &self.phone);
        w.element("contact:email", &[], &self.email);
        w.element("contact:legalemail", &[], &self.legal_email);
        w.start("contact:disclose", &[("flag", &self.disclose.flag.to_string())]);
        w.element("contact:email", &[], &self.disclose.email.to_string());
        w.element("contact:address", &[], &self.disclose.address.to_string());
        w.end("contact:disclose");
    }
}

/// Parsed `<infData>` for `GetContact` (§4.5).
#[derive(Debug, Clone)]
pub struct ContactResponse {
    pub id: String,
    pub role: i32,
    pub type_: i32,
    pub postal_info: PostalInfo,
    pub phone: String,
    pub email: String,
    pub legal_email: String,
    pub client_id: String,
    pub creator_id: String,
    pub created: Timestamp,
    pub updated: Option<Timestamp>,
}

impl ContactResponse {
    pub(crate) fn from_element(info: &Element) -> crate::error::Result<Self> {
        let postal = info.child("postalInfo");
        let addr = postal.and_then(|p| p.child("addr"));
        let postal_info = PostalInfo {
            is_finnish: postal.map(|p| p.child_text("isFinnish") == "1").unwrap_or(false),
            first_name: postal.map(|p| p.child_text("firstname").to_string()).filter(|s| !s.is_empty()),
            last_name: postal.map(|p| p.child_text("lastname").to_string()).filter(|s| !s.is_empty()),
            name: postal.map(|p| p.child_text("name").to_string()).filter(|s| !s.is_empty()),
            org: postal.map(|p| p.child_text("org").to_string()).filter(|s| !s.is_empty()),
            birth_date: postal.map(|p| p.child_text("birthDate").to_string()).filter(|s| !s.is_empty()),
            identity: postal.map(|p| p.child_text("identity").to_string()).filter(|s| !s.is_empty()),
            register_number: postal
                .map(|p| p.child_text("registernumber").to_string())
                .filter(|s| !s.is_empty()),
            address: Address {
                street: addr.map(|a| a.children("street").map(Element::text).map(String::from).collect()).unwrap_or_default(),
                city: addr.map(|a| a.child_text("city").to_string()).unwrap_or_default(),
                state: addr.map(|a| a.child_text("sp").to_string()).filter(|s| !s.is_empty()),
                postal_code: addr.map(|a| a.child_text("pc").to_string()).unwrap_or_default(),
                country: addr.map(|a| a.child_text("cc").to_string()).unwrap_or_default(),
            },
        };

        let updated = match info.child_text("upDate") {
            "" => None,
            raw => Some(Timestamp::parse(raw)?),
        };

        Ok(ContactResponse {
            id: info.child_text("id").to_string(),
            role: info.child_text("role").parse().unwrap_or(0),
            type_: info.child_text("type").parse().unwrap_or(0),
            postal_info,
            phone: info.child_text("voice").to_string(),
            email: info.child_text("email").to_string(),
            legal_email: info.child_text("legalemail").to_string(),
            client_id: info.child_text("clID").to_string(),
            creator_id: info.child_text("crID").to_string(),
            created: Timestamp::parse(info.child_text("crDate"))?,
            updated,
        })
    }
}

pub(crate) fn build_check(ids: &[String], cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("check", &[]);
        w.start("contact:check", &[("xmlns:contact", CONTACT)]);
        for id in ids {
            w.element("contact:id", &[], id);
        }
        w.end("contact:check");
        w.end("check");
    })
}

pub(crate) fn build_info(id: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("info", &[]);
        w.start("contact:info", &[("xmlns:contact", CONTACT)]);
        w.element("contact:id", &[], id);
        w.end("contact:info");
        w.end("info");
    })
}

pub(crate) fn build_create(contact: &ContactInfo, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("create", &[]);
        w.start("contact:create", &[("xmlns:contact", CONTACT)]);
        contact.write_body(w);
        w.end("contact:create");
        w.end("create");
    })
}

pub(crate) fn build_update(id: &str, changes: &ContactInfo, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("update", &[]);
        w.start("contact:update", &[("xmlns:contact", CONTACT)]);
        w.element("contact:id", &[], id);
        w.empty("contact:add", &[]);
        w.empty("contact:rem", &[]);
        w.start("contact:chg", &[]);
        changes.write_body(w);
        w.end("contact:chg");
        w.end("contact:update");
        w.end("update");
    })
}

pub(crate) fn build_delete(id: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("delete", &[]);
        w.start("contact:delete", &[("xmlns:contact", CONTACT)]);
        w.element("contact:id", &[], id);
        w.end("contact:delete");
        w.end("delete");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_private_person_with_disclosure_off() {
        let contact = private_person(
            2, true, "Matti", "Meikalainen", "010190-123X", "",
            "Helsinki", "FI", &["Esimerkkikatu 1".to_string()], "00100",
            "matti@example.fi", "+358401234567",
        );
        assert_eq!(contact.disclose.email, 0);
        assert_eq!(contact.disclose.address, 0);
        assert_eq!(contact.postal_info.identity.as_deref(), Some("010190-123X"));
    }

    #[test]
    fn organisation_contact_forces_address_disclosure_on() {
        let contact = organisation(
            5, true, "Special Test Oy", "1881545-1", "Testi Test",
            "Vantaa", "FI", &["Tikkurilantie 1".to_string()], "04230",
            "testi@specialtest.fi", "+3585633456",
        );
        assert_eq!(contact.disclose.address, 1);
    }
}
