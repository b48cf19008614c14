//! Pre-flight validators (§4.7). Pure and synchronous: every check here
//! runs before a single byte reaches the wire, matching the source's
//! `Validate()` methods (mostly stubbed upstream as `// TODO`; filled in
//! here against the rules actually described for this registry).

use crate::error::{Error, Result};
use crate::model::contact::{ContactInfo, ContactKind};

const TRANSFER_KEY_SPECIALS: &str = "!\"#$%'()*+,-./:;=@[\\]^_'{|}~)";

/// `^[a-z0-9-]+\.fi$`, overall length 5-66 (§3, §4.7).
pub fn domain_name(name: &str) -> Result<()> {
    if !(5..=66).contains(&name.len()) {
        return Err(Error::invalid_input(format!(
            "domain name must be 5-66 characters: {name}"
        )));
    }
    let label = name.strip_suffix(".fi").ok_or_else(|| {
        Error::invalid_input(format!("domain name must end in .fi: {name}"))
    })?;
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(Error::invalid_input(format!(
            "domain name must match [a-z0-9-]+.fi: {name}"
        )));
    }
    Ok(())
}

/// Registration period must be in years, 1-5 (§3 invariants).
pub fn domain_period_years(years: i32) -> Result<()> {
    if !(1..=5).contains(&years) {
        return Err(Error::invalid_input(format!(
            "registration period must be 1-5 years, got {years}"
        )));
    }
    Ok(())
}

/// Registrant contact id must be present for domain creation.
pub fn registrant(registrant: &str) -> Result<()> {
    if registrant.trim().is_empty() {
        return Err(Error::invalid_input("registrant contact id is required"));
    }
    Ok(())
}

fn len_in(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    if !(min..=max).contains(&value.len()) {
        return Err(Error::invalid_input(format!(
            "{field} must be {min}-{max} characters, got {} ({value:?})",
            value.len()
        )));
    }
    Ok(())
}

fn address(address: &crate::model::contact::Address) -> Result<()> {
    if !(1..=3).contains(&address.street.len()) {
        return Err(Error::invalid_input("address must have 1-3 street lines"));
    }
    for line in &address.street {
        len_in("address street line", line, 2, 255)?;
    }
    len_in("address city", &address.city, 2, 128)?;
    if let Some(state) = &address.state {
        if state.len() > 128 {
            return Err(Error::invalid_input("address state must be at most 128 characters"));
        }
    }
    if address.country.len() != 2 {
        return Err(Error::invalid_input("address country must be an ISO 3166-1 alpha-2 code"));
    }
    let postal_len = if address.country.eq_ignore_ascii_case("FI") { 5..=5 } else { 2..=16 };
    if !postal_len.contains(&address.postal_code.len()) {
        return Err(Error::invalid_input(format!(
            "address postal code has invalid length for country {}",
            address.country
        )));
    }
    Ok(())
}

fn phone(phone: &str) -> Result<()> {
    if phone.len() < 5 || !phone.starts_with('+') {
        return Err(Error::invalid_input("phone number must start with + and be at least 5 characters"));
    }
    Ok(())
}

/// Full contact record validation (§4.7).
pub fn contact(contact: &ContactInfo) -> Result<()> {
    if !matches!(contact.role, 2 | 5) {
        return Err(Error::invalid_input(format!("contact role must be 2 or 5, got {}", contact.role)));
    }
    if contact.role == 5 {
        if contact.legal_email.trim().is_empty() {
            return Err(Error::invalid_input("role 5 contacts require a legal email"));
        }
    } else if contact.email.trim().is_empty() {
        return Err(Error::invalid_input("contact requires an email address"));
    }

    phone(&contact.phone)?;
    address(&contact.postal_info.address)?;

    match contact.kind {
        ContactKind::PrivatePerson => {
            let first = contact.postal_info.first_name.as_deref().unwrap_or("");
            let last = contact.postal_info.last_name.as_deref().unwrap_or("");
            len_in("contact first name", first, 1, 255)?;
            len_in("contact last name", last, 1, 255)?;
            if contact.postal_info.name.is_some() {
                return Err(Error::invalid_input("private-person contacts must not set an org name"));
            }
            if contact.postal_info.is_finnish {
                if contact.postal_info.identity.as_deref().unwrap_or("").is_empty() {
                    return Err(Error::invalid_input("Finnish private-person contacts require an identity code"));
                }
            } else if contact.postal_info.birth_date.as_deref().unwrap_or("").is_empty() {
                return Err(Error::invalid_input("non-Finnish private-person contacts require a birth date"));
            }
        }
        ContactKind::Organisation(_) => {
            let name = contact.postal_info.name.as_deref().unwrap_or("");
            if name.is_empty() {
                return Err(Error::invalid_input("organisation contacts require a contact name"));
            }
            let org = contact.postal_info.org.as_deref().unwrap_or("");
            len_in("organisation name", org, 2, 255)?;
            if contact.postal_info.register_number.as_deref().unwrap_or("").is_empty() {
                return Err(Error::invalid_input("organisation contacts require a register number"));
            }
            if contact.disclose.address != 1 {
                return Err(Error::invalid_input("organisation contacts must disclose their address"));
            }
        }
    }

    Ok(())
}

/// 8-64 chars, at least one of each: lowercase, uppercase, digit, special.
pub fn transfer_key(key: &str) -> Result<()> {
    if !(8..=64).contains(&key.len()) {
        return Err(Error::invalid_input("transfer key must be 8-64 characters"));
    }
    let has_lower = key.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = key.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = key.chars().any(|c| c.is_ascii_digit());
    let has_special = key.chars().any(|c| TRANSFER_KEY_SPECIALS.contains(c));
    if has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        Err(Error::invalid_input(
            "transfer key must contain a lowercase letter, an uppercase letter, a digit, and a special character",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_domain_name() {
        assert!(domain_name("testdomain1.fi").is_ok());
    }

    #[test]
    fn rejects_non_fi_domain() {
        assert!(domain_name("testdomain3.co.uk").is_err());
    }

    #[test]
    fn transfer_key_needs_all_four_classes() {
        assert!(transfer_key("invalidKey123").is_err());
        assert!(transfer_key("fgs+562Fds").is_ok());
    }

    #[test]
    fn organisation_contact_requires_address_disclosure() {
        let mut c = crate::model::contact::organisation(
            5, true, "Special Test Oy", "1881545-1", "Testi Test",
            "Vantaa", "FI", &["Tikkurilantie 1".to_string()], "04230",
            "testi@specialtest.fi", "+3585633456",
        );
        assert!(contact(&c).is_ok());
        c.disclose.address = 0;
        assert!(contact(&c).is_err());
    }

    #[test]
    fn private_person_requires_identity_when_finnish() {
        let mut c = crate::model::contact::private_person(
            2, true, "Matti", "Meikalainen", "010190-123X", "",
            "Helsinki", "FI", &["Esimerkkikatu 1".to_string()], "00100",
            "matti@example.fi", "+358401234567",
        );
        assert!(contact(&c).is_ok());
        c.postal_info.identity = None;
        assert!(contact(&c).is_err());
    }
}
