//! Domain object model (§3, §3a, §4.5, §4.7), grounded in
//! `pkg/epp/domain.go`/`pkg/registry/domain.go`, with the DS-record and
//! registry-lock shapes cross-checked against the `domainInfoResponse` and
//! `domainNotFound` wire fixtures in `pkg/registry/domain_test.go`.

use crate::error::Result;
use crate::namespaces::{DOMAIN, DOMAIN_EXT, SEC_DNS};
use crate::xml::datetime::Timestamp;
use crate::xml::{Element, Writer};

/// One `<domain:contact type="...">` line: an admin/tech/billing role
/// pointing at a contact id.
#[derive(Debug, Clone)]
pub struct ContactRole {
    pub account_id: String,
    pub role: String,
}

/// `<domain:status s="..." lang="...">reason</domain:status>`.
#[derive(Debug, Clone)]
pub struct DomainStatus {
    pub status: String,
    pub lang: Option<String>,
    pub reason: Option<String>,
}

/// The two auth-info keys the registry distinguishes: a broker change key
/// (`domain:pw`) and an ownership transfer key (`domain:pwregistranttransfer`).
#[derive(Debug, Clone, Default)]
pub struct AuthInfo {
    pub broker_change_key: Option<String>,
    pub ownership_change_key: Option<String>,
}

/// DNSKEY material nested under a [`DsRecord`].
#[derive(Debug, Clone)]
pub struct KeyData {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: String,
}

/// A DNSSEC delegation signer record (`secDNS-1.1`).
#[derive(Debug, Clone)]
pub struct DsRecord {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: String,
    pub key_data: Option<KeyData>,
}

impl DsRecord {
    fn write(&self, w: &mut Writer) {
        w.start("domain:dsData", &[]);
        w.element("domain:keyTag", &[], &self.key_tag.to_string());
        w.element("domain:alg", &[], &self.algorithm.to_string());
        w.element("domain:digestType", &[], &self.digest_type.to_string());
        w.element("domain:digest", &[], &self.digest);
        if let Some(kd) = &self.key_data {
            w.start("domain:keyData", &[]);
            w.element("domain:flags", &[], &kd.flags.to_string());
            w.element("domain:protocol", &[], &kd.protocol.to_string());
            w.element("domain:alg", &[], &kd.algorithm.to_string());
            w.element("domain:pubKey", &[], &kd.public_key);
            w.end("domain:keyData");
        }
        w.end("domain:dsData");
    }

    fn from_element(el: &Element) -> Self {
        let key_data = el.child("keyData").map(|kd| KeyData {
            flags: kd.child_text("flags").parse().unwrap_or(0),
            protocol: kd.child_text("protocol").parse().unwrap_or(0),
            algorithm: kd.child_text("alg").parse().unwrap_or(0),
            public_key: kd.child_text("pubKey").to_string(),
        });
        DsRecord {
            key_tag: el.child_text("keyTag").parse().unwrap_or(0),
            algorithm: el.child_text("alg").parse().unwrap_or(0),
            digest_type: el.child_text("digestType").parse().unwrap_or(0),
            digest: el.child_text("digest").to_string(),
            key_data,
        }
    }
}

/// A host-attr nameserver: an unregistered host plus its glue addresses.
#[derive(Debug, Clone)]
pub struct HostAttr {
    pub name: String,
    pub addresses: Vec<super::host::HostAddress>,
}

/// `domain:ns`'s two mutually-usable shapes: references to already-registered
/// hosts, or inline host-attr glue for hosts that aren't.
#[derive(Debug, Clone, Default)]
pub struct Nameservers {
    pub host_obj: Vec<String>,
    pub host_attr: Vec<HostAttr>,
}

impl Nameservers {
    fn write(&self, w: &mut Writer, tag: &str) {
        w.start(tag, &[]);
        for obj in &self.host_obj {
            w.element("domain:hostObj", &[], obj);
        }
        for attr in &self.host_attr {
            w.start("domain:hostAttr", &[]);
            w.element("domain:hostName", &[], &attr.name);
            for addr in &attr.addresses {
                w.element(
                    "domain:hostAddr",
                    &[("ip", if addr.family == super::host::AddressFamily::V6 { "v6" } else { "v4" })],
                    &addr.address,
                );
            }
            w.end("domain:hostAttr");
        }
        w.end(tag);
    }
}

/// `domain:registrylock`'s three operations, supplementing the source's
/// unimplemented `DomainUpdateActivateRegistryLock` /
/// `DeactivateRegistryLock` / `RequestKeyForRegistryLock` stubs (§3a).
#[derive(Debug, Clone)]
pub enum RegistryLockChange {
    Activate { sms_numbers: Vec<String> },
    Deactivate,
    RequestKey { number_to_send: i32 },
}

impl RegistryLockChange {
    fn write(&self, w: &mut Writer) {
        match self {
            RegistryLockChange::Activate { sms_numbers } => {
                w.start("domain:registrylock", &[("type", "activate")]);
                for number in sms_numbers {
                    w.element("domain:smsnumber", &[], number);
                }
                w.end("domain:registrylock");
            }
            RegistryLockChange::Deactivate => {
                w.empty("domain:registrylock", &[("type", "deactivate")]);
            }
            RegistryLockChange::RequestKey { number_to_send } => {
                w.start("domain:registrylock", &[("type", "request-key")]);
                w.element("domain:numbertosend", &[], &number_to_send.to_string());
                w.end("domain:registrylock");
            }
        }
    }
}

/// A `create` command body (§4.5 `CreateDomain`).
#[derive(Debug, Clone)]
pub struct DomainDetails {
    pub name: String,
    pub years: i32,
    pub registrant: String,
    pub nameservers: Vec<String>,
    pub contacts: Vec<ContactRole>,
}

/// Builds a create body with no extra contacts, matching `NewDomainDetails`.
pub fn new_domain_details(name: &str, years: i32, registrant: &str, nameservers: &[String]) -> DomainDetails {
    DomainDetails {
        name: name.to_string(),
        years,
        registrant: registrant.to_string(),
        nameservers: nameservers.to_vec(),
        contacts: Vec::new(),
    }
}

/// An `update` command body (§4.5 `UpdateDomain`), assembled by one of the
/// `update_*` factory functions below rather than constructed directly —
/// the source's `createDomainUpdateBase` plus per-intent helpers.
#[derive(Debug, Clone, Default)]
pub struct DomainUpdate {
    pub name: String,
    pub add_status: Option<DomainStatus>,
    pub add_nameservers: Vec<String>,
    pub rem_status: Option<DomainStatus>,
    pub rem_nameservers: Vec<String>,
    pub rem_auth_info: Option<AuthInfo>,
    pub chg_registrant: Option<String>,
    pub chg_contacts: Vec<ContactRole>,
    pub chg_auth_info: Option<AuthInfo>,
    pub chg_registry_lock: Option<RegistryLockChange>,
}

fn base(domain: &str) -> DomainUpdate {
    DomainUpdate {
        name: domain.to_string(),
        ..Default::default()
    }
}

/// Sets the admin and/or tech contact, matching `NewDomainUpdateContacts`.
pub fn update_contacts(domain: &str, new_admin: Option<&str>, new_tech: Option<&str>) -> DomainUpdate {
    let mut update = base(domain);
    if let Some(admin) = new_admin {
        update.chg_contacts.push(ContactRole {
            account_id: admin.to_string(),
            role: "admin".to_string(),
        });
    }
    if let Some(tech) = new_tech {
        update.chg_contacts.push(ContactRole {
            account_id: tech.to_string(),
            role: "tech".to_string(),
        });
    }
    update
}

/// Matches `NewDomainUpdateNameservers`.
pub fn update_nameservers(domain: &str, removed: &[String], added: &[String]) -> DomainUpdate {
    let mut update = base(domain);
    update.rem_nameservers = removed.to_vec();
    update.add_nameservers = added.to_vec();
    update
}

/// Matches `NewDomainUpdateSendOwnershipChangeKey`.
pub fn request_ownership_change_key(domain: &str) -> DomainUpdate {
    let mut update = base(domain);
    update.chg_auth_info = Some(AuthInfo {
        ownership_change_key: Some("new".to_string()),
        ..Default::default()
    });
    update
}

/// Matches `NewDomainUpdateChangeOwnership`.
pub fn change_ownership(domain: &str, new_registrant: &str, ownership_change_key: &str) -> DomainUpdate {
    let mut update = base(domain);
    update.chg_registrant = Some(new_registrant.to_string());
    update.chg_auth_info = Some(AuthInfo {
        ownership_change_key: Some(ownership_change_key.to_string()),
        ..Default::default()
    });
    update
}

/// Matches `NewDomainUpdateTransferKey`.
pub fn request_transfer_key(domain: &str, new_key: &str) -> DomainUpdate {
    let mut update = base(domain);
    update.chg_auth_info = Some(AuthInfo {
        broker_change_key: Some(new_key.to_string()),
        ..Default::default()
    });
    update
}

/// Activates registry lock for the given SMS-verified numbers (§3a).
pub fn activate_registry_lock(domain: &str, sms_numbers: &[String]) -> DomainUpdate {
    let mut update = base(domain);
    update.chg_registry_lock = Some(RegistryLockChange::Activate {
        sms_numbers: sms_numbers.to_vec(),
    });
    update
}

/// Deactivates registry lock (§3a).
pub fn deactivate_registry_lock(domain: &str) -> DomainUpdate {
    let mut update = base(domain);
    update.chg_registry_lock = Some(RegistryLockChange::Deactivate);
    update
}

/// Requests an SMS authorisation key be sent to `number_to_send` of the
/// registered numbers (§3a).
pub fn request_registry_lock_key(domain: &str, number_to_send: i32) -> DomainUpdate {
    let mut update = base(domain);
    update.chg_registry_lock = Some(RegistryLockChange::RequestKey { number_to_send });
    update
}

impl DomainDetails {
    fn write(&self, w: &mut Writer) {
        w.element("domain:name", &[], &self.name);
        w.element("domain:period", &[("unit", "y")], &self.years.to_string());
        w.start("domain:ns", &[]);
        for ns in &self.nameservers {
            w.element("domain:hostObj", &[], ns);
        }
        w.end("domain:ns");
        w.element("domain:registrant", &[], &self.registrant);
        for contact in &self.contacts {
            w.element("domain:contact", &[("type", &contact.role)], &contact.account_id);
        }
    }
}

impl DomainUpdate {
    fn write(&self, w: &mut Writer) {
        w.element("domain:name", &[], &self.name);

        w.start("domain:add", &[]);
        if let Some(status) = &self.add_status {
            write_status(w, status);
        }
        if !self.add_nameservers.is_empty() {
            let ns = Nameservers {
                host_obj: self.add_nameservers.clone(),
                host_attr: Vec::new(),
            };
            ns.write(w, "domain:ns");
        }
        w.end("domain:add");

        w.start("domain:rem", &[]);
        if let Some(status) = &self.rem_status {
            write_status(w, status);
        }
        if !self.rem_nameservers.is_empty() {
            let ns = Nameservers {
                host_obj: self.rem_nameservers.clone(),
                host_attr: Vec::new(),
            };
            ns.write(w, "domain:ns");
        }
        if let Some(auth) = &self.rem_auth_info {
            write_auth_info(w, auth);
        }
        w.end("domain:rem");

        w.start("domain:chg", &[]);
        if let Some(registrant) = &self.chg_registrant {
            w.element("domain:registrant", &[], registrant);
        }
        for contact in &self.chg_contacts {
            w.element("domain:contact", &[("type", &contact.role)], &contact.account_id);
        }
        if let Some(auth) = &self.chg_auth_info {
            write_auth_info(w, auth);
        }
        if let Some(lock) = &self.chg_registry_lock {
            lock.write(w);
        }
        w.end("domain:chg");
    }
}

fn write_status(w: &mut Writer, status: &DomainStatus) {
    let mut attrs = vec![("s", status.status.as_str())];
    if let Some(lang) = &status.lang {
        attrs.push(("lang", lang.as_str()));
    }
    w.element("domain:status", &attrs, status.reason.as_deref().unwrap_or(""));
}

fn write_auth_info(w: &mut Writer, auth: &AuthInfo) {
    w.start("domain:authInfo", &[]);
    if let Some(key) = &auth.broker_change_key {
        w.element("domain:pw", &[], key);
    }
    if let Some(key) = &auth.ownership_change_key {
        w.element("domain:pwregistranttransfer", &[], key);
    }
    w.end("domain:authInfo");
}

/// Parsed `<infData>` for `GetDomain` (§4.5), optionally joined with the
/// `secDNS-1.1`/`domain-ext-1.0` `<extension>` block the server attaches
/// even to a not-found response (§3a, `domainNotFound` fixture).
#[derive(Debug, Clone)]
pub struct DomainInfo {
    pub name: String,
    pub registry_locked: bool,
    pub auto_renew: bool,
    pub auto_renew_date: Timestamp,
    pub status: Option<DomainStatus>,
    pub registrant: String,
    pub contacts: Vec<ContactRole>,
    pub nameservers: Vec<String>,
    pub client_id: String,
    pub creator_id: String,
    pub created: Timestamp,
    pub updated: Option<Timestamp>,
    pub expires: Timestamp,
    pub transferred: Option<Timestamp>,
    pub auth_info: AuthInfo,
    pub ds_records: Vec<DsRecord>,
    /// Present once the registry has scheduled the domain for deletion
    /// (`domain-ext-1.0`'s `<deletiondate><schedule><delDate>`), §3a.
    pub deletion_scheduled: Option<Timestamp>,
}

impl DomainInfo {
    pub(crate) fn from_elements(info: &Element, extension: Option<&Element>) -> Result<Self> {
        let updated = match info.child_text("upDate") {
            "" => None,
            raw => Some(Timestamp::parse(raw)?),
        };
        let transferred = match info.child_text("trDate") {
            "" => None,
            raw => Some(Timestamp::parse(raw)?),
        };
        let status = info.child("status").map(|s| DomainStatus {
            status: s.attr("s").unwrap_or("").to_string(),
            lang: s.attr("lang").map(str::to_string),
            reason: Some(s.text().to_string()).filter(|t| !t.is_empty()),
        });
        let contacts = info
            .children("contact")
            .map(|c| ContactRole {
                account_id: c.text().to_string(),
                role: c.attr("type").unwrap_or("").to_string(),
            })
            .collect();
        let nameservers = info
            .child("ns")
            .map(|ns| ns.children("hostObj").map(Element::text).map(String::from).collect())
            .unwrap_or_default();
        let auth_info = info
            .child("authInfo")
            .map(|a| AuthInfo {
                broker_change_key: Some(a.child_text("pw").to_string()).filter(|s| !s.is_empty()),
                ownership_change_key: Some(a.child_text("pwregistranttransfer").to_string())
                    .filter(|s| !s.is_empty()),
            })
            .unwrap_or_default();
        let ds_records = info.children("dsData").map(DsRecord::from_element).collect();

        let deletion_scheduled = extension
            .and_then(|ext| ext.children.iter().find(|c| c.name.ends_with("deletiondate")))
            .map(|d| d.child("schedule").map(|s| s.child_text("delDate")).unwrap_or(""))
            .filter(|raw| !raw.is_empty())
            .map(Timestamp::parse)
            .transpose()?;

        Ok(DomainInfo {
            name: info.child_text("name").to_string(),
            registry_locked: info.child_text("registrylock") == "1",
            auto_renew: info.child_text("autorenew") == "1",
            auto_renew_date: Timestamp::parse(info.child_text("autorenewDate"))?,
            status,
            registrant: info.child_text("registrant").to_string(),
            contacts,
            nameservers,
            client_id: info.child_text("clID").to_string(),
            creator_id: info.child_text("crID").to_string(),
            created: Timestamp::parse(info.child_text("crDate"))?,
            updated,
            expires: Timestamp::parse(info.child_text("exDate"))?,
            transferred,
            auth_info,
            ds_records,
            deletion_scheduled,
        })
    }
}

/// Success result of `CreateDomain`.
#[derive(Debug, Clone)]
pub struct DomainCreated {
    pub name: String,
    pub created: Timestamp,
    pub expires: Timestamp,
}

impl DomainCreated {
    pub(crate) fn from_element(cre_data: &Element) -> Result<Self> {
        Ok(DomainCreated {
            name: cre_data.child_text("name").to_string(),
            created: Timestamp::parse(cre_data.child_text("crDate"))?,
            expires: Timestamp::parse(cre_data.child_text("exDate"))?,
        })
    }
}

/// Success result of `RenewDomain`.
#[derive(Debug, Clone)]
pub struct DomainRenewed {
    pub name: String,
    pub expires: Timestamp,
}

impl DomainRenewed {
    pub(crate) fn from_element(ren_data: &Element) -> Result<Self> {
        Ok(DomainRenewed {
            name: ren_data.child_text("name").to_string(),
            expires: Timestamp::parse(ren_data.child_text("exDate"))?,
        })
    }
}

/// Success result of `TransferDomain`.
#[derive(Debug, Clone)]
pub struct DomainTransfer {
    pub name: String,
    pub status: String,
    pub requested_by: String,
    pub requested_at: Timestamp,
    pub acted_by: String,
}

impl DomainTransfer {
    pub(crate) fn from_element(trn_data: &Element) -> Result<Self> {
        Ok(DomainTransfer {
            name: trn_data.child_text("name").to_string(),
            status: trn_data.child_text("trStatus").to_string(),
            requested_by: trn_data.child_text("reID").to_string(),
            requested_at: Timestamp::parse(trn_data.child_text("reDate"))?,
            acted_by: trn_data.child_text("acID").to_string(),
        })
    }
}

pub(crate) fn build_check(names: &[String], cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("check", &[]);
        w.start("domain:check", &[("xmlns:domain", DOMAIN)]);
        for name in names {
            w.element("domain:name", &[], name);
        }
        w.end("domain:check");
        w.end("check");
    })
}

pub(crate) fn build_info(name: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("info", &[]);
        w.start("domain:info", &[("xmlns:domain", DOMAIN)]);
        w.element("domain:name", &[("hosts", "all")], name);
        w.end("domain:info");
        w.end("info");
    })
}

pub(crate) fn build_create(details: &DomainDetails, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[("xmlns:xsi", crate::namespaces::XSI)], cl_trid, |w| {
        w.start("create", &[]);
        w.start("domain:create", &[("xmlns:domain", DOMAIN)]);
        details.write(w);
        w.end("domain:create");
        w.end("create");
    })
}

pub(crate) fn build_update(update: &DomainUpdate, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("update", &[]);
        w.start("domain:update", &[("xmlns:domain", DOMAIN)]);
        update.write(w);
        w.end("domain:update");
        w.end("update");
    })
}

/// Updates DS records via the `secDNS-1.1` extension (§3a), a pure
/// extension command sent alongside a minimally-populated `domain:update`.
/// `remove_all` takes precedence over `remove` and wipes every existing
/// record (`secDNS-1.1`'s `<secDNS:rem><secDNS:all>true</secDNS:all></secDNS:rem>`).
pub(crate) fn build_update_ds(
    domain: &str,
    add: &[DsRecord],
    remove: &[DsRecord],
    remove_all: bool,
    cl_trid: &str,
) -> Vec<u8> {
    crate::command::build_with_extension(
        &[],
        cl_trid,
        |w| {
            w.start("update", &[]);
            w.start("domain:update", &[("xmlns:domain", DOMAIN)]);
            w.element("domain:name", &[], domain);
            w.empty("domain:add", &[]);
            w.empty("domain:rem", &[]);
            w.empty("domain:chg", &[]);
            w.end("domain:update");
            w.end("update");
        },
        Some(|w: &mut Writer| {
            w.start("secDNS:update", &[("xmlns:secDNS", SEC_DNS)]);
            if remove_all {
                w.start("secDNS:rem", &[]);
                w.element("secDNS:all", &[], "true");
                w.end("secDNS:rem");
            } else if !remove.is_empty() {
                w.start("secDNS:rem", &[]);
                for rec in remove {
                    rec.write(w);
                }
                w.end("secDNS:rem");
            }
            if !add.is_empty() {
                w.start("secDNS:add", &[]);
                for rec in add {
                    rec.write(w);
                }
                w.end("secDNS:add");
            }
            w.end("secDNS:update");
        }),
    )
}

pub(crate) fn build_renew(name: &str, current_expiration: &str, years: i32, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("renew", &[]);
        w.start("domain:renew", &[("xmlns:domain", DOMAIN)]);
        w.element("domain:name", &[], name);
        w.element("domain:curExpDate", &[], current_expiration);
        w.element("domain:period", &[("unit", "y")], &years.to_string());
        w.end("domain:renew");
        w.end("renew");
    })
}

pub(crate) fn build_transfer(name: &str, transfer_key: &str, new_nameservers: &[String], cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("transfer", &[("op", "request")]);
        w.start("domain:transfer", &[("xmlns:domain", DOMAIN)]);
        w.element("domain:name", &[], name);
        w.start("domain:authInfo", &[]);
        w.element("domain:pw", &[], transfer_key);
        w.end("domain:authInfo");
        if !new_nameservers.is_empty() {
            let ns = Nameservers {
                host_obj: new_nameservers.to_vec(),
                host_attr: Vec::new(),
            };
            ns.write(w, "domain:ns");
        }
        w.end("domain:transfer");
        w.end("transfer");
    })
}

pub(crate) fn build_delete(name: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.start("delete", &[]);
        w.start("domain:delete", &[("xmlns:domain", DOMAIN)]);
        w.element("domain:name", &[], name);
        w.end("domain:delete");
        w.end("delete");
    })
}

#[allow(dead_code)]
pub(crate) const DOMAIN_EXT_NAMESPACE: &str = DOMAIN_EXT;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_domain_info_with_ds_records() {
        let doc = br#"<infData>
            <name>testdomain2.fi</name>
            <registrylock>1</registrylock>
            <autorenew>1</autorenew>
            <autorenewDate>2018-09-25T12:11:29.433</autorenewDate>
            <status s="Granted"/>
            <registrant>TST1234</registrant>
            <contact type="admin">C2000</contact>
            <contact type="tech">C4000</contact>
            <ns>
                <hostObj>ns1.example.com</hostObj>
                <hostObj>ns1.example.net</hostObj>
            </ns>
            <clID>ClientX</clID>
            <crID>ClientY</crID>
            <crDate>1999-04-03T22:00:00.0Z</crDate>
            <upDate>1999-12-03T09:00:00.0Z</upDate>
            <exDate>2005-04-03T22:00:00.0Z</exDate>
            <trDate>2000-04-08T09:00:00.0Z</trDate>
            <authInfo><pw>2fooBAR</pw></authInfo>
            <dsData>
                <keyTag>12345</keyTag>
                <alg>3</alg>
                <digestType>1</digestType>
                <digest>38EC35D5B3A34B33C99B</digest>
                <keyData>
                    <flags>257</flags>
                    <protocol>233</protocol>
                    <alg>1</alg>
                    <pubKey>AQPJ////4Q==</pubKey>
                </keyData>
            </dsData>
        </infData>"#;
        let el = crate::xml::parse(doc).unwrap();
        let info = DomainInfo::from_elements(&el, None).unwrap();
        assert_eq!(info.nameservers.len(), 2);
        assert_eq!(info.ds_records.len(), 1);
        assert_eq!(info.ds_records[0].algorithm, 3);
        assert_eq!(info.ds_records[0].key_data.as_ref().unwrap().public_key, "AQPJ////4Q==");
        assert!(info.deletion_scheduled.is_none());
    }

    #[test]
    fn parses_deletion_schedule_extension() {
        let info_doc = br#"<infData>
            <registrylock>0</registrylock>
            <autorenew>0</autorenew>
            <autorenewDate>0001-01-01T00:00:00</autorenewDate>
            <status />
            <crDate>0001-01-01T00:00:00</crDate>
            <upDate>0001-01-01T00:00:00</upDate>
            <exDate>0001-01-01T00:00:00</exDate>
            <trDate>0001-01-01T00:00:00</trDate>
            <authInfo />
        </infData>"#;
        let ext_doc = br#"<extension>
            <infData xmlns="urn:ietf:params:xml:ns:secDNS-1.1" />
            <deletiondate xmlns="urn:ietf:params:xml:ns:domain-ext-1.0">
                <schedule>
                    <delDate>2021-05-02T00:00:00</delDate>
                </schedule>
            </deletiondate>
        </extension>"#;
        let info_el = crate::xml::parse(info_doc).unwrap();
        let ext_el = crate::xml::parse(ext_doc).unwrap();
        let info = DomainInfo::from_elements(&info_el, Some(&ext_el)).unwrap();
        assert!(info.deletion_scheduled.is_some());
    }

    #[test]
    fn registry_lock_activation_carries_sms_numbers() {
        let update = activate_registry_lock("testdomain.fi", &["+358401234567".to_string()]);
        match update.chg_registry_lock {
            Some(RegistryLockChange::Activate { sms_numbers }) => {
                assert_eq!(sms_numbers, vec!["+358401234567".to_string()]);
            }
            _ => panic!("expected Activate"),
        }
    }
}
