//! Domain operations (§4.5), grounded in `pkg/registry/domain.go`.

use std::io::{Read, Write};

use crate::client::{response_element, Client};
use crate::error::{Error, Result};
use crate::model::domain::{self, DomainCreated, DomainDetails, DomainInfo, DomainRenewed, DomainTransfer, DomainUpdate, DsRecord};
use crate::model::CheckResult;
use crate::net::connection::ApplyDeadlines;
use crate::transaction;
use crate::validate;

impl<S: Read + Write + ApplyDeadlines> Client<S> {
    /// Batched availability check (§4.5 `CheckDomains`).
    pub fn check_domains(&mut self, names: &[String]) -> Result<Vec<CheckResult>> {
        for name in names {
            validate::domain_name(name)?;
        }
        let cl_trid = transaction::generate();
        let body = domain::build_check(names, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let chk_data = response
            .child("resData")
            .and_then(|r| r.child("chkData"))
            .ok_or_else(|| Error::decode_xml("missing domain chkData", Vec::new()))?;
        Ok(chk_data.children("cd").map(|cd| CheckResult::from_element(cd, "name")).collect())
    }

    /// Info query; `hosts="all"` is always requested (§4.5 `GetDomain`).
    pub fn get_domain(&mut self, name: &str) -> Result<DomainInfo> {
        validate::domain_name(name)?;
        let cl_trid = transaction::generate();
        let body = domain::build_info(name, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let info_el = response
            .child("resData")
            .and_then(|r| r.child("infData"))
            .ok_or_else(|| Error::decode_xml("missing domain infData", Vec::new()))?;
        DomainInfo::from_elements(info_el, response.child("extension"))
    }

    /// Creates a domain; validators run first (§4.5 `CreateDomain`, §4.7).
    pub fn create_domain(&mut self, details: &DomainDetails) -> Result<DomainCreated> {
        validate::domain_name(&details.name)?;
        validate::domain_period_years(details.years)?;
        validate::registrant(&details.registrant)?;

        let cl_trid = transaction::generate();
        let body = domain::build_create(details, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let cre_data = response
            .child("resData")
            .and_then(|r| r.child("creData"))
            .ok_or_else(|| Error::decode_xml("missing domain creData", Vec::new()))?;
        let created = DomainCreated::from_element(cre_data)?;
        log::info!("created domain {}", created.name);
        Ok(created)
    }

    /// Differential update via `add`/`rem`/`chg` (§4.5 `UpdateDomain`).
    /// Build `update` with one of `model::domain`'s `update_*` factory
    /// functions first.
    pub fn update_domain(&mut self, update: &DomainUpdate) -> Result<()> {
        validate::domain_name(&update.name)?;
        if let Some(auth) = &update.chg_auth_info {
            if let Some(key) = &auth.broker_change_key {
                validate::transfer_key(key)?;
            }
        }
        let cl_trid = transaction::generate();
        let body = domain::build_update(update, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("updated domain {}", update.name);
        Ok(())
    }

    /// DNSSEC DS-record update, sent as a sibling `<extension>` block
    /// (§4.5 `UpdateDomainExtensions`).
    pub fn update_domain_ds_records(&mut self, domain: &str, add: &[DsRecord], remove: &[DsRecord]) -> Result<()> {
        self.update_domain_ds_records_inner(domain, add, remove, false)
    }

    /// Wipes every DS record currently on the domain (`secDNS-1.1`'s
    /// `<secDNS:rem><secDNS:all>true</secDNS:all></secDNS:rem>`), optionally
    /// adding a fresh set in the same command.
    pub fn remove_all_domain_ds_records(&mut self, domain: &str, add: &[DsRecord]) -> Result<()> {
        self.update_domain_ds_records_inner(domain, add, &[], true)
    }

    fn update_domain_ds_records_inner(
        &mut self,
        domain: &str,
        add: &[DsRecord],
        remove: &[DsRecord],
        remove_all: bool,
    ) -> Result<()> {
        validate::domain_name(domain)?;
        let cl_trid = transaction::generate();
        let body = crate::model::domain::build_update_ds(domain, add, remove, remove_all, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("updated DS records for domain {domain}");
        Ok(())
    }

    /// Renews a domain; the server rejects with `2306` if
    /// `current_expiration` doesn't match its own records (§4.5
    /// `RenewDomain`).
    pub fn renew_domain(&mut self, name: &str, current_expiration: &str, years: i32) -> Result<DomainRenewed> {
        validate::domain_name(name)?;
        validate::domain_period_years(years)?;
        let cl_trid = transaction::generate();
        let body = domain::build_renew(name, current_expiration, years, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let ren_data = response
            .child("resData")
            .and_then(|r| r.child("renData"))
            .ok_or_else(|| Error::decode_xml("missing domain renData", Vec::new()))?;
        let renewed = DomainRenewed::from_element(ren_data)?;
        log::info!("renewed domain {} to {}", renewed.name, renewed.expires.raw);
        Ok(renewed)
    }

    /// Requests a transfer with op `"request"` (§4.5 `TransferDomain`).
    pub fn transfer_domain(&mut self, name: &str, transfer_key: &str, new_nameservers: &[String]) -> Result<DomainTransfer> {
        validate::domain_name(name)?;
        validate::transfer_key(transfer_key)?;
        let cl_trid = transaction::generate();
        let body = domain::build_transfer(name, transfer_key, new_nameservers, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let trn_data = response
            .child("resData")
            .and_then(|r| r.child("trnData"))
            .ok_or_else(|| Error::decode_xml("missing domain trnData", Vec::new()))?;
        let transfer = DomainTransfer::from_element(trn_data)?;
        log::info!("requested transfer of domain {}", transfer.name);
        Ok(transfer)
    }

    /// Deletes a domain by name (§4.5 `DeleteDomain`).
    pub fn delete_domain(&mut self, name: &str) -> Result<()> {
        validate::domain_name(name)?;
        let cl_trid = transaction::generate();
        let body = domain::build_delete(name, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("deleted domain {name}");
        Ok(())
    }
}
