//! Host operations (§4.5), grounded in `pkg/registry/host.go`.

use std::io::{Read, Write};

use crate::client::{response_element, Client};
use crate::error::{Error, Result};
use crate::model::host::{self, HostCreated, HostInfo};
use crate::model::CheckResult;
use crate::net::connection::ApplyDeadlines;
use crate::transaction;

impl<S: Read + Write + ApplyDeadlines> Client<S> {
    /// Batched availability check (§4.5 `CheckHosts`).
    pub fn check_hosts(&mut self, names: &[String]) -> Result<Vec<CheckResult>> {
        let cl_trid = transaction::generate();
        let body = host::build_check(names, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let chk_data = response
            .child("resData")
            .and_then(|r| r.child("chkData"))
            .ok_or_else(|| Error::decode_xml("missing host chkData", Vec::new()))?;
        Ok(chk_data.children("cd").map(|cd| CheckResult::from_element(cd, "name")).collect())
    }

    /// Info query (§4.5 `GetHost`).
    pub fn get_host(&mut self, hostname: &str) -> Result<HostInfo> {
        let cl_trid = transaction::generate();
        let body = host::build_info(hostname, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let info_el = response
            .child("resData")
            .and_then(|r| r.child("infData"))
            .ok_or_else(|| Error::decode_xml("missing host infData", Vec::new()))?;
        HostInfo::from_element(info_el)
    }

    /// Creates a host (§4.5 `CreateHost`).
    pub fn create_host(&mut self, hostname: &str, addresses: &[String]) -> Result<HostCreated> {
        let formatted = host::format_addresses(addresses)?;
        let cl_trid = transaction::generate();
        let body = host::build_create(hostname, &formatted, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let cre_data = response
            .child("resData")
            .and_then(|r| r.child("creData"))
            .ok_or_else(|| Error::decode_xml("missing host creData", Vec::new()))?;
        let created = HostCreated {
            hostname: cre_data.child_text("name").to_string(),
            created: crate::xml::datetime::Timestamp::parse(cre_data.child_text("crDate"))?,
        };
        log::info!("created host {}", created.hostname);
        Ok(created)
    }

    /// Adds/removes glue addresses (§4.5 `UpdateHost`).
    pub fn update_host(&mut self, hostname: &str, add: &[String], remove: &[String]) -> Result<()> {
        let add_addrs = host::format_addresses(add)?;
        let remove_addrs = host::format_addresses(remove)?;
        let cl_trid = transaction::generate();
        let body = host::build_update(hostname, &add_addrs, &remove_addrs, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("updated host {hostname}");
        Ok(())
    }

    /// Deletes a host by name (§4.5 `DeleteHost`).
    pub fn delete_host(&mut self, hostname: &str) -> Result<()> {
        let cl_trid = transaction::generate();
        let body = host::build_delete(hostname, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("deleted host {hostname}");
        Ok(())
    }
}

