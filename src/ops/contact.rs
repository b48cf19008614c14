//! Contact operations (§4.5), grounded in `pkg/registry/contact.go`.

use std::io::{Read, Write};

use crate::client::{response_element, Client};
use crate::error::{Error, Result};
use crate::model::contact::{self, ContactInfo, ContactResponse};
use crate::model::CheckResult;
use crate::net::connection::ApplyDeadlines;
use crate::transaction;
use crate::validate;

impl<S: Read + Write + ApplyDeadlines> Client<S> {
    /// Batched availability check (§4.5 `CheckContacts`).
    pub fn check_contacts(&mut self, ids: &[String]) -> Result<Vec<CheckResult>> {
        let cl_trid = transaction::generate();
        let body = contact::build_check(ids, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let chk_data = response
            .child("resData")
            .and_then(|r| r.child("chkData"))
            .ok_or_else(|| Error::decode_xml("missing contact chkData", Vec::new()))?;
        Ok(chk_data.children("cd").map(|cd| CheckResult::from_element(cd, "id")).collect())
    }

    /// Info query (§4.5 `GetContact`).
    pub fn get_contact(&mut self, id: &str) -> Result<ContactResponse> {
        let cl_trid = transaction::generate();
        let body = contact::build_info(id, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let info_el = response
            .child("resData")
            .and_then(|r| r.child("infData"))
            .ok_or_else(|| Error::decode_xml("missing contact infData", Vec::new()))?;
        ContactResponse::from_element(info_el)
    }

    /// Creates a contact; validators run first (§4.5 `CreateContact`, §4.7).
    pub fn create_contact(&mut self, contact_info: &ContactInfo) -> Result<String> {
        validate::contact(contact_info)?;
        let cl_trid = transaction::generate();
        let body = contact::build_create(contact_info, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let cre_data = response
            .child("resData")
            .and_then(|r| r.child("creData"))
            .ok_or_else(|| Error::decode_xml("missing contact creData", Vec::new()))?;
        let id = cre_data.child_text("id").to_string();
        log::info!("created contact {id}");
        Ok(id)
    }

    /// Differential update (§4.5 `UpdateContact`).
    pub fn update_contact(&mut self, id: &str, changes: &ContactInfo) -> Result<()> {
        validate::contact(changes)?;
        let cl_trid = transaction::generate();
        let body = contact::build_update(id, changes, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("updated contact {id}");
        Ok(())
    }

    /// Deletes a contact by id (§4.5 `DeleteContact`).
    pub fn delete_contact(&mut self, id: &str) -> Result<()> {
        let cl_trid = transaction::generate();
        let body = contact::build_delete(id, &cl_trid);
        self.call_authenticated(&cl_trid, body)?;
        log::info!("deleted contact {id}");
        Ok(())
    }
}
