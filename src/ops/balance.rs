//! Account balance query (§4.5 `Balance`), grounded in
//! `pkg/registry/balance.go`.

use std::io::{Read, Write};

use crate::client::{response_element, Client};
use crate::error::{Error, Result};
use crate::net::connection::ApplyDeadlines;
use crate::transaction;

impl<S: Read + Write + ApplyDeadlines> Client<S> {
    /// Returns the available credit as a whole number of euros.
    pub fn balance(&mut self) -> Result<i64> {
        let cl_trid = transaction::generate();
        let body = crate::command::build(&[], &cl_trid, |w| {
            w.start("check", &[]);
            w.element("balance", &[], "");
            w.end("check");
        });
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let amount = response
            .child("resData")
            .map(|r| r.child_text("balanceamount"))
            .unwrap_or("");
        amount
            .parse()
            .map_err(|_| Error::decode_xml("non-numeric balance amount", Vec::new()))
    }
}
