//! Message-queue polling (§4.6), grounded in `pkg/registry/polling.go`.

use std::io::{Read, Write};

use crate::client::{response_element, Client};
use crate::error::{Error, Result};
use crate::model::poll::{self, PollMessage};
use crate::net::connection::ApplyDeadlines;
use crate::transaction;

impl<S: Read + Write + ApplyDeadlines> Client<S> {
    /// Sends `<poll op="req"/>`. `1300` (empty queue) surfaces as
    /// [`Error::PollEmpty`]; `1301` returns the dequeued message; any
    /// other code is a server error (§4.6).
    pub fn poll(&mut self) -> Result<PollMessage> {
        let cl_trid = transaction::generate();
        let body = poll::build_poll(&cl_trid);
        let root = self.call_authenticated_raw(&cl_trid, body)?;
        let response = response_element(&root)?;
        let result = response
            .child("result")
            .ok_or_else(|| Error::decode_xml("missing <result> element", Vec::new()))?;
        let code: u16 = result
            .attr("code")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| Error::decode_xml("missing or non-numeric result code", Vec::new()))?;

        match code {
            1300 => Err(Error::PollEmpty),
            1301 => {
                let msg_q = response
                    .child("msgQ")
                    .ok_or_else(|| Error::decode_xml("missing <msgQ> element", Vec::new()))?;
                PollMessage::from_elements(msg_q, response.child("resData"))
            }
            code if code >= 2500 => {
                self.mark_broken();
                Err(Error::ServerFatal {
                    code,
                    message: result.child_text("msg").to_string(),
                })
            }
            _ => Err(Error::ServerResult {
                code,
                message: result.child_text("msg").to_string(),
            }),
        }
    }

    /// Acks a dequeued message. Requires result `1000` **and** the echoed
    /// `msgQ/@id` to match `id`; returns the remaining-messages count
    /// (§4.6 `PollAck`).
    pub fn poll_ack(&mut self, id: &str) -> Result<u32> {
        let cl_trid = transaction::generate();
        let body = poll::build_ack(id, &cl_trid);
        let root = self.call_authenticated(&cl_trid, body)?;
        let response = response_element(&root)?;
        let msg_q = response
            .child("msgQ")
            .ok_or_else(|| Error::decode_xml("missing <msgQ> element", Vec::new()))?;
        let echoed = msg_q.attr("id").unwrap_or("");
        if echoed != id {
            return Err(Error::AckMismatch {
                expected: id.to_string(),
                got: echoed.to_string(),
            });
        }
        let remaining: u32 = msg_q.attr("count").and_then(|v| v.parse().ok()).unwrap_or(0);
        log::info!("acked poll message {id}, {remaining} remaining");
        Ok(remaining)
    }
}
