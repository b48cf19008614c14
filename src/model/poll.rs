//! Poll queue message (§3, §4.6), grounded in `pkg/epp/polling.go` and
//! `pkg/registry/polling.go`.

use crate::error::Result;
use crate::xml::datetime::Timestamp;
use crate::xml::Element;

/// A dequeued poll message (`<msgQ>` plus whatever `<resData>` carried).
#[derive(Debug, Clone)]
pub struct PollMessage {
    pub id: String,
    pub count: u32,
    pub queued_at: Timestamp,
    pub body: String,
    /// Object name from `<resData>/<trnData>/<name>`, when the server
    /// attached one (e.g. a newly created contact/domain/host id).
    pub object_name: Option<String>,
}

impl PollMessage {
    pub(crate) fn from_elements(msg_q: &Element, res_data: Option<&Element>) -> Result<Self> {
        let count: u32 = msg_q.attr("count").and_then(|v| v.parse().ok()).unwrap_or(0);
        let object_name = res_data
            .and_then(|rd| rd.children.iter().find(|c| c.name.ends_with("trnData")))
            .and_then(|trn| trn.children.iter().find(|c| c.name.ends_with("name")))
            .map(|e| e.text().to_string());

        Ok(PollMessage {
            id: msg_q.attr("id").unwrap_or("").to_string(),
            count,
            queued_at: Timestamp::parse(msg_q.child_text("qDate"))?,
            body: msg_q.child_text("msg").to_string(),
            object_name,
        })
    }
}

pub(crate) fn build_poll(cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.empty("poll", &[("op", "req")]);
    })
}

pub(crate) fn build_ack(id: &str, cl_trid: &str) -> Vec<u8> {
    crate::command::build(&[], cl_trid, |w| {
        w.empty("poll", &[("op", "ack"), ("msgID", id)]);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_with_object_name() {
        let doc = br#"<response>
            <msgQ count="1" id="cabd78dd-a0b0-4fe1-b4d0-abd300229250">
                <qDate>2020-06-07T02:05:52</qDate>
                <msg>Contact created</msg>
            </msgQ>
            <resData>
                <obj:trnData>
                    <obj:name>C574767</obj:name>
                </obj:trnData>
            </resData>
        </response>"#;
        let el = crate::xml::parse(doc).unwrap();
        let msg = PollMessage::from_elements(el.child("msgQ").unwrap(), el.child("resData")).unwrap();
        assert_eq!(msg.id, "cabd78dd-a0b0-4fe1-b4d0-abd300229250");
        assert_eq!(msg.object_name.as_deref(), Some("C574767"));
    }
}
