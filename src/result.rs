//! Result envelope and code classifier (§3 Result envelope, §7).
//!
//! Every response is a `<result code="...">` plus a human-readable
//! `<msg>`, echoing the request's `clTRID` in `<trID>`. [`classify`] turns
//! the numeric code into the taxonomy `Error` variants the rest of the
//! crate returns, mirroring the `if result.Code != 1000 { return
//! errors.New(...) }` checks repeated at the top of every upstream
//! `registry/*.go` operation.

use crate::error::{Error, Result as CrateResult};
use crate::xml::Element;

/// A parsed `<result>` element: the code plus its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEnvelope {
    pub code: u16,
    pub message: String,
}

impl ResultEnvelope {
    pub fn from_element(result: &Element) -> CrateResult<Self> {
        let code: u16 = result
            .attr("code")
            .ok_or_else(|| Error::decode_xml("result element missing code attribute", Vec::new()))?
            .parse()
            .map_err(|_| Error::decode_xml("non-numeric result code", Vec::new()))?;
        Ok(ResultEnvelope {
            code,
            message: result.child_text("msg").to_string(),
        })
    }
}

/// Transaction id pair echoed in `<trID>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionIds {
    pub client: String,
    pub server: String,
}

impl TransactionIds {
    pub fn from_element(tr_id: Option<&Element>) -> Self {
        match tr_id {
            Some(el) => TransactionIds {
                client: el.child_text("clTRID").to_string(),
                server: el.child_text("svTRID").to_string(),
            },
            None => TransactionIds::default(),
        }
    }
}

/// Maps a result code to `Ok(envelope)` for success-shaped codes (`1000`,
/// `1300`, `1301`, `1500`) or the matching `Error` variant otherwise. Poll's
/// `1300`/`1301` are handled by the poll operation itself since they are
/// not failures; this classifier is for the generic "did this command
/// succeed" codepath shared by every non-poll operation.
pub fn classify(envelope: ResultEnvelope) -> CrateResult<ResultEnvelope> {
    match envelope.code {
        1000 | 1500 => Ok(envelope),
        code if code >= 2500 => Err(Error::ServerFatal {
            code,
            message: envelope.message,
        }),
        _ => Err(Error::ServerResult {
            code: envelope.code,
            message: envelope.message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn classifies_success() {
        let doc = br#"<result code="1000"><msg>Command completed successfully</msg></result>"#;
        let el = xml::parse(doc).unwrap();
        let envelope = ResultEnvelope::from_element(&el).unwrap();
        assert!(classify(envelope).is_ok());
    }

    #[test]
    fn classifies_fatal() {
        let doc = br#"<result code="2500"><msg>Command failed</msg></result>"#;
        let el = xml::parse(doc).unwrap();
        let envelope = ResultEnvelope::from_element(&el).unwrap();
        assert!(matches!(classify(envelope), Err(Error::ServerFatal { code: 2500, .. })));
    }

    #[test]
    fn classifies_client_error() {
        let doc = br#"<result code="2200"><msg>Authentication error</msg></result>"#;
        let el = xml::parse(doc).unwrap();
        let envelope = ResultEnvelope::from_element(&el).unwrap();
        assert!(matches!(classify(envelope), Err(Error::ServerResult { code: 2200, .. })));
    }
}
