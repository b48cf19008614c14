//! Request envelope assembly: every command is `<epp><command>...<clTRID/>
//! </command></epp>`, optionally with a sibling `<extension>` block after
//! `</command>` (§4.3, §4.5 `UpdateDomainExtensions`). Centralising this
//! here means individual `model::*` builders only ever write the
//! object-specific inner element, the same way each upstream
//! `registry/*.go` operation only fills in `Command.<Verb>.<Thing>` and
//! leaves `Xmlns`/`ClTRID` to a couple of shared lines.

use crate::namespaces::EPP;
use crate::xml::Writer;

/// Builds `<epp xmlns="...">` + extra root attributes + `<command>` +
/// `body` + `<clTRID>` + `</command></epp>`.
pub fn build<F>(epp_attrs: &[(&str, &str)], cl_trid: &str, body: F) -> Vec<u8>
where
    F: FnOnce(&mut Writer),
{
    build_with_extension(epp_attrs, cl_trid, body, None::<fn(&mut Writer)>)
}

/// As [`build`], but with an optional sibling `<extension>` block written
/// after `</command>`.
pub fn build_with_extension<F, G>(
    epp_attrs: &[(&str, &str)],
    cl_trid: &str,
    body: F,
    extension: Option<G>,
) -> Vec<u8>
where
    F: FnOnce(&mut Writer),
    G: FnOnce(&mut Writer),
{
    let mut w = Writer::new();
    let mut attrs = vec![("xmlns", EPP)];
    attrs.extend_from_slice(epp_attrs);
    w.start("epp", &attrs);
    w.start("command", &[]);
    body(&mut w);
    w.element("clTRID", &[], cl_trid);
    w.end("command");
    if let Some(ext) = extension {
        w.start("extension", &[]);
        ext(&mut w);
        w.end("extension");
    }
    w.end("epp");
    w.into_bytes()
}

/// `<epp xmlns="..."><hello/></epp>` — the one command with no `<command>`
/// wrapper or `clTRID` (§4.4).
pub fn build_hello() -> Vec<u8> {
    let mut w = Writer::new();
    w.start("epp", &[("xmlns", EPP)]);
    w.empty("hello", &[]);
    w.end("epp");
    w.into_bytes()
}
