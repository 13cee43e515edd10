//! `NAME` structures.

use crate::record::RawNode;
use famgraph::PersonName;

/// Build a name from a `NAME` node.
///
/// The line value is read as `Given /Surname/ Suffix`; structured `GIVN`,
/// `SURN`, `NPFX`, `NSFX` and `NICK` children take precedence over the parts
/// found in the value. `SPFX` ("van", "de") is prepended to the surname.
/// Children other than the name parts are left for the caller.
pub fn parse_name(node: &RawNode) -> PersonName {
    let mut name = node
        .text_value()
        .map(PersonName::parse_slashed)
        .unwrap_or_default();

    if let Some(given) = node.text_owned("GIVN") {
        name.given = Some(given);
    }
    if let Some(surname) = node.text("SURN") {
        name.surname = Some(match node.text("SPFX") {
            Some(prefix) => format!("{prefix} {surname}"),
            None => surname.to_string(),
        });
    }
    if let Some(prefix) = node.text_owned("NPFX") {
        name.prefix = Some(prefix);
    }
    if let Some(suffix) = node.text_owned("NSFX") {
        name.suffix = Some(suffix);
    }
    if let Some(nickname) = node.text_owned("NICK") {
        name.nickname = Some(nickname);
    }
    name.name_type = node.text_owned("TYPE");

    if name.full.is_empty() {
        name.rebuild_full();
    }
    name
}

/// Whether `tag` is one of the `NAME` children read by [`parse_name`].
pub fn is_name_part(tag: &str) -> bool {
    matches!(
        tag,
        "GIVN" | "SURN" | "SPFX" | "NPFX" | "NSFX" | "NICK" | "TYPE"
    )
}
