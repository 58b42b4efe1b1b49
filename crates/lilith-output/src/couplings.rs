use std::path::Path;

use lilith_core::errors::LilithError;
use lilith_core::{CouplingSet, ParamValue, ToolVersions, COUPLING_EXTRA_KEYS, COUPLING_KEYS};
use tracing::debug;

use crate::config::OutputConfig;
use crate::sink::{write_document, WriteReceipt};
use crate::xml::{input_document, Element};

const SECTION: &str = "reduced couplings";

/// Coupling set with every required key resolved.
struct ReducedCouplings<'a> {
    part: Option<String>,
    couplings: Vec<&'a ParamValue>,
    br_invisible: &'a ParamValue,
    br_undetected: &'a ParamValue,
    precision: &'a ParamValue,
    mass: &'a ParamValue,
}

fn resolve(set: &CouplingSet) -> Result<ReducedCouplings<'_>, LilithError> {
    let couplings = COUPLING_KEYS
        .iter()
        .map(|key| {
            set.couplings
                .get(*key)
                .ok_or_else(|| LilithError::missing_key(SECTION, *key))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let extra = COUPLING_EXTRA_KEYS
        .iter()
        .map(|key| {
            set.extra
                .get(*key)
                .ok_or_else(|| LilithError::missing_key(SECTION, *key))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ReducedCouplings {
        part: set.name(),
        couplings,
        br_invisible: extra[0],
        br_undetected: extra[1],
        precision: extra[2],
        mass: extra[3],
    })
}

// `gg` appears twice, once for the decay and once for LHC production.
fn coupling_element(key: &str, value: &ParamValue) -> Element {
    match key {
        "gg_decay" => Element::leaf("C", value).attr("to", "gg").attr("for", "decay"),
        "gg_prod_lhc8" => Element::leaf("C", value).attr("to", "gg").attr("for", "prod"),
        other => Element::leaf("C", value).attr("to", other),
    }
}

fn couplings_block(reduced: &ReducedCouplings<'_>) -> Element {
    let mut block = Element::new("reducedcouplings")
        .attr_opt("part", reduced.part.as_deref())
        .child(Element::leaf("mass", reduced.mass));
    for (key, value) in COUPLING_KEYS.iter().zip(reduced.couplings.iter()) {
        block.push(coupling_element(key, value));
    }
    block
        .child(
            Element::new("extraBR")
                .child(Element::leaf("BR", reduced.br_invisible).attr("type", "invisible"))
                .child(Element::leaf("BR", reduced.br_undetected).attr("type", "undetected")),
        )
        .child(Element::leaf("precision", reduced.precision))
}

/// Renders reduced couplings as a Lilith input document.
///
/// Every entry is checked for the twelve couplings and the four `extra` keys
/// before anything is rendered.
pub fn render_couplings(
    entries: &[CouplingSet],
    versions: &ToolVersions,
    config: &OutputConfig,
) -> Result<String, LilithError> {
    if entries.is_empty() {
        return Err(LilithError::validation(
            "lilith.no_couplings",
            "there are no couplings",
        ));
    }
    let reduced = entries
        .iter()
        .enumerate()
        .map(|(idx, set)| resolve(set).map_err(|err| err.at_entry(idx)))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(entries = reduced.len(), "reduced couplings validated");
    let blocks = reduced.iter().map(couplings_block).collect();
    Ok(input_document(versions, blocks).render(config))
}

/// Validates, renders and writes reduced couplings to `path`.
pub fn write_couplings(
    entries: &[CouplingSet],
    versions: &ToolVersions,
    config: &OutputConfig,
    path: &Path,
) -> Result<WriteReceipt, LilithError> {
    let document = render_couplings(entries, versions, config)?;
    write_document(path, &document)
}
