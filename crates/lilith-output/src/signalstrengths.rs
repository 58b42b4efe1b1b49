use std::path::Path;

use lilith_core::errors::LilithError;
use lilith_core::{
    canonical_channels, format_number, ChannelKey, ParamValue, SignalStrengthEntry,
    SignalStrengths, ToolVersions,
};
use tracing::debug;

use crate::config::OutputConfig;
use crate::sink::{write_document, WriteReceipt};
use crate::xml::{input_document, Element};

const SECTION: &str = "signal strength";

/// Channel values of one entry, in canonical order.
fn resolve(entry: &SignalStrengthEntry) -> Result<Vec<(ChannelKey, f64)>, LilithError> {
    canonical_channels()
        .map(|(prod, decay)| {
            let key = ChannelKey::new(prod, decay);
            match entry.get(prod, decay) {
                Some(value) => Ok((key, value)),
                None => Err(LilithError::missing_key(SECTION, key.to_string())),
            }
        })
        .collect()
}

fn resolve_mass(entry: &SignalStrengthEntry) -> Result<&ParamValue, LilithError> {
    entry
        .extra
        .get("mass")
        .ok_or_else(|| LilithError::missing_key(SECTION, "mass"))
}

fn channel_element(key: &ChannelKey, value: f64) -> Element {
    let tag = if key.is_invisible() { "redxsBR" } else { "mu" };
    Element::leaf(tag, format_number(value))
        .attr("prod", &key.prod)
        .attr("decay", &key.decay)
}

fn strengths_block(
    part: Option<String>,
    mass: Option<&ParamValue>,
    channels: &[(ChannelKey, f64)],
) -> Element {
    let mut block = Element::new("signalstrengths").attr_opt("part", part);
    if let Some(mass) = mass {
        block.push(Element::leaf("mass", mass));
    }
    for (key, value) in channels {
        block.push(channel_element(key, *value));
    }
    block
}

/// Renders signal strengths as a Lilith input document.
///
/// Per-particle entries each need all 90 channels and a mass; the total
/// entry needs all 90 channels and is written as `part="total"` without a mass.
pub fn render_signal_strengths(
    mu: &SignalStrengths,
    versions: &ToolVersions,
    config: &OutputConfig,
) -> Result<String, LilithError> {
    let blocks = match mu {
        SignalStrengths::PerParticle(entries) => {
            let mut resolved = Vec::with_capacity(entries.len());
            for (idx, entry) in entries.iter().enumerate() {
                let channels = resolve(entry).map_err(|err| err.at_entry(idx))?;
                let mass = resolve_mass(entry).map_err(|err| err.at_entry(idx))?;
                resolved.push((entry.name(), mass, channels));
            }
            debug!(entries = resolved.len(), "per-particle signal strengths validated");
            resolved
                .into_iter()
                .map(|(part, mass, channels)| strengths_block(part, Some(mass), &channels))
                .collect()
        }
        SignalStrengths::Total(entry) => {
            let channels = resolve(entry)?;
            debug!("total signal strengths validated");
            vec![strengths_block(Some("total".to_string()), None, &channels)]
        }
    };
    Ok(input_document(versions, blocks).render(config))
}

/// Validates, renders and writes signal strengths to `path`.
pub fn write_signal_strengths(
    mu: &SignalStrengths,
    versions: &ToolVersions,
    config: &OutputConfig,
    path: &Path,
) -> Result<WriteReceipt, LilithError> {
    let document = render_signal_strengths(mu, versions, config)?;
    write_document(path, &document)
}
