use std::path::Path;

use lilith_core::errors::{ErrorInfo, LilithError};
use lilith_core::{expected_ndf, format_number, AnalysisResult, ChannelKey, ToolVersions};
use tracing::debug;

use crate::config::OutputConfig;
use crate::sink::{write_document, WriteReceipt};
use crate::xml::{Document, Element};

fn result_error(idx: usize, result: &AnalysisResult, code: &str, message: &str) -> LilithError {
    LilithError::Validation(
        ErrorInfo::new(code, message)
            .with_context("entry", idx.to_string())
            .with_context("experiment", result.experiment.as_str())
            .with_context("source", result.source.as_str()),
    )
}

fn validate(results: &[AnalysisResult]) -> Result<(), LilithError> {
    for (idx, result) in results.iter().enumerate() {
        if result.dim != 1 && result.dim != 2 {
            return Err(result_error(
                idx,
                result,
                "lilith.result_dim",
                "analysis dimension must be 1 or 2",
            ));
        }
        if result.eff.x.is_empty() {
            return Err(result_error(
                idx,
                result,
                "lilith.result_axis",
                "analysis has no x-axis efficiencies",
            ));
        }
    }
    Ok(())
}

fn prod_eff(key: &ChannelKey, value: f64) -> Element {
    Element::leaf("eff", format_number(value)).attr("prod", &key.prod)
}

fn axis_eff(axis: &str, key: &ChannelKey, value: f64) -> Element {
    Element::leaf("eff", format_number(value))
        .attr("axis", axis)
        .attr("prod", &key.prod)
}

fn expmu_element(result: &AnalysisResult) -> Element {
    let x = &result.eff.x;
    // x is validated non-empty
    let first_decay = x
        .keys()
        .next()
        .map(|key| key.decay.as_str())
        .unwrap_or_default();
    let tagged = |decay: &str| {
        Element::new("expmu")
            .attr("decay", decay)
            .attr("dim", result.dim)
            .attr("type", &result.measurement_type)
    };

    if result.dim == 2 {
        let mut expmu = tagged(first_decay);
        for (key, value) in x {
            expmu.push(axis_eff("x", key, *value));
        }
        for (key, value) in result.eff.y.iter().flatten() {
            expmu.push(axis_eff("y", key, *value));
        }
        return expmu;
    }

    if x.keys().all(|key| key.decay == first_decay) {
        let mut expmu = tagged(first_decay);
        for (key, value) in x {
            expmu.push(prod_eff(key, *value));
        }
        expmu
    } else {
        let mut expmu = Element::new("expmu")
            .attr("dim", result.dim)
            .attr("type", &result.measurement_type);
        for (key, value) in x {
            expmu.push(prod_eff(key, *value).attr("decay", &key.decay));
        }
        expmu
    }
}

fn analysis_element(result: &AnalysisResult) -> Element {
    Element::new("analysis")
        .attr("experiment", &result.experiment)
        .attr("source", &result.source)
        .child(expmu_element(result))
        .child(Element::leaf("l", format_number(result.l)))
}

/// Renders the XML report of a likelihood evaluation.
///
/// Analyses appear in input order; `exp_ndf` is the sum of their dimensions.
/// The report starts directly with `<lilithresults>`, without an XML
/// declaration.
pub fn render_results_xml(
    results: &[AnalysisResult],
    l: f64,
    versions: &ToolVersions,
    config: &OutputConfig,
) -> Result<String, LilithError> {
    validate(results)?;
    let exp_ndf = expected_ndf(results);
    debug!(analyses = results.len(), exp_ndf, "analysis results validated");

    let mut root = Element::new("lilithresults")
        .child(Element::leaf("lilithversion", &versions.lilith))
        .child(Element::leaf("dbversion", &versions.dbversion));
    for result in results {
        root.push(analysis_element(result));
    }
    let root = root
        .child(Element::leaf("ltot", format_number(l)))
        .child(Element::leaf("exp_ndf", exp_ndf));
    Ok(Document::new(root).without_declaration().render(config))
}

/// Validates, renders and writes the XML results report to `path`.
pub fn write_results_xml(
    results: &[AnalysisResult],
    l: f64,
    versions: &ToolVersions,
    config: &OutputConfig,
    path: &Path,
) -> Result<WriteReceipt, LilithError> {
    let document = render_results_xml(results, l, versions, config)?;
    write_document(path, &document)
}
