//! SLHA-like `LilithResults` block.
//!
//! Layout, one entry per line:
//!
//! ```text
//! BLOCK         LilithResults
//!   0           <-2*LogL>           # -2*LogL
//!   1           <exp_ndf>                # exp_ndf
//! ```

use std::path::Path;

use lilith_core::errors::{ErrorInfo, LilithError};
use lilith_core::{expected_ndf, format_number, AnalysisResult, GlobalResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

use crate::config::OutputConfig;
use crate::sink::{write_document, WriteReceipt};

/// First line of every results block.
pub const BLOCK_HEADER: &str = "BLOCK         LilithResults";

/// Rounds half away from zero to `decimals` places.
///
/// Values too large to scale are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Survival probability of a chi-squared distribution with `ndf` degrees of
/// freedom at `l - l_ref`.
pub fn chi2_pvalue(l: f64, l_ref: f64, ndf: u32) -> Result<f64, LilithError> {
    let dist = ChiSquared::new(f64::from(ndf)).map_err(|err| {
        LilithError::Stats(
            ErrorInfo::new("lilith.chi2", err.to_string()).with_context("ndf", ndf.to_string()),
        )
    })?;
    let delta = l - l_ref;
    if delta <= 0.0 {
        return Ok(1.0);
    }
    Ok(1.0 - dist.cdf(delta))
}

fn require_l_ref(global: &GlobalResult) -> Result<f64, LilithError> {
    global
        .l_ref
        .ok_or_else(|| LilithError::missing_key("global result", "l_ref"))
}

fn rounded(value: f64, config: &OutputConfig) -> String {
    format_number(round_to(value, config.slha_decimals))
}

/// Renders the three-line block: likelihood, expected ndf, reference likelihood.
pub fn render_results_slha(
    results: &[AnalysisResult],
    global: &GlobalResult,
    config: &OutputConfig,
) -> Result<String, LilithError> {
    config.validate()?;
    let l_ref = require_l_ref(global)?;
    let exp_ndf = expected_ndf(results);
    debug!(exp_ndf, "rendering SLHA results block");

    let mut out = String::new();
    out.push_str(&format!("{BLOCK_HEADER}\n"));
    out.push_str(&format!(
        "  0           {}           # -2*LogL\n",
        rounded(global.l, config)
    ));
    out.push_str(&format!("  1           {exp_ndf}                # exp_ndf\n"));
    out.push_str(&format!(
        "  2           {}           # -2*LogL_SM\n",
        rounded(l_ref, config)
    ));
    Ok(out)
}

/// Renders the six-line block including the fit p-value and database version.
pub fn render_results_slha_pvalue(
    results: &[AnalysisResult],
    global: &GlobalResult,
    config: &OutputConfig,
) -> Result<String, LilithError> {
    config.validate()?;
    let l_ref = require_l_ref(global)?;
    let ndf = global
        .fit_ndf
        .ok_or_else(|| LilithError::missing_key("global result", "fit_ndf"))?;
    if ndf == 0 {
        return Err(LilithError::Validation(
            ErrorInfo::new("lilith.fit_ndf", "fit degrees of freedom must be positive")
                .with_hint("count the parameters profiled in the fit"),
        ));
    }
    let dbversion = global
        .dbversion
        .as_deref()
        .ok_or_else(|| LilithError::missing_key("global result", "dbversion"))?;
    let pvalue = chi2_pvalue(global.l, l_ref, ndf)?;
    let exp_ndf = expected_ndf(results);
    debug!(exp_ndf, ndf, pvalue, "rendering SLHA results block with p-value");

    let mut out = String::new();
    out.push_str(&format!("{BLOCK_HEADER}\n"));
    out.push_str(&format!(
        "  0           {}           # -2*LogL\n",
        rounded(global.l, config)
    ));
    out.push_str(&format!("  1           {exp_ndf}                # exp_ndf\n"));
    out.push_str(&format!(
        "  2           {}           # -2*LogL_ref\n",
        rounded(l_ref, config)
    ));
    out.push_str(&format!("  3           {ndf}                 # fit_ndf\n"));
    out.push_str(&format!(
        "  4           {}            # pvalue\n",
        rounded(pvalue, config)
    ));
    out.push_str(&format!("  5           {dbversion}            # database version\n"));
    Ok(out)
}

/// Validates, renders and writes the three-line block to `path`.
pub fn write_results_slha(
    results: &[AnalysisResult],
    global: &GlobalResult,
    config: &OutputConfig,
    path: &Path,
) -> Result<WriteReceipt, LilithError> {
    let block = render_results_slha(results, global, config)?;
    write_document(path, &block)
}

/// Validates, renders and writes the six-line p-value block to `path`.
pub fn write_results_slha_pvalue(
    results: &[AnalysisResult],
    global: &GlobalResult,
    config: &OutputConfig,
    path: &Path,
) -> Result<WriteReceipt, LilithError> {
    let block = render_results_slha_pvalue(results, global, config)?;
    write_document(path, &block)
}
