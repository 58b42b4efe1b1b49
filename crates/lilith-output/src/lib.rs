//! XML and SLHA-like writers for Lilith hypotheses and likelihood results.
//!
//! Every writer validates its input, renders the complete document in memory
//! and only then touches the filesystem, so a rejected input never leaves a
//! file behind.

use std::path::Path;

use lilith_core::errors::LilithError;
use lilith_core::{AnalysisResult, CouplingSet, GlobalResult, SignalStrengths, ToolVersions};

pub mod config;
pub mod couplings;
pub mod results;
pub mod signalstrengths;
pub mod sink;
pub mod slha;
pub mod xml;

pub use config::OutputConfig;
pub use couplings::{render_couplings, write_couplings};
pub use results::{render_results_xml, write_results_xml};
pub use signalstrengths::{render_signal_strengths, write_signal_strengths};
pub use sink::{content_digest, WriteReceipt};
pub use slha::{
    chi2_pvalue, render_results_slha, render_results_slha_pvalue, write_results_slha,
    write_results_slha_pvalue, BLOCK_HEADER,
};

/// Bundles version strings and formatting options for repeated writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultWriter {
    versions: ToolVersions,
    config: OutputConfig,
}

impl ResultWriter {
    /// Creates a writer using the default output format.
    pub fn new(versions: ToolVersions) -> Self {
        Self {
            versions,
            config: OutputConfig::default(),
        }
    }

    /// Replaces the formatting options.
    pub fn with_config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    /// Version strings printed into documents.
    pub fn versions(&self) -> &ToolVersions {
        &self.versions
    }

    /// Formatting options.
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Writes reduced couplings as a Lilith input file.
    pub fn couplings(
        &self,
        entries: &[CouplingSet],
        path: impl AsRef<Path>,
    ) -> Result<WriteReceipt, LilithError> {
        write_couplings(entries, &self.versions, &self.config, path.as_ref())
    }

    /// Writes per-particle or total signal strengths as a Lilith input file.
    pub fn signal_strengths(
        &self,
        mu: &SignalStrengths,
        path: impl AsRef<Path>,
    ) -> Result<WriteReceipt, LilithError> {
        write_signal_strengths(mu, &self.versions, &self.config, path.as_ref())
    }

    /// Writes the XML results report.
    pub fn results_xml(
        &self,
        results: &[AnalysisResult],
        l: f64,
        path: impl AsRef<Path>,
    ) -> Result<WriteReceipt, LilithError> {
        write_results_xml(results, l, &self.versions, &self.config, path.as_ref())
    }

    /// Writes the three-line SLHA-like results block.
    pub fn results_slha(
        &self,
        results: &[AnalysisResult],
        global: &GlobalResult,
        path: impl AsRef<Path>,
    ) -> Result<WriteReceipt, LilithError> {
        write_results_slha(results, global, &self.config, path.as_ref())
    }

    /// Writes the six-line SLHA-like block with the fit p-value.
    ///
    /// The database version falls back to the writer's own when `global`
    /// does not carry one.
    pub fn results_slha_pvalue(
        &self,
        results: &[AnalysisResult],
        global: &GlobalResult,
        path: impl AsRef<Path>,
    ) -> Result<WriteReceipt, LilithError> {
        if global.dbversion.is_some() {
            return write_results_slha_pvalue(results, global, &self.config, path.as_ref());
        }
        let global = GlobalResult {
            dbversion: Some(self.versions.dbversion.clone()),
            ..global.clone()
        };
        write_results_slha_pvalue(results, &global, &self.config, path.as_ref())
    }
}
