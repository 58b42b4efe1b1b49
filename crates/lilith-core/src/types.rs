use std::collections::BTreeMap;
use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::channels::{canonical_channels, ChannelKey, COUPLING_KEYS, INVISIBLE_DECAY};

/// Precision label used by the Standard Model coupling hypothesis.
pub const DEFAULT_PRECISION: &str = "BEST-QCD";

/// Numeric or textual hypothesis value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Floating point value.
    Number(f64),
    /// Free text, e.g. a precision label or particle name.
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(value) => f.write_str(&format_number(*value)),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}

/// Shortest round-trip text for `value`, always showing a fraction or exponent.
///
/// Scientific notation is used below `1e-4` and from `1e16` on. Exponents
/// carry no sign or zero padding (`1e-5`, `1e16`), so the text is not
/// byte-identical to `%g`-style output such as `1e-05` or `1e+16`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value:?}")
    }
}

/// Free-form `extra` section attached to hypotheses.
pub type Extra = BTreeMap<String, ParamValue>;

fn extra_name(extra: &Extra) -> Option<String> {
    extra.get("name").map(ToString::to_string)
}

/// Reduced couplings of one scalar particle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CouplingSet {
    /// Coupling values keyed by channel name (`tt`, `gg_decay`, ...).
    #[serde(flatten)]
    pub couplings: BTreeMap<String, ParamValue>,
    /// Branching ratios, precision, mass and optional particle name.
    #[serde(default)]
    pub extra: Extra,
}

impl CouplingSet {
    /// Standard Model hypothesis: every reduced coupling at one, no exotic decays.
    pub fn standard_model(mass: f64) -> Self {
        let couplings = COUPLING_KEYS
            .iter()
            .map(|key| (key.to_string(), ParamValue::Number(1.0)))
            .collect();
        let mut extra = Extra::new();
        extra.insert("BRinvisible".into(), ParamValue::Number(0.0));
        extra.insert("BRundetected".into(), ParamValue::Number(0.0));
        extra.insert("precision".into(), ParamValue::from(DEFAULT_PRECISION));
        extra.insert("mass".into(), ParamValue::Number(mass));
        Self { couplings, extra }
    }

    /// Sets a coupling value, returning the updated set.
    pub fn with_coupling(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.couplings.insert(key.to_string(), value.into());
        self
    }

    /// Sets an `extra` value, returning the updated set.
    pub fn with_extra(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Particle name, when the hypothesis carries one.
    pub fn name(&self) -> Option<String> {
        extra_name(&self.extra)
    }
}

/// Signal strengths of one particle over (production, decay) channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalStrengthEntry {
    /// Ratio to the Standard Model rate per channel; `invisible` decays hold
    /// the reduced cross section times branching ratio instead.
    pub values: IndexMap<ChannelKey, f64>,
    /// Mass and optional particle name.
    #[serde(default)]
    pub extra: Extra,
}

impl SignalStrengthEntry {
    /// Fills every canonical channel with `value_for(prod, decay)`.
    pub fn from_channels<F>(mut value_for: F) -> Self
    where
        F: FnMut(&str, &str) -> f64,
    {
        let values = canonical_channels()
            .map(|(prod, decay)| (ChannelKey::new(prod, decay), value_for(prod, decay)))
            .collect();
        Self {
            values,
            extra: Extra::new(),
        }
    }

    /// Standard Model expectation: unit signal strengths, no invisible rate.
    pub fn standard_model(mass: f64) -> Self {
        Self::from_channels(|_, decay| if decay == INVISIBLE_DECAY { 0.0 } else { 1.0 })
            .with_extra("mass", mass)
    }

    /// Sets an `extra` value, returning the updated entry.
    pub fn with_extra(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Looks up the value of a (production, decay) channel.
    pub fn get(&self, prod: &str, decay: &str) -> Option<f64> {
        self.values.get(&ChannelKey::new(prod, decay)).copied()
    }

    /// Particle name, when the entry carries one.
    pub fn name(&self) -> Option<String> {
        extra_name(&self.extra)
    }
}

/// Signal strengths per particle, or the single combined "total" entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalStrengths {
    /// One entry per scalar particle.
    PerParticle(Vec<SignalStrengthEntry>),
    /// Signal strengths summed over all particles.
    Total(SignalStrengthEntry),
}

/// Insertion-ordered efficiencies keyed by channel.
pub type EffAxis = IndexMap<ChannelKey, f64>;

/// Efficiency axes of an experimental measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Efficiencies {
    /// First (or only) axis.
    pub x: EffAxis,
    /// Second axis of two-dimensional measurements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<EffAxis>,
}

/// Likelihood contribution of one experimental analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Experiment name, e.g. `ATLAS`.
    pub experiment: String,
    /// Source label of the measurement (paper or note identifier).
    pub source: String,
    /// Dimensionality of the measurement, also its degrees of freedom.
    pub dim: u32,
    /// Efficiency axes.
    pub eff: Efficiencies,
    /// Measurement type label (`n`, `f`, `vn`, ...).
    #[serde(rename = "type")]
    pub measurement_type: String,
    /// -2 log-likelihood of this analysis.
    pub l: f64,
}

/// Sum of the degrees of freedom of all analyses.
pub fn expected_ndf(results: &[AnalysisResult]) -> u32 {
    results.iter().map(|result| result.dim).sum()
}

/// Combined likelihood numbers of a full evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalResult {
    /// Combined -2 log-likelihood.
    pub l: f64,
    /// Reference (usually Standard Model) -2 log-likelihood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_ref: Option<f64>,
    /// Number of fitted parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_ndf: Option<u32>,
    /// Database version identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbversion: Option<String>,
}
