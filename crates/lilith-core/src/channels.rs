//! Canonical key tables for reduced couplings and signal strengths.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LilithError};

/// Reduced-coupling keys every coupling set must define, in output order.
pub const COUPLING_KEYS: [&str; 12] = [
    "tt",
    "bb",
    "tautau",
    "cc",
    "mumu",
    "WW",
    "ZZ",
    "VBF",
    "gammagamma",
    "Zgamma",
    "gg_decay",
    "gg_prod_lhc8",
];

/// Keys required in the `extra` section of a coupling set.
pub const COUPLING_EXTRA_KEYS: [&str; 4] = ["BRinvisible", "BRundetected", "precision", "mass"];

/// Production modes in canonical order.
pub const PRODUCTION_MODES: [&str; 9] = [
    "ggH", "VBF", "WH", "qqZH", "ggZH", "ttH", "tHq", "tHW", "bbH",
];

/// Decay modes in canonical order.
pub const DECAY_MODES: [&str; 10] = [
    "bb",
    "tautau",
    "cc",
    "mumu",
    "WW",
    "ZZ",
    "Zgamma",
    "gammagamma",
    "gg",
    "invisible",
];

/// Decay mode reported as a reduced cross section times branching ratio.
pub const INVISIBLE_DECAY: &str = "invisible";

/// Number of (production, decay) channels a signal-strength entry must cover.
pub const CHANNEL_COUNT: usize = PRODUCTION_MODES.len() * DECAY_MODES.len();

/// Iterates over all (production, decay) pairs, production-major.
pub fn canonical_channels() -> impl Iterator<Item = (&'static str, &'static str)> {
    PRODUCTION_MODES
        .iter()
        .flat_map(|prod| DECAY_MODES.iter().map(move |decay| (*prod, *decay)))
}

/// A (production, decay) pair. Serialized as `prod:decay`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelKey {
    /// Production mode, e.g. `ggH`.
    pub prod: String,
    /// Decay mode, e.g. `gammagamma`.
    pub decay: String,
}

impl ChannelKey {
    /// Creates a key from its two components.
    pub fn new(prod: impl Into<String>, decay: impl Into<String>) -> Self {
        Self {
            prod: prod.into(),
            decay: decay.into(),
        }
    }

    /// Whether the decay mode is the invisible final state.
    pub fn is_invisible(&self) -> bool {
        self.decay == INVISIBLE_DECAY
    }
}

impl Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prod, self.decay)
    }
}

impl FromStr for ChannelKey {
    type Err = LilithError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once(':') {
            Some((prod, decay)) if !prod.is_empty() && !decay.is_empty() => {
                Ok(ChannelKey::new(prod, decay))
            }
            _ => Err(LilithError::Serde(
                ErrorInfo::new("lilith.channel_key", "channel key must read `prod:decay`")
                    .with_context("raw", raw),
            )),
        }
    }
}

impl TryFrom<String> for ChannelKey {
    type Error = LilithError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<ChannelKey> for String {
    fn from(key: ChannelKey) -> Self {
        key.to_string()
    }
}
