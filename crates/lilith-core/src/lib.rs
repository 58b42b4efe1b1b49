#![deny(missing_docs)]
#![doc = "Core data types for the Lilith output layer: hypotheses, analysis results, channel tables and errors."]

pub mod channels;
pub mod errors;
pub mod provenance;
pub mod serde;
mod types;

pub use channels::{
    canonical_channels, ChannelKey, CHANNEL_COUNT, COUPLING_EXTRA_KEYS, COUPLING_KEYS,
    DECAY_MODES, INVISIBLE_DECAY, PRODUCTION_MODES,
};
pub use errors::{ErrorInfo, IoFailure, LilithError, MISSING_KEY_CODE};
pub use provenance::{ToolVersions, UNKNOWN_DB_VERSION};
pub use types::{
    expected_ndf, format_number, AnalysisResult, CouplingSet, EffAxis, Efficiencies, Extra,
    GlobalResult, ParamValue, SignalStrengthEntry, SignalStrengths, DEFAULT_PRECISION,
};
