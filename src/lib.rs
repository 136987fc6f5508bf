//! Legislator effectiveness scoring.
//!
//! This library classifies bills from LegiScan event logs (introduced, acted
//! in committee, passed, passed the other house, became law), attributes
//! each bill to its main sponsor using the NY Senate dataset, and scores
//! sponsors by their share of each lifecycle milestone.

pub mod bill_number;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod sponsor;
pub mod types;
pub mod vocabulary;

pub use bill_number::{standardize, BillNumber};
pub use classifier::ClassifiedBill;
pub use config::{Config, ConfigBuilder, MalformedPolicy};
pub use dataset::Datasets;
pub use error::{Error, Result};
pub use output::OutputFormat;
pub use pipeline::{AttributionSummary, EffectivenessReport, PipelineOptions};
pub use scoring::{MetricCounts, SponsorEffectiveness};
pub use sponsor::LegislatorDirectory;
pub use types::{Chamber, LegiscanBill, SenateBill};
pub use vocabulary::Vocabulary;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, MalformedPolicy};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{self, EffectivenessReport, PipelineOptions};
    pub use crate::types::{LegiscanBill, SenateBill};
    pub use crate::vocabulary::Vocabulary;
}
