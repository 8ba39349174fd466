//! # xmi-stations
//!
//! Extracts the instance specifications of a UML class (by default
//! `Station`) from an XMI model and serializes them as JSON records.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline     → Stage orchestration, typed outcomes
//!   ↓
//! interchange  → XMI tree, UML lookups, record building, JSON output
//!   ↓
//! config       → Run configuration (paths, target class)
//! ```

/// Run configuration: input/output paths and the target class.
pub mod config;

/// XMI reading, UML cross-reference resolution and JSON serialization.
pub mod interchange;

/// End-to-end extraction run.
pub mod pipeline;

pub use config::ExtractConfig;
pub use interchange::{
    AttributeIndex, AttributeValue, ClassSelector, ExtractError, LocatedClass, NO_VALUE,
    StationRecord, XmiDocument, XmlElement, build_records, build_records_with_index,
    find_instances, list_owned_attributes, locate_class, to_json_string, write_json,
};
pub use pipeline::{Outcome, run};
