//! Configuration for an extraction run.
//!
//! The core functions take explicit arguments; this struct only groups
//! them for the pipeline and the command line entry point.

use std::path::PathBuf;

/// Default XMI model read when no input is given.
pub const DEFAULT_INPUT: &str = "UPS1.xmi";

/// Default JSON file written when no output is given.
pub const DEFAULT_OUTPUT: &str = "station_details.json";

/// Default UML class whose instances are extracted.
pub const DEFAULT_CLASS: &str = "Station";

/// Paths and target class for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// XMI file to read.
    pub input: PathBuf,
    /// JSON file to write.
    pub output: PathBuf,
    /// Name of the `uml:Class` to extract instances of.
    pub class_name: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            class_name: DEFAULT_CLASS.to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Target a different class name.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}
