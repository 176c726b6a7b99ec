use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration, read from `~/.config/co-calc/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// data_dir: ~/exams/mst2
/// color: never
/// precision: 1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the exam setup and student records live (default: the config directory)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub color: ColorMode,

    /// Decimal places shown for percentages
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            color: ColorMode::default(),
            precision: default_precision(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}
