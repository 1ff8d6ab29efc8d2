use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "csv".to_string()
}

fn default_include_summary() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    /// csv, tsv, json or xlsx; used when the path has no recognizable extension
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Also write the part-of-speech summary table
    #[serde(default = "default_include_summary")]
    pub include_summary: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            include_summary: default_include_summary(),
        }
    }
}
