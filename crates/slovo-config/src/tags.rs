use serde::{Deserialize, Serialize};

/// Optional JSON files (`{"TAG": "Label"}`) extending the built-in tag tables
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TagsConfig {
    pub dictionary_overrides: Option<String>,
    pub statistical_overrides: Option<String>,
}
