use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dictionary: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Dictionary not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid XML attribute: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed dictionary: {0}")]
    Malformed(String),
}

/// Reasons the statistical backend could not be prepared
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("statistical model disabled by configuration")]
    Disabled,

    #[error("no model path or URL configured")]
    NotConfigured,

    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("model server returned {0}")]
    Http(reqwest::StatusCode),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid model: {0}")]
    Format(#[from] serde_json::Error),

    #[error("model has no lexicon")]
    Empty,
}
