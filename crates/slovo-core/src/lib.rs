pub mod aggregate;
pub mod backend;
pub mod error;
pub mod preprocess;
pub mod selector;
pub mod session;
pub mod stats;
pub mod tags;
pub mod tokenizer;
pub mod types;

pub use error::{AnalysisError, Result};
pub use session::AnalysisSession;
