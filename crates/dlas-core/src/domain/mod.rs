//! Domain model: typed payloads, validation, and the error taxonomy.

pub mod error;
pub mod payload;
pub mod validation;

use serde::{Deserialize, Serialize};

/// Advisory disclaimer attached to every response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Disclaimer {
    /// Disclaimer class; always `advisory` for pipeline output.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Disclaimer {
    /// Build an advisory disclaimer with the given text.
    pub fn advisory(text: &str) -> Self {
        Self {
            kind: "advisory".to_string(),
            text: text.to_string(),
        }
    }
}
