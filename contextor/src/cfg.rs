//! Runtime configuration loaded from environment variables.

use crate::{error::ContextorError, extract::MarkerCase};

/// Config bag for the answer chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextorConfig {
    /// End-marker matching used by answer extraction.
    pub marker_case: MarkerCase,
}

impl ContextorConfig {
    /// Reads `ANSWER_END_MARKER_CASE` (`sensitive` | `insensitive`).
    ///
    /// # Errors
    /// `ContextorError::Config` for any other value.
    pub fn from_env() -> Result<Self, ContextorError> {
        let marker_case = match std::env::var("ANSWER_END_MARKER_CASE") {
            Ok(v) if !v.trim().is_empty() => v.parse().map_err(|e| {
                ContextorError::Config(format!("ANSWER_END_MARKER_CASE: {e}"))
            })?,
            _ => MarkerCase::default(),
        };
        Ok(Self { marker_case })
    }
}
