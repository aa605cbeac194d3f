//! Compilation settings consumed by the type-check entry point.

use serde::{Deserialize, Serialize};

/// Options that change what the semantic core reports.
///
/// Deserialized from camelCase JSON; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilationSettings {
    /// Report declarations and expressions whose type silently became `any`.
    pub no_implicit_any: bool,
}

impl CompilationSettings {
    /// Parse settings from a JSON object such as `{"noImplicitAny": true}`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_no_implicit_any(mut self, enabled: bool) -> Self {
        self.no_implicit_any = enabled;
        self
    }
}
