use serde::Deserialize;

/// Name of the two-slot local-state initializer most component code uses.
pub const DEFAULT_STATE_INITIALIZER: &str = "useState";

/// Knobs for a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Callee name (bare or final member) that marks a state declaration.
    pub state_initializer: String,
    /// Infer a primitive category for untyped variable initializers.
    pub infer_types: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            state_initializer: DEFAULT_STATE_INITIALIZER.to_string(),
            infer_types: true,
        }
    }
}
