use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RunbenchError;

/// Subsystem-owned configuration document.
///
/// The `kind` field names the concrete configuration type; every other field
/// belongs to that type and is carried through serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub kind: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Configuration for the executor that runs workflow tasks
pub type ExecutorConfig = ComponentConfig;

/// Configuration for the workflow being benchmarked
pub type WorkflowConfig = ComponentConfig;

impl ComponentConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: Map::new(),
        }
    }

    /// Builder-style option setter
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Check the discriminator; `field` names this component in error messages
    pub fn validate_as(&self, field: &str) -> Result<(), RunbenchError> {
        if self.kind.trim().is_empty() {
            return Err(RunbenchError::validation(
                format!("{}.kind", field),
                "must name the configuration type",
            ));
        }
        Ok(())
    }
}
