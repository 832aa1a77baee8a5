//! Result and error types for uiverify.

use thiserror::Error;

/// Result type for uiverify operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that can occur while running a scenario
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Target unreachable or page did not respond
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Zero or ambiguous match for a label/role/name query
    #[error("Element not found: {query} ({matches} matches)")]
    ElementNotFound {
        /// Human-readable query description
        query: String,
        /// Number of candidates that matched
        matches: usize,
    },

    /// Expected text never became visible within the bound
    #[error("Timed out after {timeout_ms}ms waiting for text {text:?} to be visible")]
    AssertionTimeout {
        /// Text that was expected
        text: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// Page script evaluation error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Screenshot capture error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// A `{name}` placeholder referenced an undeclared variable
    #[error("Unknown variable: {name}")]
    UnknownVariable {
        /// Variable name
        name: String,
    },

    /// Scenario definition is invalid
    #[error("Invalid scenario: {message}")]
    Scenario {
        /// Error message
        message: String,
    },

    /// Operation unavailable in this build
    #[error("Not supported: {message}")]
    NotSupported {
        /// Error message
        message: String,
    },

    /// A step failed; wraps the underlying error with the step identity
    #[error("Step {index} ({step}) failed: {source}")]
    StepFailed {
        /// 1-based step index
        index: usize,
        /// Step description
        step: String,
        /// Underlying error
        #[source]
        source: Box<VerifyError>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VerifyError {
    /// Create a scenario validation error
    #[must_use]
    pub fn scenario(message: impl Into<String>) -> Self {
        Self::Scenario {
            message: message.into(),
        }
    }

    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// The innermost error, looking through `StepFailed`
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// 1-based index of the failing step, if this error came from a step
    #[must_use]
    pub const fn step_index(&self) -> Option<usize> {
        match self {
            Self::StepFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}
