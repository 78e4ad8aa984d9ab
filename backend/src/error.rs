//! Error types for instance generation.
//!
//! Every fallible operation in the crate reports a [`GeneratorError`] carrying a
//! structured [`ErrorContext`] so logs show where a run stopped.

use std::fmt;

/// Result type for generation operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Structured context for generator errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "assemble", "fetch_candidates")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "channel", "program", "config")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether this error is retryable
    pub retryable: bool,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Mark this error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.entity.is_none()
            && self.entity_id.is_none()
            && self.details.is_none()
            && !self.retryable
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for instance generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Bounds, ranges or settings that the engine cannot work with.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Candidate acquisition failed (transport, status or malformed body).
    #[error("Acquisition error: {message} {context}")]
    Acquisition {
        message: String,
        context: ErrorContext,
    },

    /// An assembled instance broke one of its structural invariants.
    #[error("Validation error: {message} {context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// Writing the instance or the debug dump failed.
    #[error("Output error: {message} {context}")]
    Output {
        message: String,
        context: ErrorContext,
    },
}

impl GeneratorError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Configuration {
            message: message.into(),
            context,
        }
    }

    pub fn acquisition_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Acquisition {
            message: message.into(),
            context,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Validation {
            message: message.into(),
            context,
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn output_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Output {
            message: message.into(),
            context,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Configuration { context, .. }
            | Self::Acquisition { context, .. }
            | Self::Validation { context, .. }
            | Self::Output { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::Configuration { context, .. }
            | Self::Acquisition { context, .. }
            | Self::Validation { context, .. }
            | Self::Output { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        GeneratorError::output_with_context(
            err.to_string(),
            ErrorContext::default().with_details(format!("io_error_kind={:?}", err.kind())),
        )
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        GeneratorError::output(format!("Serialization error: {}", err))
    }
}

#[cfg(feature = "youtube-source")]
impl From<reqwest::Error> for GeneratorError {
    fn from(err: reqwest::Error) -> Self {
        let mut context = ErrorContext::default();
        if let Some(status) = err.status() {
            context = context.with_details(format!("status={}", status));
        }
        // Timeouts and connection drops are transient; decode errors are not.
        if err.is_timeout() || err.is_connect() {
            context = context.retryable();
        }
        GeneratorError::Acquisition {
            message: err.to_string(),
            context,
        }
    }
}
