//! Error types for the widget toolkit
//!
//! Core composition and routing operations never fail: duplicate adds,
//! absent removals and events sent to hidden controls are no-ops. Errors
//! only come from the platform boundary and from theme loading.

/// Category of a reported failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A native window-system call failed
    SystemError,
    /// A referenced file could not be found
    FileNotFound,
    /// JSON could not be parsed
    JsonParse,
    /// A value was present but had the wrong shape
    InvalidValue,
}

impl ErrorKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::SystemError => "system error",
            Self::FileNotFound => "file not found",
            Self::JsonParse => "json parse error",
            Self::InvalidValue => "invalid value",
        }
    }
}

/// Boxed-up failure: kind, the component that reported it, and a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WuiError {
    pub kind: ErrorKind,
    pub component: String,
    pub message: String,
}

impl WuiError {
    pub fn new(kind: ErrorKind, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn system(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SystemError, component, message)
    }
}

impl std::fmt::Display for WuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {}: {}", self.kind.as_str(), self.component, self.message)
    }
}

impl std::error::Error for WuiError {}

/// Result type alias for fallible toolkit operations
pub type WuiResult<T> = Result<T, WuiError>;
