use std::fmt;

/// Failures of a screen transition. Everything else in navigation is either
/// an expected absence or a rejected move, neither of which is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The target has no factory, or its factory failed
    MisconfiguredTransition { name: String, reason: String },
}

impl NavError {
    pub fn misconfigured(name: impl Into<String>, reason: impl Into<String>) -> Self {
        NavError::MisconfiguredTransition {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::MisconfiguredTransition { name, reason } => {
                write!(f, "Cannot navigate to '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for NavError {}
