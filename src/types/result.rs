use serde::{Deserialize, Serialize};

/// Outcome of a typed fetch: either the decoded (and possibly converted)
/// success payload, or the raw error payload of a resolvable non-2xx status.
///
/// Serializes with a `status` tag of `SUCCESS` or `VALIDATION_ERROR`,
/// carrying `value` or `error` respectively. The error type defaults to
/// [`serde_json::Value`] for calls that cannot reach the validation arm.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedResult<T, E = serde_json::Value> {
    Success { value: T },
    ValidationError { error: E },
}

impl<T, E> ResolvedResult<T, E> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, ResolvedResult::Success { .. })
    }
    pub fn has_validation_error(&self) -> bool {
        matches!(self, ResolvedResult::ValidationError { .. })
    }
    pub fn success(&self) -> Option<&T> {
        match self {
            ResolvedResult::Success { value } => Some(value),
            ResolvedResult::ValidationError { .. } => None,
        }
    }
    pub fn validation_error(&self) -> Option<&E> {
        match self {
            ResolvedResult::Success { .. } => None,
            ResolvedResult::ValidationError { error } => Some(error),
        }
    }
    /// Maps the success payload, leaving the validation arm untouched.
    pub fn map_success<U, F: FnOnce(T) -> U>(self, map: F) -> ResolvedResult<U, E> {
        match self {
            ResolvedResult::Success { value } => ResolvedResult::Success { value: map(value) },
            ResolvedResult::ValidationError { error } => {
                ResolvedResult::ValidationError { error }
            }
        }
    }
}
