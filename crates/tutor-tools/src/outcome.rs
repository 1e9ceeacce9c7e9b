//! Outcome - Uniform result shape shared by every tutoring tool
//!
//! A tool never raises across its boundary. Validation and not-found
//! problems become the `Error` branch, carried as data so the calling
//! agent can read the message, pick a valid key from the listing and
//! retry.
//!
//! Wire form (internally tagged by `status`):
//!
//! ```json
//! {"status": "success", "result": 8.0}
//! {"status": "error", "result": "Element 'x' not found in the database.",
//!  "available_elements": ["argon", "..."], "suggestion": "..."}
//! ```

use serde::Serialize;

/// Two-branch result returned by every deterministic tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome<T> {
    /// The call succeeded; payload fields are flattened next to `status`
    Success(T),
    /// The call was rejected; the failure explains why and how to recover
    Error(ToolFailure),
}

/// Valid keys enumerated alongside a not-found failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Listing {
    /// Every valid element name, sorted ascending
    #[serde(rename = "available_elements")]
    Elements(Vec<String>),
    /// Every valid constant name, in table order
    #[serde(rename = "available_constants")]
    Constants(Vec<String>),
}

impl Listing {
    /// The enumerated keys
    #[must_use]
    pub fn keys(&self) -> &[String] {
        match self {
            Self::Elements(keys) | Self::Constants(keys) => keys,
        }
    }
}

/// Error branch payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    /// Human-readable reason
    #[serde(rename = "result")]
    pub message: String,
    /// Valid keys the caller may retry with
    #[serde(flatten)]
    pub listing: Option<Listing>,
    /// Hint on how to phrase the retry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ToolFailure {
    /// A failure with only a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            listing: None,
            suggestion: None,
        }
    }

    /// Attach the list of valid keys
    #[must_use]
    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    /// Attach a remediation hint
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl<T> ToolOutcome<T> {
    /// Wrap a successful payload
    #[must_use]
    pub fn success(payload: T) -> Self {
        Self::Success(payload)
    }

    /// A failure carrying only a message
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ToolFailure::new(message))
    }

    /// Whether this is the success branch
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the success payload
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Error(_) => None,
        }
    }

    /// Borrow the failure
    #[must_use]
    pub fn failure(&self) -> Option<&ToolFailure> {
        match self {
            Self::Success(_) => None,
            Self::Error(failure) => Some(failure),
        }
    }
}

impl<T: Serialize> ToolOutcome<T> {
    /// Render the wire form
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({
                "status": "error",
                "result": format!("failed to encode tool result: {e}"),
            })
        })
    }
}

impl<T> From<ToolFailure> for ToolOutcome<T> {
    fn from(failure: ToolFailure) -> Self {
        Self::Error(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Answer {
        result: f64,
    }

    #[test]
    fn test_success_is_flattened_under_status() {
        let outcome = ToolOutcome::success(Answer { result: 8.0 });
        let value = outcome.to_value();

        assert_eq!(value["status"], "success");
        assert_eq!(value["result"], 8.0);
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_plain_error_has_only_status_and_result() {
        let outcome: ToolOutcome<Answer> = ToolOutcome::error("Cannot divide by zero.");
        let value = outcome.to_value();

        assert_eq!(value["status"], "error");
        assert_eq!(value["result"], "Cannot divide by zero.");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_listing_key_follows_variant() {
        let failure = ToolFailure::new("Constant 'x' not found.")
            .with_listing(Listing::Constants(vec!["speed_of_light".to_string()]))
            .with_suggestion("use underscores");
        let outcome: ToolOutcome<Answer> = failure.into();
        let value = outcome.to_value();

        assert_eq!(value["available_constants"][0], "speed_of_light");
        assert!(value.get("available_elements").is_none());
        assert_eq!(value["suggestion"], "use underscores");
    }

    #[test]
    fn test_accessors() {
        let ok = ToolOutcome::success(Answer { result: 1.0 });
        assert!(ok.is_success());
        assert!(ok.payload().is_some());
        assert!(ok.failure().is_none());

        let err: ToolOutcome<Answer> = ToolOutcome::error("nope");
        assert!(!err.is_success());
        assert_eq!(err.failure().unwrap().message, "nope");
    }
}
