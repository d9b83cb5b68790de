use serde::Serialize;
use std::collections::HashMap;

/// Field-keyed validation messages, rendered verbatim in 422 responses.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationError(HashMap<String, Vec<String>>);

impl ValidationError {
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationError::default();
        errors.add_error(field, message);
        errors
    }

    pub fn merge(&mut self, other: ValidationError) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Turns accumulated errors into an `Err`, or `Ok` if nothing was added.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merging_appends_per_field() {
        let mut errors = ValidationError::single("text", "must not be empty");
        errors.merge(ValidationError::single("text", "too long"));
        errors.merge(ValidationError::single("group", "unknown group"));

        let rendered = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            rendered["text"],
            serde_json::json!(["must not be empty", "too long"])
        );
        assert_eq!(rendered["group"], serde_json::json!(["unknown group"]));
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(ValidationError::default().into_result().is_ok());
        assert!(
            ValidationError::single("handle", "taken")
                .into_result()
                .is_err()
        );
    }
}
