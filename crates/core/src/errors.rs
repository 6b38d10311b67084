use thiserror::Error;

/// Failures the drafting workflow can surface to the user. Validation errors
/// abort generation before any network call; nothing downstream of a passing
/// validation is allowed to fail the workflow.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("a client name is required before a quote can be generated")]
    MissingClientName,
    #[error("a job type must be selected before a quote can be generated")]
    MissingJobType,
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    /// Advisory text for the notification surface.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingClientName => "Please enter the client's name before generating a quote.",
            Self::MissingJobType => "Please choose a job type before generating a quote.",
            Self::InvariantViolation(_) => "The quote could not be assembled. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DomainError;

    #[test]
    fn validation_errors_carry_user_safe_messages() {
        assert!(DomainError::MissingClientName.user_message().contains("client's name"));
        assert!(DomainError::MissingJobType.user_message().contains("job type"));
    }
}
