use thiserror::Error;

/// Everything that can deny a result-access check. The display strings are
/// shown to the caller as-is; the result-checker frontend matches on them,
/// so keep them stable.
#[derive(Debug, Error)]
pub enum RedeemError {
    #[error("Student ID is required.")]
    MissingStudentId,

    #[error("PIN must be exactly 12 characters.")]
    MalformedPin,

    #[error("No student found with the given Student ID.")]
    StudentNotFound,

    #[error("The PIN you entered is invalid.")]
    InvalidPin,

    #[error("This PIN is not valid for the specified Student ID.")]
    PinNotAssignedToStudent,

    #[error("This scratch card has been fully used.")]
    CardExhausted,

    /// Unexpected persistence failure. The cause is logged server-side;
    /// callers only ever see the generic message.
    #[error("Something went wrong. Please try again later.")]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_are_stable() {
        assert_eq!(
            RedeemError::CardExhausted.to_string(),
            "This scratch card has been fully used."
        );
        assert_eq!(
            RedeemError::PinNotAssignedToStudent.to_string(),
            "This PIN is not valid for the specified Student ID."
        );
        assert_eq!(
            RedeemError::Store(anyhow::anyhow!("pool timed out")).to_string(),
            "Something went wrong. Please try again later."
        );
    }
}
