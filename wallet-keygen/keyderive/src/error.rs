use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("hash computation failed: {0}")]
    HashFailure(String),

    #[error("key expansion failed: {0}")]
    KeyExpansionFailure(String),
}

impl DeriveError {
    /// Whether the error is a caller mistake that no retry with the same
    /// input can fix.
    pub fn is_permanent(&self) -> bool {
        matches!(self, DeriveError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, DeriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_is_permanent() {
        assert!(DeriveError::InvalidArgument("secret is empty").is_permanent());
        assert!(!DeriveError::KeyExpansionFailure("bad seed".into()).is_permanent());
    }

    #[test]
    fn test_display() {
        let err = DeriveError::InvalidArgument("subject is empty");
        assert_eq!(err.to_string(), "invalid argument: subject is empty");
    }
}
