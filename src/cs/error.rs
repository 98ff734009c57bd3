use thiserror::Error;

/// Errors raised when a selection or harness call is made with inputs that
/// break its preconditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot select from an empty collection")]
    EmptyCollection,

    #[error("rank {k} is out of bounds for a collection of {len} elements")]
    RankOutOfBounds { k: usize, len: usize },

    #[error("collection contains a value that is not comparable with itself")]
    IncomparableValue,

    #[error("pivot chooser returned a value that is not in the collection")]
    ForeignPivot,

    #[error("cannot draw {len} distinct values from a range of {range}")]
    InsufficientRange { len: usize, range: i64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::RankOutOfBounds { k: 7, len: 6 };
        assert_eq!(
            err.to_string(),
            "rank 7 is out of bounds for a collection of 6 elements"
        );

        let err = Error::InsufficientRange { len: 10, range: 5 };
        assert_eq!(
            err.to_string(),
            "cannot draw 10 distinct values from a range of 5"
        );
    }
}
