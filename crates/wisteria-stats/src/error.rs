/// Broad classification of a [`StatsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsErrorKind {
    /// The input did not satisfy a precondition (too few observations, bad range).
    InvalidArgument,
    /// Two inputs that must agree in size did not.
    Range,
}

/// Error returned when a statistics function cannot produce a result for its input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("no observations in {operation} calculation")]
    NoObservations { operation: &'static str },
    #[display(
        "not enough observations to calculate {operation} (needs {required}, found {actual})"
    )]
    NotEnoughObservations {
        operation: &'static str,
        required: usize,
        actual: usize,
    },
    #[display("invalid value or range used in call to normalize")]
    InvalidNormalizationRange,
    #[display("sequences passed to {operation} must be the same size ({left} vs {right})")]
    LengthMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },
}

impl StatsError {
    /// Returns which class of failure this error belongs to.
    #[must_use]
    pub fn kind(&self) -> StatsErrorKind {
        match self {
            Self::NoObservations { .. }
            | Self::NotEnoughObservations { .. }
            | Self::InvalidNormalizationRange => StatsErrorKind::InvalidArgument,
            Self::LengthMismatch { .. } => StatsErrorKind::Range,
        }
    }

    pub(crate) fn require(
        operation: &'static str,
        required: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if actual >= required {
            return Ok(());
        }
        if actual == 0 && required == 1 {
            return Err(Self::NoObservations { operation });
        }
        Err(Self::NotEnoughObservations {
            operation,
            required,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(StatsError::require("mean", 1, 3).is_ok());
        assert_eq!(
            StatsError::require("mean", 1, 0),
            Err(StatsError::NoObservations { operation: "mean" })
        );
        assert_eq!(
            StatsError::require("variance", 2, 1),
            Err(StatsError::NotEnoughObservations {
                operation: "variance",
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_display_and_kind() {
        let err = StatsError::NotEnoughObservations {
            operation: "kurtosis",
            required: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "not enough observations to calculate kurtosis (needs 4, found 3)"
        );
        assert_eq!(err.kind(), StatsErrorKind::InvalidArgument);

        let err = StatsError::LengthMismatch {
            operation: "phi coefficient",
            left: 2,
            right: 3,
        };
        assert_eq!(err.kind(), StatsErrorKind::Range);
    }
}
