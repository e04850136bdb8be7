use std::{error::Error, fmt::Display};

/// Errors returned by [BSpline](crate::BSpline) and its consumers. Both kinds come from caller misuse
/// and are detected before any evaluation happens.
#[derive(Debug, Clone, PartialEq)]
pub enum BSplineError {
    /// Knots, degree, control points or batch shapes do not satisfy the construction contract.
    InvalidArgument(String),
    /// Operation requested on a spline that is not ready for it, e.g. evaluation without control points.
    InvalidState(String),
}

impl BSplineError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        BSplineError::InvalidArgument(message.into())
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        BSplineError::InvalidState(message.into())
    }
}

impl Display for BSplineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BSplineError::InvalidArgument(message) => write!(f, "Invalid argument in BSpline: {}", message),
            BSplineError::InvalidState(message) => write!(f, "Invalid state in BSpline: {}", message),
        }
    }
}

impl Error for BSplineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = BSplineError::argument("at least 2 knots required");
        assert_eq!("Invalid argument in BSpline: at least 2 knots required", error.to_string());

        let error = BSplineError::state("control points not set");
        assert_eq!("Invalid state in BSpline: control points not set", error.to_string());
    }

    #[test]
    fn boxed() {
        let boxed: Box<dyn Error> = Box::new(BSplineError::argument("x"));
        assert!(boxed.to_string().starts_with("Invalid argument"));
    }
}
