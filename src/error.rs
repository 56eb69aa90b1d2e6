use std::error::Error;
use std::fmt;

/// Custom error type for boosting and ensemble persistence failures.
#[derive(Debug)]
pub enum BoostError {
    /// `predict` was called with a dataset whose representation does not
    /// match the ensemble's base-learner type.
    TypeMismatch { expected: String, found: String },
    /// A tag with no registered base-learner driver was encountered during
    /// save or load.
    UnsupportedType(String),
    /// Index-aligned inputs (labels, weights, predictions) disagree in length.
    LengthMismatch { expected: usize, found: usize },
    /// Invalid input data (bad label encoding, negative weight, empty set).
    InvalidData(String),
    /// The base learner failed to train, predict, or decode a model.
    Learner(String),
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for BoostError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoostError::TypeMismatch { expected, found } => {
                write!(f, "data should be {}, but {} found", expected, found)
            }
            BoostError::UnsupportedType(tag) => {
                write!(f, "base-learner type {:?} is not supported", tag)
            }
            BoostError::LengthMismatch { expected, found } => {
                write!(f, "expected {} index-aligned values, found {}", expected, found)
            }
            BoostError::InvalidData(msg) => write!(f, "invalid data: {}", msg),
            BoostError::Learner(msg) => write!(f, "base learner error: {}", msg),
            BoostError::Io(e) => write!(f, "I/O error: {}", e),
            BoostError::Serde(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl Error for BoostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BoostError::Io(e) => Some(e),
            BoostError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BoostError {
    fn from(e: std::io::Error) -> Self {
        BoostError::Io(e)
    }
}

impl From<serde_json::Error> for BoostError {
    fn from(e: serde_json::Error) -> Self {
        BoostError::Serde(e)
    }
}
