use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that arise while computing a prize-collecting Steiner tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PcstError {
    /// The termination flag asked the computation to stop. No partial result is kept.
    Cancelled,
    NonFinitePrize(String),
    NegativePrize(String),
    InvalidEdgeCost(String),
    NodeOutOfRange(String),
}

impl Error for PcstError {}

impl Display for PcstError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            PcstError::Cancelled => String::from("The computation was cancelled"),
            PcstError::NonFinitePrize(msg) => format!("Non finite prize: {msg}"),
            PcstError::NegativePrize(msg) => format!("Negative prize: {msg}"),
            PcstError::InvalidEdgeCost(msg) => format!("Invalid edge cost: {msg}"),
            PcstError::NodeOutOfRange(msg) => format!("Node id out of range: {msg}"),
        };
        write!(f, "{message}")
    }
}
