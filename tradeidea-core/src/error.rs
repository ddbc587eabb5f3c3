use thiserror::Error;

use crate::domain::OptionStructure;

/// Validation failures for a trade idea. All are recoverable: the caller
/// re-prompts instead of rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeIdeaError {
    #[error("{structure} takes {expected} strike(s), got {actual}")]
    InvalidStrikeCount {
        structure: OptionStructure,
        expected: usize,
        actual: usize,
    },

    #[error("reference strike is zero with a positive cost of {cost}; leverage is undefined")]
    DivisionByZero { cost: f64 },

    #[error("cost must be non-negative, got {0}")]
    NegativeCost(f64),

    #[error("net delta must be non-negative, got {0}")]
    NegativeNetDelta(f64),

    #[error("{field} must be a finite number")]
    NonFiniteInput { field: &'static str },

    #[error("unsupported currency pair '{0}'")]
    UnsupportedPair(String),

    #[error("unknown action '{0}' (expected Buy or Sell)")]
    UnknownAction(String),

    #[error("unknown option structure '{0}'")]
    UnknownStructure(String),

    #[error("date must not be empty")]
    EmptyDate,

    #[error("'{0}' is not a usable date format")]
    InvalidDateFormat(String),

    #[error("leverage overflows for cost {cost}; the reference strike or cost is too small")]
    LeverageOverflow { cost: f64 },
}
