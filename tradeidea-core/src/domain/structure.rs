//! Option structures offered on the trade-idea form.
//!
//! Each variant fixes, once, everything the formatter branches on:
//! how many strike inputs it takes, which unit its premium is quoted in,
//! whether a net delta is quoted alongside, and which strike (if any) is
//! rendered as a trailing barrier level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TradeIdeaError;

/// Unit the premium of a structure is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostUnit {
    /// Percent of notional (digitals).
    Percent,
    /// Basis points of notional.
    BasisPoints,
}

impl CostUnit {
    /// Label appended after the cost in the rendered description.
    pub fn label(self) -> &'static str {
        match self {
            CostUnit::Percent => "%",
            CostUnit::BasisPoints => "bps",
        }
    }

    /// Divisor turning a quoted cost into a fraction of notional.
    pub fn divisor(self) -> f64 {
        match self {
            CostUnit::Percent => 100.0,
            CostUnit::BasisPoints => 10_000.0,
        }
    }
}

impl fmt::Display for CostUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Role of the trailing barrier strike, if the structure has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarrierRole {
    None,
    /// Risk knock-in.
    Rki,
    /// Early-remove knock-out.
    Erko,
}

impl BarrierRole {
    pub fn label(self) -> Option<&'static str> {
        match self {
            BarrierRole::None => None,
            BarrierRole::Rki => Some("RKI"),
            BarrierRole::Erko => Some("ERKO"),
        }
    }

    pub fn has_barrier(self) -> bool {
        self != BarrierRole::None
    }
}

/// The option structures a trade idea can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionStructure {
    CallSpread,
    PutSpread,
    CallSpreadRki,
    PutSpreadRki,
    Digital,
    CallErko,
    PutErko,
    DigiRiskReversal,
}

impl OptionStructure {
    /// Every structure, in menu order.
    pub const ALL: [OptionStructure; 8] = [
        OptionStructure::CallSpread,
        OptionStructure::PutSpread,
        OptionStructure::CallSpreadRki,
        OptionStructure::PutSpreadRki,
        OptionStructure::Digital,
        OptionStructure::CallErko,
        OptionStructure::PutErko,
        OptionStructure::DigiRiskReversal,
    ];

    /// Number of strike inputs the structure requires, barrier level included.
    pub fn strike_count(self) -> usize {
        match self {
            OptionStructure::Digital => 1,
            OptionStructure::CallSpread
            | OptionStructure::PutSpread
            | OptionStructure::CallErko
            | OptionStructure::PutErko => 2,
            OptionStructure::CallSpreadRki
            | OptionStructure::PutSpreadRki
            | OptionStructure::DigiRiskReversal => 3,
        }
    }

    pub fn cost_unit(self) -> CostUnit {
        match self {
            OptionStructure::Digital => CostUnit::Percent,
            _ => CostUnit::BasisPoints,
        }
    }

    pub fn has_net_delta(self) -> bool {
        !matches!(self, OptionStructure::Digital)
    }

    /// The barrier, when present, is always the last strike.
    pub fn barrier_role(self) -> BarrierRole {
        match self {
            OptionStructure::CallSpreadRki
            | OptionStructure::PutSpreadRki
            | OptionStructure::DigiRiskReversal => BarrierRole::Rki,
            OptionStructure::CallErko | OptionStructure::PutErko => BarrierRole::Erko,
            OptionStructure::CallSpread | OptionStructure::PutSpread | OptionStructure::Digital => {
                BarrierRole::None
            }
        }
    }

    /// Index of the far strike used for the width in the leverage formula.
    /// `None` for digitals, whose leverage is the payout ratio.
    pub fn width_strike_index(self) -> Option<usize> {
        match self {
            OptionStructure::Digital => None,
            OptionStructure::CallSpread
            | OptionStructure::PutSpread
            | OptionStructure::CallErko
            | OptionStructure::PutErko => Some(1),
            OptionStructure::CallSpreadRki
            | OptionStructure::PutSpreadRki
            | OptionStructure::DigiRiskReversal => Some(2),
        }
    }

    /// Label used inside the rendered description.
    pub fn label(self) -> &'static str {
        match self {
            OptionStructure::CallSpread => "call spread",
            OptionStructure::PutSpread => "put spread",
            OptionStructure::CallSpreadRki => "call spread RKI",
            OptionStructure::PutSpreadRki => "put spread RKI",
            OptionStructure::Digital => "digital",
            OptionStructure::CallErko => "call ERKO",
            OptionStructure::PutErko => "put ERKO",
            OptionStructure::DigiRiskReversal => "digi risk reversal",
        }
    }

    /// Stable kebab-case identifier, accepted on the command line.
    pub fn id(self) -> &'static str {
        match self {
            OptionStructure::CallSpread => "call-spread",
            OptionStructure::PutSpread => "put-spread",
            OptionStructure::CallSpreadRki => "call-spread-rki",
            OptionStructure::PutSpreadRki => "put-spread-rki",
            OptionStructure::Digital => "digital",
            OptionStructure::CallErko => "call-erko",
            OptionStructure::PutErko => "put-erko",
            OptionStructure::DigiRiskReversal => "digi-risk-reversal",
        }
    }

    /// Prompt label for each strike slot, in input order.
    ///
    /// The barrier slot is named after its role (`RKI Level`, `ERKO Level`).
    pub fn input_labels(self) -> Vec<String> {
        let count = self.strike_count();
        (0..count)
            .map(|i| match self.barrier_role().label() {
                Some(role) if i == count - 1 => format!("{role} Level"),
                _ => format!("Strike {}", i + 1),
            })
            .collect()
    }
}

impl fmt::Display for OptionStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for OptionStructure {
    type Err = TradeIdeaError;

    /// Accepts the display label or the identifier, case-insensitively,
    /// with spaces, dashes and underscores treated alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        OptionStructure::ALL
            .into_iter()
            .find(|st| normalize(st.id()) == wanted || normalize(st.label()) == wanted)
            .ok_or_else(|| TradeIdeaError::UnknownStructure(s.trim().to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
