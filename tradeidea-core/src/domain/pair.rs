use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TradeIdeaError;

/// Currency pairs offered on the form, in menu order.
pub const SUPPORTED_PAIRS: [&str; 24] = [
    "USDJPY", "EURUSD", "GBPUSD", "AUDUSD", "USDCAD", "USDCHF", "NZDUSD", "EURGBP", "EURJPY",
    "GBPJPY", "AUDJPY", "AUDNZD", "EURAUD", "EURNZD", "USDSEK", "USDNOK", "USDMXN", "USDCNH",
    "USDTWD", "USDKRW", "USDSGD", "USDZAR", "USDTRY", "USDHKD",
];

/// A currency pair from the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CurrencyPair(&'static str);

impl CurrencyPair {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Base currency (first three letters).
    pub fn base(&self) -> &'static str {
        &self.0[..3]
    }

    /// Quote currency (last three letters).
    pub fn quote(&self) -> &'static str {
        &self.0[3..]
    }

    pub fn all() -> impl Iterator<Item = CurrencyPair> {
        SUPPORTED_PAIRS.into_iter().map(CurrencyPair)
    }
}

impl FromStr for CurrencyPair {
    type Err = TradeIdeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '/')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        SUPPORTED_PAIRS
            .into_iter()
            .find(|p| *p == wanted)
            .map(CurrencyPair)
            .ok_or_else(|| TradeIdeaError::UnsupportedPair(s.trim().to_string()))
    }
}

// Owned input resolved against the static table, so any `'de` works.
impl<'de> Deserialize<'de> for CurrencyPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.0.to_string()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

/// Direction of the trade idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Buy => "Buy",
            Action::Sell => "Sell",
        }
    }
}

impl FromStr for Action {
    type Err = TradeIdeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Action::Buy),
            "sell" => Ok(Action::Sell),
            _ => Err(TradeIdeaError::UnknownAction(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
