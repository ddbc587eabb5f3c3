//! Validated, immutable input to the formatter: one per form submission.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, CurrencyPair, OptionStructure, TradeDate, DEFAULT_DATE_FORMAT};
use crate::error::TradeIdeaError;
use crate::formatter::{self, check_strike_count, TradeIdeaResult};

/// Everything the formatter needs, checked once at construction.
///
/// Fields are private so a request can only exist in a valid state:
/// strike count matches the structure, all numbers are finite, cost and net
/// delta are non-negative, and net delta is present only for structures
/// that quote one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTradeIdeaRequest")]
pub struct TradeIdeaRequest {
    pair: CurrencyPair,
    action: Action,
    date: TradeDate,
    structure: OptionStructure,
    strikes: Vec<f64>,
    cost: f64,
    net_delta: Option<f64>,
}

/// Unchecked wire form; deserialization goes through [`TradeIdeaRequest::new`].
#[derive(Deserialize)]
struct RawTradeIdeaRequest {
    pair: CurrencyPair,
    action: Action,
    date: TradeDate,
    structure: OptionStructure,
    strikes: Vec<f64>,
    cost: f64,
    net_delta: Option<f64>,
}

impl TryFrom<RawTradeIdeaRequest> for TradeIdeaRequest {
    type Error = TradeIdeaError;

    fn try_from(raw: RawTradeIdeaRequest) -> Result<Self, Self::Error> {
        TradeIdeaRequest::new(
            raw.pair,
            raw.action,
            raw.date,
            raw.structure,
            raw.strikes,
            raw.cost,
            raw.net_delta,
        )
    }
}

impl TradeIdeaRequest {
    pub fn new(
        pair: CurrencyPair,
        action: Action,
        date: TradeDate,
        structure: OptionStructure,
        strikes: Vec<f64>,
        cost: f64,
        net_delta: Option<f64>,
    ) -> Result<Self, TradeIdeaError> {
        check_strike_count(structure, &strikes)?;
        if strikes.iter().any(|s| !s.is_finite()) {
            return Err(TradeIdeaError::NonFiniteInput { field: "strike" });
        }
        if !cost.is_finite() {
            return Err(TradeIdeaError::NonFiniteInput { field: "cost" });
        }
        if cost < 0.0 {
            return Err(TradeIdeaError::NegativeCost(cost));
        }

        let net_delta = net_delta.filter(|_| structure.has_net_delta());
        if let Some(delta) = net_delta {
            if !delta.is_finite() {
                return Err(TradeIdeaError::NonFiniteInput { field: "net delta" });
            }
            if delta < 0.0 {
                return Err(TradeIdeaError::NegativeNetDelta(delta));
            }
        }

        Ok(Self { pair, action, date, structure, strikes, cost, net_delta })
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn date(&self) -> &TradeDate {
        &self.date
    }

    pub fn structure(&self) -> OptionStructure {
        self.structure
    }

    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn net_delta(&self) -> Option<f64> {
        self.net_delta
    }

    /// Unrounded leverage; fails only on a zero reference strike.
    pub fn leverage(&self) -> Result<f64, TradeIdeaError> {
        formatter::leverage(self.structure, &self.strikes, self.cost)
    }

    pub fn format(&self) -> Result<TradeIdeaResult, TradeIdeaError> {
        self.format_with(DEFAULT_DATE_FORMAT)
    }

    pub fn format_with(&self, date_format: &str) -> Result<TradeIdeaResult, TradeIdeaError> {
        formatter::render(
            &self.pair,
            self.action,
            &self.date,
            self.structure,
            &self.strikes,
            self.cost,
            self.net_delta,
            date_format,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        structure: OptionStructure,
        strikes: Vec<f64>,
        cost: f64,
        net_delta: Option<f64>,
    ) -> Result<TradeIdeaRequest, TradeIdeaError> {
        TradeIdeaRequest::new(
            "USDJPY".parse().unwrap(),
            Action::Buy,
            TradeDate::Text("1M".into()),
            structure,
            strikes,
            cost,
            net_delta,
        )
    }

    #[test]
    fn valid_request_formats() {
        let req = request(OptionStructure::CallSpread, vec![150.0, 152.0], 50.0, Some(20.0)).unwrap();
        let out = req.format().unwrap();
        assert_eq!(out.leverage, 2.7);
        assert!(out.description.ends_with("2.7x Leverage"));
    }

    #[test]
    fn rejects_strike_count_mismatch() {
        let err = request(OptionStructure::Digital, vec![1.0, 2.0], 10.0, None).unwrap_err();
        assert!(matches!(err, TradeIdeaError::InvalidStrikeCount { expected: 1, actual: 2, .. }));
    }

    #[test]
    fn rejects_negative_cost() {
        let err = request(OptionStructure::CallSpread, vec![1.0, 2.0], -1.0, None).unwrap_err();
        assert_eq!(err, TradeIdeaError::NegativeCost(-1.0));
    }

    #[test]
    fn rejects_negative_net_delta() {
        let err = request(OptionStructure::CallSpread, vec![1.0, 2.0], 1.0, Some(-5.0)).unwrap_err();
        assert_eq!(err, TradeIdeaError::NegativeNetDelta(-5.0));
    }

    #[test]
    fn drops_net_delta_for_digital() {
        let req = request(OptionStructure::Digital, vec![1.0], 10.0, Some(30.0)).unwrap();
        assert_eq!(req.net_delta(), None);
    }

    #[test]
    fn zero_reference_strike_surfaces_at_format_time() {
        let req = request(OptionStructure::CallSpread, vec![0.0, 152.0], 50.0, None).unwrap();
        assert_eq!(req.format().unwrap_err(), TradeIdeaError::DivisionByZero { cost: 50.0 });
    }

    #[test]
    fn request_round_trips_through_json() {
        let req = request(OptionStructure::PutErko, vec![1.1, 1.05], 12.5, Some(15.0)).unwrap();
        let json = serde_json::to_string(&req).unwrap();
        let back: TradeIdeaRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);

        let bad = json.replace("12.5", "-12.5");
        assert!(serde_json::from_str::<TradeIdeaRequest>(&bad).is_err());
    }
}
