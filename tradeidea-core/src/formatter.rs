//! Trade-idea formatter: leverage computation and description rendering.
//!
//! Leverage is a sizing heuristic, not a pricing model:
//! - Digital: payout ratio, `1 / (cost / 100)`.
//! - Everything else: spot-relative width between the reference strike
//!   (`strikes[0]`) and the structure's far strike, divided by the premium
//!   as a fraction of notional (`cost / 10000`).
//!
//! A zero cost yields zero leverage. A zero reference strike with a positive
//! cost is rejected rather than rendered as infinity, and so is any
//! division that overflows `f64`.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, CurrencyPair, OptionStructure, TradeDate, DEFAULT_DATE_FORMAT};
use crate::error::TradeIdeaError;

/// Output of one formatter invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIdeaResult {
    /// Leverage rounded to one decimal place.
    pub leverage: f64,
    pub description: String,
}

/// Reject strike lists whose length doesn't match the structure.
pub fn check_strike_count(structure: OptionStructure, strikes: &[f64]) -> Result<(), TradeIdeaError> {
    let expected = structure.strike_count();
    if strikes.len() != expected {
        return Err(TradeIdeaError::InvalidStrikeCount {
            structure,
            expected,
            actual: strikes.len(),
        });
    }
    Ok(())
}

/// Unrounded leverage for `structure`.
pub fn leverage(structure: OptionStructure, strikes: &[f64], cost: f64) -> Result<f64, TradeIdeaError> {
    check_strike_count(structure, strikes)?;
    if strikes.iter().any(|s| !s.is_finite()) {
        return Err(TradeIdeaError::NonFiniteInput { field: "strike" });
    }
    if !cost.is_finite() {
        return Err(TradeIdeaError::NonFiniteInput { field: "cost" });
    }
    if cost < 0.0 {
        return Err(TradeIdeaError::NegativeCost(cost));
    }
    if cost == 0.0 {
        return Ok(0.0);
    }

    let premium = cost / structure.cost_unit().divisor();
    let value = match structure.width_strike_index() {
        None => 1.0 / premium,
        Some(far) => {
            let reference = strikes[0];
            if reference == 0.0 {
                return Err(TradeIdeaError::DivisionByZero { cost });
            }
            let width = (strikes[far] - reference).abs() / reference;
            width / premium
        }
    };
    if !value.is_finite() {
        return Err(TradeIdeaError::LeverageOverflow { cost });
    }
    Ok(value)
}

/// Round half away from zero to one decimal place.
pub fn round_leverage(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Strikes shown inline, before the structure label.
pub fn inline_strikes(structure: OptionStructure, strikes: &[f64]) -> String {
    match structure {
        OptionStructure::CallErko | OptionStructure::PutErko | OptionStructure::DigiRiskReversal => {
            format_level(strikes[0])
        }
        // Far strike first, then the near strike; the RKI level trails.
        OptionStructure::CallSpreadRki | OptionStructure::PutSpreadRki => {
            format!("{} / {}", format_level(strikes[1]), format_level(strikes[0]))
        }
        OptionStructure::CallSpread | OptionStructure::PutSpread | OptionStructure::Digital => {
            strikes
                .iter()
                .map(|s| format_level(*s))
                .collect::<Vec<_>>()
                .join(" / ")
        }
    }
}

/// Barrier level appended after the label, if the structure has one.
pub fn barrier_level(structure: OptionStructure, strikes: &[f64]) -> Option<f64> {
    if structure.barrier_role().has_barrier() {
        strikes.last().copied()
    } else {
        None
    }
}

/// Render a price/cost level in shortest round-trip form, always keeping
/// a fractional part: `100` -> `100.0`, `1.195` -> `1.195`.
pub fn format_level(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

/// Compute leverage and render the description.
#[allow(clippy::too_many_arguments)]
pub fn format_trade_idea(
    pair: &CurrencyPair,
    action: Action,
    date: &TradeDate,
    structure: OptionStructure,
    strikes: &[f64],
    cost: f64,
    net_delta: Option<f64>,
) -> Result<TradeIdeaResult, TradeIdeaError> {
    render(pair, action, date, structure, strikes, cost, net_delta, DEFAULT_DATE_FORMAT)
}

/// As [`format_trade_idea`], with an explicit chrono format for calendar dates.
#[allow(clippy::too_many_arguments)]
pub fn render(
    pair: &CurrencyPair,
    action: Action,
    date: &TradeDate,
    structure: OptionStructure,
    strikes: &[f64],
    cost: f64,
    net_delta: Option<f64>,
    date_format: &str,
) -> Result<TradeIdeaResult, TradeIdeaError> {
    let leverage = round_leverage(leverage(structure, strikes, cost)?);
    let net_delta = net_delta.filter(|_| structure.has_net_delta());
    if let Some(delta) = net_delta {
        if !delta.is_finite() {
            return Err(TradeIdeaError::NonFiniteInput { field: "net delta" });
        }
        if delta < 0.0 {
            return Err(TradeIdeaError::NegativeNetDelta(delta));
        }
    }

    let mut trade_line = format!(
        "{action} {} {} {}",
        date.render_with(date_format)?,
        inline_strikes(structure, strikes),
        structure.label(),
    );
    if let Some(barrier) = barrier_level(structure, strikes) {
        trade_line.push(' ');
        trade_line.push_str(&format_level(barrier));
    }

    let mut cost_line = format!("Costs ~ {} {}", format_level(cost), structure.cost_unit());
    if let Some(delta) = net_delta {
        cost_line.push_str(&format!(" / Net Delta {}%", format_level(delta)));
    }

    let description = format!("{pair}\n{trade_line}\n{cost_line}\n{leverage:.1}x Leverage");
    Ok(TradeIdeaResult { leverage, description })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> TradeDate {
        TradeDate::Calendar(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn pair(p: &str) -> CurrencyPair {
        p.parse().unwrap()
    }

    #[test]
    fn call_spread_leverage() {
        let lev = leverage(OptionStructure::CallSpread, &[150.0, 152.0], 50.0).unwrap();
        assert!((lev - 2.6667).abs() < 1e-3);
        assert_eq!(round_leverage(lev), 2.7);
    }

    #[test]
    fn digital_leverage_is_payout_ratio() {
        let lev = leverage(OptionStructure::Digital, &[150.0], 25.0).unwrap();
        assert_eq!(round_leverage(lev), 4.0);
    }

    #[test]
    fn erko_uses_barrier_as_far_strike() {
        let lev = leverage(OptionStructure::CallErko, &[100.0, 105.0], 40.0).unwrap();
        assert_eq!(round_leverage(lev), 12.5);
    }

    #[test]
    fn rki_uses_third_strike() {
        let lev = leverage(OptionStructure::PutSpreadRki, &[1.2, 1.195, 1.18], 30.0).unwrap();
        assert_eq!(round_leverage(lev), 5.6);
    }

    #[test]
    fn zero_cost_is_zero_leverage_even_with_zero_strike() {
        assert_eq!(leverage(OptionStructure::CallSpread, &[0.0, 152.0], 0.0).unwrap(), 0.0);
        assert_eq!(leverage(OptionStructure::Digital, &[1.0], 0.0).unwrap(), 0.0);
    }

    #[test]
    fn zero_reference_strike_is_rejected() {
        let err = leverage(OptionStructure::CallSpread, &[0.0, 152.0], 50.0).unwrap_err();
        assert_eq!(err, TradeIdeaError::DivisionByZero { cost: 50.0 });
    }

    #[test]
    fn overflowing_leverage_is_rejected() {
        assert_eq!(
            leverage(OptionStructure::CallSpread, &[1e-310, 1.0], 50.0).unwrap_err(),
            TradeIdeaError::LeverageOverflow { cost: 50.0 }
        );
        assert_eq!(
            leverage(OptionStructure::Digital, &[1.1], 1e-310).unwrap_err(),
            TradeIdeaError::LeverageOverflow { cost: 1e-310 }
        );
        let err = format_trade_idea(
            &pair("USDJPY"),
            Action::Buy,
            &date(),
            OptionStructure::CallSpread,
            &[1e-310, 1.0],
            50.0,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TradeIdeaError::LeverageOverflow { .. }));
    }

    #[test]
    fn negative_net_delta_is_rejected_when_quoted() {
        let call = |st, strikes: &[f64]| {
            format_trade_idea(&pair("EURUSD"), Action::Buy, &date(), st, strikes, 10.0, Some(-5.0))
        };
        assert_eq!(
            call(OptionStructure::CallSpread, &[1.1, 1.12]).unwrap_err(),
            TradeIdeaError::NegativeNetDelta(-5.0)
        );
        // Digitals never quote a delta, so the value is dropped unchecked.
        assert!(call(OptionStructure::Digital, &[1.1]).is_ok());
    }

    #[test]
    fn unusable_date_format_is_an_error() {
        let err = render(
            &pair("USDJPY"),
            Action::Buy,
            &date(),
            OptionStructure::CallSpread,
            &[150.0, 152.0],
            50.0,
            None,
            "%Q",
        )
        .unwrap_err();
        assert_eq!(err, TradeIdeaError::InvalidDateFormat("%Q".into()));
    }

    #[test]
    fn digital_ignores_zero_strike() {
        assert_eq!(leverage(OptionStructure::Digital, &[0.0], 50.0).unwrap(), 2.0);
    }

    #[test]
    fn wrong_strike_count_is_rejected() {
        let err = leverage(OptionStructure::PutSpreadRki, &[1.2, 1.18], 30.0).unwrap_err();
        assert_eq!(
            err,
            TradeIdeaError::InvalidStrikeCount {
                structure: OptionStructure::PutSpreadRki,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert_eq!(
            leverage(OptionStructure::CallSpread, &[f64::NAN, 1.0], 10.0).unwrap_err(),
            TradeIdeaError::NonFiniteInput { field: "strike" }
        );
        assert_eq!(
            leverage(OptionStructure::Digital, &[1.0], f64::INFINITY).unwrap_err(),
            TradeIdeaError::NonFiniteInput { field: "cost" }
        );
    }

    #[test]
    fn level_formatting_keeps_a_fraction() {
        assert_eq!(format_level(100.0), "100.0");
        assert_eq!(format_level(1.195), "1.195");
        assert_eq!(format_level(0.0), "0.0");
        assert_eq!(format_level(152.25), "152.25");
    }

    #[test]
    fn inline_strike_selection() {
        assert_eq!(inline_strikes(OptionStructure::CallSpread, &[150.0, 152.0]), "150.0 / 152.0");
        assert_eq!(inline_strikes(OptionStructure::CallErko, &[100.0, 105.0]), "100.0");
        assert_eq!(
            inline_strikes(OptionStructure::PutSpreadRki, &[1.2, 1.195, 1.18]),
            "1.195 / 1.2"
        );
        assert_eq!(inline_strikes(OptionStructure::DigiRiskReversal, &[1.1, 1.12, 1.05]), "1.1");
        assert_eq!(inline_strikes(OptionStructure::Digital, &[1.1]), "1.1");
    }

    #[test]
    fn renders_call_spread() {
        let out = format_trade_idea(
            &pair("USDJPY"),
            Action::Buy,
            &date(),
            OptionStructure::CallSpread,
            &[150.0, 152.0],
            50.0,
            Some(25.0),
        )
        .unwrap();
        assert_eq!(out.leverage, 2.7);
        assert_eq!(
            out.description,
            "USDJPY\nBuy 19-Oct-2026 150.0 / 152.0 call spread\nCosts ~ 50.0 bps / Net Delta 25.0%\n2.7x Leverage"
        );
    }

    #[test]
    fn renders_erko_with_barrier_suffix() {
        let out = format_trade_idea(
            &pair("EURUSD"),
            Action::Sell,
            &TradeDate::Text("3M".into()),
            OptionStructure::CallErko,
            &[100.0, 105.0],
            40.0,
            Some(10.0),
        )
        .unwrap();
        assert_eq!(
            out.description,
            "EURUSD\nSell 3M 100.0 call ERKO 105.0\nCosts ~ 40.0 bps / Net Delta 10.0%\n12.5x Leverage"
        );
    }

    #[test]
    fn renders_digital_in_percent_without_delta() {
        let out = format_trade_idea(
            &pair("AUDUSD"),
            Action::Buy,
            &date(),
            OptionStructure::Digital,
            &[0.65],
            25.0,
            Some(30.0),
        )
        .unwrap();
        assert_eq!(
            out.description,
            "AUDUSD\nBuy 19-Oct-2026 0.65 digital\nCosts ~ 25.0 %\n4.0x Leverage"
        );
    }

    #[test]
    fn renders_rki_spread() {
        let out = format_trade_idea(
            &pair("EURUSD"),
            Action::Buy,
            &date(),
            OptionStructure::PutSpreadRki,
            &[1.2, 1.195, 1.18],
            30.0,
            None,
        )
        .unwrap();
        assert_eq!(
            out.description,
            "EURUSD\nBuy 19-Oct-2026 1.195 / 1.2 put spread RKI 1.18\nCosts ~ 30.0 bps\n5.6x Leverage"
        );
    }

    #[test]
    fn custom_date_format() {
        let out = render(
            &pair("USDJPY"),
            Action::Buy,
            &date(),
            OptionStructure::CallSpread,
            &[150.0, 152.0],
            0.0,
            None,
            "%Y-%m-%d",
        )
        .unwrap();
        assert!(out.description.contains("Buy 2026-10-19 150.0"));
        assert!(out.description.ends_with("0.0x Leverage"));
    }
}
