//! Trade Idea Core: domain types, leverage computation, description rendering.
//!
//! This crate contains the pure part of the trade-idea generator:
//! - Domain types (currency pairs, actions, dates, option structures)
//! - Validated, immutable trade-idea requests
//! - The formatter: structure-dependent leverage and the one-paragraph description
//! - TOML configuration shared by the CLI and the record store
//!
//! Nothing here performs I/O except [`config::AppConfig`] loading.

pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod request;

pub use config::{AppConfig, ConfigError};
pub use domain::{Action, BarrierRole, CostUnit, CurrencyPair, OptionStructure, TradeDate};
pub use error::TradeIdeaError;
pub use formatter::{format_trade_idea, leverage, TradeIdeaResult};
pub use request::TradeIdeaRequest;
