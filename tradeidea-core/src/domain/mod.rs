//! Domain types for trade ideas

pub mod date;
pub mod pair;
pub mod structure;

pub use date::{check_date_format, TradeDate, DEFAULT_DATE_FORMAT};
pub use pair::{Action, CurrencyPair, SUPPORTED_PAIRS};
pub use structure::{BarrierRole, CostUnit, OptionStructure};
