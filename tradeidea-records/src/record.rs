//! Row types for the order and client tables.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tradeidea_core::{Action, CurrencyPair, OptionStructure, TradeIdeaRequest, TradeIdeaResult};

/// A row in a keyed CSV table.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Table name; the backing file is `<TABLE>.csv`.
    const TABLE: &'static str;

    /// Free-text primary key.
    fn key(&self) -> &str;

    /// Replace the key; used to store it trimmed.
    fn set_key(&mut self, key: String);
}

/// A booked (or proposed) order for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub name: String,
    pub client: String,
    pub currency_pair: CurrencyPair,
    pub action: Action,
    pub structure: OptionStructure,
    pub notional: Option<f64>,
    pub date: String,
    pub description: String,
}

impl OrderRecord {
    /// Build an order whose description is the rendered trade idea.
    pub fn from_idea(
        name: impl Into<String>,
        client: impl Into<String>,
        notional: Option<f64>,
        request: &TradeIdeaRequest,
        idea: &TradeIdeaResult,
    ) -> Self {
        Self {
            name: name.into(),
            client: client.into(),
            currency_pair: request.pair().clone(),
            action: request.action(),
            structure: request.structure(),
            notional,
            date: request.date().to_string(),
            description: idea.description.clone(),
        }
    }
}

impl Record for OrderRecord {
    const TABLE: &'static str = "orders";

    fn key(&self) -> &str {
        &self.name
    }

    fn set_key(&mut self, key: String) {
        self.name = key;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
}

impl Record for ClientRecord {
    const TABLE: &'static str = "clients";

    fn key(&self) -> &str {
        &self.name
    }

    fn set_key(&mut self, key: String) {
        self.name = key;
    }
}
