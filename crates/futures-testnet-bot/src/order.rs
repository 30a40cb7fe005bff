/*
[INPUT]:  Raw order fields from the CLI, prompts, or web form
[OUTPUT]: Validated OrderParams and exchange NewOrderRequest
[POS]:    Domain layer - order parameters and validation rules
[UPDATE]: When adding order kinds or changing validation rules
*/

use std::fmt;
use std::str::FromStr;

use binance_futures_adapter::{NewOrderRequest, OrderType, Side, TimeInForce, WorkingType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order kinds offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Market,
    Limit,
    /// Sent to the exchange as `STOP` with the mark price as trigger
    StopLimit,
}

impl OrderKind {
    pub const ALL: [OrderKind; 3] = [OrderKind::Market, OrderKind::Limit, OrderKind::StopLimit];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderKind::Market => "MARKET",
            OrderKind::Limit => "LIMIT",
            OrderKind::StopLimit => "STOP_LIMIT",
        }
    }

    pub fn needs_price(self) -> bool {
        !matches!(self, OrderKind::Market)
    }

    pub fn needs_stop_price(self) -> bool {
        matches!(self, OrderKind::StopLimit)
    }

    pub fn exchange_type(self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit => OrderType::Limit,
            OrderKind::StopLimit => OrderType::Stop,
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MARKET" => Ok(OrderKind::Market),
            "LIMIT" => Ok(OrderKind::Limit),
            "STOP_LIMIT" => Ok(OrderKind::StopLimit),
            other => Err(format!(
                "invalid order type '{other}', expected MARKET, LIMIT or STOP_LIMIT"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Symbol is required.")]
    MissingSymbol,
    #[error("Quantity must be greater than zero.")]
    NonPositiveQuantity,
    #[error("Limit price must be set and > 0 for LIMIT orders.")]
    MissingLimitPrice,
    #[error("Both limit price and stop price must be > 0 for STOP_LIMIT.")]
    MissingStopLimitPrices,
}

/// User-supplied order, before and after validation
#[derive(Debug, Clone, PartialEq)]
pub struct OrderParams {
    pub symbol: String,
    pub side: Side,
    pub kind: OrderKind,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub time_in_force: TimeInForce,
}

impl OrderParams {
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            kind: OrderKind::Market,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: TimeInForce::Gtc,
        }
    }

    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            kind: OrderKind::Limit,
            price: Some(price),
            ..Self::market(symbol, side, quantity)
        }
    }

    pub fn stop_limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            kind: OrderKind::StopLimit,
            price: Some(price),
            stop_price: Some(stop_price),
            ..Self::market(symbol, side, quantity)
        }
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Check the order before anything is sent.
    ///
    /// Returns the normalized order: symbol trimmed and upper-cased, prices
    /// a MARKET order does not use dropped.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        self.symbol = self.symbol.trim().to_ascii_uppercase();
        if self.symbol.is_empty() {
            return Err(ValidationError::MissingSymbol);
        }

        if self.quantity <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveQuantity);
        }

        let positive = |value: Option<Decimal>| value.is_some_and(|v| v > Decimal::ZERO);
        match self.kind {
            OrderKind::Market => {
                self.price = None;
                self.stop_price = None;
            }
            OrderKind::Limit => {
                if !positive(self.price) {
                    return Err(ValidationError::MissingLimitPrice);
                }
                self.stop_price = None;
            }
            OrderKind::StopLimit => {
                if !positive(self.price) || !positive(self.stop_price) {
                    return Err(ValidationError::MissingStopLimitPrices);
                }
            }
        }

        Ok(self)
    }

    /// Price used for the notional estimate; MARKET orders have none.
    pub fn reference_price(&self) -> Option<Decimal> {
        if self.kind.needs_price() {
            self.price
        } else {
            None
        }
    }

    /// Exchange request for this order
    pub fn to_request(&self, client_order_id: Option<String>) -> NewOrderRequest {
        let mut req = NewOrderRequest::new(
            self.symbol.clone(),
            self.side,
            self.kind.exchange_type(),
            self.quantity,
        );

        if self.kind.needs_price() {
            if let Some(price) = self.price {
                req = req.with_price(price);
            }
            req = req.with_time_in_force(self.time_in_force);
        }
        if self.kind.needs_stop_price() {
            if let Some(stop_price) = self.stop_price {
                req = req.with_stop_price(stop_price);
            }
            req = req.with_working_type(WorkingType::MarkPrice);
        }
        if let Some(id) = client_order_id {
            req = req.with_client_order_id(id);
        }

        req
    }
}

/// Time in force offered to users: GTC, IOC or FOK
pub fn parse_time_in_force(text: &str) -> Result<TimeInForce, String> {
    match text.parse::<TimeInForce>() {
        Ok(TimeInForce::Gtx) | Err(_) => Err(format!(
            "invalid time in force '{}', expected GTC, IOC or FOK",
            text.trim()
        )),
        Ok(tif) => Ok(tif),
    }
}

/// Parse a strictly positive decimal (quantities and prices)
pub fn parse_positive_decimal(text: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(text.trim())
        .map_err(|_| format!("could not convert '{text}' to a number"))?;
    if value <= Decimal::ZERO {
        return Err("value must be greater than zero".to_string());
    }
    Ok(value)
}
