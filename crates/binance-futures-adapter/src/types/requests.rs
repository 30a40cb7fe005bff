/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with wire parameter encoding
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, Side, TimeInForce, WorkingType};

/// POST /fapi/v1/order parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_type: Option<WorkingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
}

impl NewOrderRequest {
    /// Bare request; optional fields are filled in by the builder methods.
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
            working_type: None,
            reduce_only: None,
            new_client_order_id: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn with_working_type(mut self, working_type: WorkingType) -> Self {
        self.working_type = Some(working_type);
        self
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(client_order_id.into());
        self
    }

    /// Wire parameters in a stable order, absent values omitted.
    ///
    /// Decimals are normalized so `0.0100` goes out as `0.01`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type.as_str().to_string()),
            ("quantity", self.quantity.normalize().to_string()),
        ];
        if let Some(price) = self.price {
            params.push(("price", price.normalize().to_string()));
        }
        if let Some(stop_price) = self.stop_price {
            params.push(("stopPrice", stop_price.normalize().to_string()));
        }
        if let Some(tif) = self.time_in_force {
            params.push(("timeInForce", tif.as_str().to_string()));
        }
        if let Some(working_type) = self.working_type {
            params.push(("workingType", working_type.as_str().to_string()));
        }
        if let Some(reduce_only) = self.reduce_only {
            params.push(("reduceOnly", reduce_only.to_string()));
        }
        if let Some(id) = &self.new_client_order_id {
            params.push(("newClientOrderId", id.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_market_order_params() {
        let req = NewOrderRequest::new(
            "BTCUSDT",
            Side::Buy,
            OrderType::Market,
            Decimal::from_str("0.0100").unwrap(),
        );

        assert_eq!(
            req.to_params(),
            vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "BUY".to_string()),
                ("type", "MARKET".to_string()),
                ("quantity", "0.01".to_string()),
            ]
        );
    }

    #[test]
    fn test_stop_limit_order_params() {
        let req = NewOrderRequest::new(
            "ETHUSDT",
            Side::Sell,
            OrderType::Stop,
            Decimal::from_str("0.5").unwrap(),
        )
        .with_price(Decimal::from_str("2500.00").unwrap())
        .with_stop_price(Decimal::from_str("2510").unwrap())
        .with_time_in_force(TimeInForce::Gtc)
        .with_working_type(WorkingType::MarkPrice)
        .with_client_order_id("tb-1");

        let params = req.to_params();
        let keys: Vec<&str> = params.iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec![
                "symbol",
                "side",
                "type",
                "quantity",
                "price",
                "stopPrice",
                "timeInForce",
                "workingType",
                "newClientOrderId",
            ]
        );
        assert!(params.contains(&("price", "2500".to_string())));
        assert!(params.contains(&("workingType", "MARK_PRICE".to_string())));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let req = NewOrderRequest::new(
            "BTCUSDT",
            Side::Buy,
            OrderType::Limit,
            Decimal::from_str("1").unwrap(),
        )
        .with_price(Decimal::from_str("100").unwrap());

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "LIMIT");
        assert_eq!(json["price"], "100");
        assert!(json.get("stopPrice").is_none());
    }
}
