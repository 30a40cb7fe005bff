/*
[INPUT]:  HTTP requests (order form posts, account and health probes)
[OUTPUT]: HTML pages with status codes matching the order outcome
[POS]:    Web layer - request handlers
[UPDATE]: When adding routes or changing the order flow
*/

use std::str::FromStr;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use binance_futures_adapter::{BinanceError, Side, TimeInForce};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use super::AppState;
use super::templates::{self, Notice};
use crate::order::{OrderKind, OrderParams, parse_time_in_force};
use crate::precheck::{MIN_NOTIONAL_REJECTION_HINT, NotionalCheck, TOO_SMALL_HINT, check_notional};
use crate::report::QUOTE_ASSET;

type PageResponse = (StatusCode, Html<String>);

/// Raw order form; every field is text so blank inputs reach validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: String,
    pub price: String,
    pub stop_price: String,
    pub time_in_force: String,
}

impl OrderForm {
    /// Values the empty form starts with
    pub fn initial() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy.to_string(),
            order_type: OrderKind::Market.to_string(),
            time_in_force: TimeInForce::Gtc.to_string(),
            ..Self::default()
        }
    }

    fn to_params(&self) -> Result<OrderParams, String> {
        let side = Side::from_str(&self.side)?;
        let kind = OrderKind::from_str(&self.order_type)?;
        let time_in_force = if self.time_in_force.trim().is_empty() {
            TimeInForce::Gtc
        } else {
            parse_time_in_force(&self.time_in_force)?
        };

        Ok(OrderParams {
            symbol: self.symbol.clone(),
            side,
            kind,
            quantity: optional_decimal("Quantity", &self.quantity)?.unwrap_or(Decimal::ZERO),
            price: optional_decimal("Limit price", &self.price)?,
            stop_price: optional_decimal("Stop price", &self.stop_price)?,
            time_in_force,
        })
    }
}

fn optional_decimal(label: &str, text: &str) -> Result<Option<Decimal>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(text)
        .map(Some)
        .map_err(|_| format!("{label}: could not convert '{text}' to a number"))
}

fn order_page(status: StatusCode, form: &OrderForm, notices: &[Notice], extra: &str) -> PageResponse {
    let body = format!(
        "{}{}{}",
        templates::notices(notices),
        extra,
        templates::order_form(form)
    );
    (status, Html(templates::page("Futures Testnet Bot", &body)))
}

pub async fn index() -> Html<String> {
    Html(templates::page(
        "Futures Testnet Bot",
        &templates::order_form(&OrderForm::initial()),
    ))
}

pub async fn place_order(
    State(state): State<AppState>,
    Form(form): Form<OrderForm>,
) -> PageResponse {
    let params = match form.to_params().and_then(|params| params.validate().map_err(|err| err.to_string())) {
        Ok(params) => params,
        Err(message) => {
            info!(error = %message, "order form rejected");
            return order_page(StatusCode::UNPROCESSABLE_ENTITY, &form, &[Notice::Error(message)], "");
        }
    };

    let mut notices = Vec::new();
    match check_notional(&state.bot, &params, state.min_notional).await {
        NotionalCheck::Passed { .. } => {}
        NotionalCheck::TooSmall { notional, minimum } => {
            let message = format!(
                "Estimated notional is only {notional:.2} USDT.\n\
                 For opening new positions, Binance Futures expects roughly {minimum} USDT or more.\n\
                 {TOO_SMALL_HINT}",
                notional = notional.round_dp(2),
                minimum = minimum.normalize(),
            );
            return order_page(StatusCode::UNPROCESSABLE_ENTITY, &form, &[Notice::Error(message)], "");
        }
        NotionalCheck::Skipped { reason } => {
            notices.push(Notice::Warning(format!("Could not check notional size: {reason}")));
        }
    }

    match state.bot.place_order(&params).await {
        Ok(order) => {
            let json = serde_json::to_string_pretty(&order).unwrap_or_else(|err| err.to_string());
            notices.push(Notice::Success("Order placed successfully.".to_string()));
            order_page(StatusCode::OK, &form, &notices, &templates::json_block(&json))
        }
        Err(err) => {
            let status = rejection_notices(&err, &mut notices);
            order_page(status, &form, &notices, "")
        }
    }
}

fn rejection_notices(err: &BinanceError, notices: &mut Vec<Notice>) -> StatusCode {
    match err {
        BinanceError::Api { code, message } => {
            notices.push(Notice::Error(format!(
                "Order rejected by Binance.\nCode: {code}\nMessage: {message}"
            )));
            if err.is_min_notional_rejection() {
                notices.push(Notice::Info(MIN_NOTIONAL_REJECTION_HINT.to_string()));
            }
            StatusCode::UNPROCESSABLE_ENTITY
        }
        err if err.is_request_error() => {
            notices.push(Notice::Error(format!(
                "Network / request error while talking to Binance: {err}"
            )));
            StatusCode::BAD_GATEWAY
        }
        err => {
            notices.push(Notice::Error(format!("Unexpected error: {err}")));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn account(State(state): State<AppState>) -> PageResponse {
    match state.bot.account_info().await {
        Ok(info) => {
            let body = templates::account_panel(info.asset(QUOTE_ASSET));
            (StatusCode::OK, Html(templates::page("Account", &body)))
        }
        Err(err) => {
            warn!(error = %err, "account panel unavailable");
            let body = format!(
                "{}{}",
                templates::notices(&[Notice::Error(format!("Could not load account info: {err}"))]),
                "<p><a href=\"/\">Back to order form</a></p>"
            );
            (StatusCode::BAD_GATEWAY, Html(templates::page("Account", &body)))
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
