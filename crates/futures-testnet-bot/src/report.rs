/*
[INPUT]:  Order responses, account info, exchange errors, pre-check verdicts
[OUTPUT]: Human-readable text and JSON/YAML renderings for the terminal
[POS]:    Presentation layer - CLI output
[UPDATE]: When changing printed fields or output formats
*/

use std::fmt::Write as _;

use anyhow::{Context, Result};
use binance_futures_adapter::{AccountInfo, BinanceError, OrderResponse};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;

use crate::precheck::{MIN_NOTIONAL_REJECTION_HINT, TOO_SMALL_HINT};

/// Asset the account summary reports on
pub const QUOTE_ASSET: &str = "USDT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Render an order acknowledgement in the requested format
pub fn render_order(order: &OrderResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(order_summary(order)),
        OutputFormat::Json => serde_json::to_string_pretty(order).context("encode order as JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(order).context("encode order as YAML"),
    }
}

pub fn order_summary(order: &OrderResponse) -> String {
    let mut out = String::from("\n--- Order Result ---\n");
    let rows = [
        ("Symbol", order.symbol.clone()),
        ("Side", order.side.to_string()),
        ("Type", order.order_type.to_string()),
        ("Status", order.status.to_string()),
        ("Order ID", order.order_id.to_string()),
        ("Client ID", order.client_order_id.clone()),
        ("Price", order.price.normalize().to_string()),
        ("Orig Qty", order.orig_qty.normalize().to_string()),
        ("Executed Qty", order.executed_qty.normalize().to_string()),
        ("Update Time", format_timestamp(order.update_time)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<12}: {value}");
    }
    out
}

pub fn notional_too_small(notional: Decimal, minimum: Decimal) -> String {
    format!(
        "\nOrder not sent:\n  estimated notional = {notional:.2} USDT (price * quantity)\n  \
         Binance Futures expects notional >= {minimum} USDT.\n  {TOO_SMALL_HINT}",
        notional = notional.round_dp(2),
        minimum = minimum.normalize(),
    )
}

/// Explain a failed order call
pub fn rejection(err: &BinanceError) -> String {
    match err {
        BinanceError::Api { code, message } => {
            let mut out =
                format!("\nOrder rejected by Binance:\n  code   : {code}\n  message: {message}");
            if err.is_min_notional_rejection() {
                let _ = write!(out, "\n\n{MIN_NOTIONAL_REJECTION_HINT}");
            }
            out
        }
        err if err.is_request_error() => {
            format!("\nNetwork error while talking to Binance:\n  {err}")
        }
        err => format!("\nUnexpected error:\n  {err}"),
    }
}

pub fn account_summary(info: &AccountInfo) -> String {
    match info.asset(QUOTE_ASSET) {
        Some(row) => format!(
            "Futures Account (USDT-M)\n  {QUOTE_ASSET} wallet balance: {}\n  {QUOTE_ASSET} available     : {}",
            row.wallet_balance.normalize(),
            row.available_balance.normalize()
        ),
        None => format!("No {QUOTE_ASSET} entry found in account assets."),
    }
}

/// Milliseconds since epoch as `YYYY-MM-DD HH:MM:SS UTC (ms)`
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(at) if millis > 0 => format!("{} ({millis})", at.format("%Y-%m-%d %H:%M:%S UTC")),
        _ => millis.to_string(),
    }
}
