/*
[INPUT]:  `order` / `account` subcommand arguments and a TradingBot
[OUTPUT]: Printed order result or account summary, process exit code
[POS]:    CLI command layer
[UPDATE]: When changing order flags or the validate -> check -> place flow
*/

use std::process::ExitCode;

use anyhow::Result;
use binance_futures_adapter::{Side, TimeInForce};
use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{info, warn};

use futures_testnet_bot::order::{parse_positive_decimal, parse_time_in_force};
use futures_testnet_bot::report::{self, OutputFormat};
use futures_testnet_bot::{NotionalCheck, OrderKind, OrderParams, TradingBot, check_notional};

#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    /// Pair to trade, e.g. BTCUSDT
    #[arg(long)]
    pub symbol: String,
    #[arg(long, value_name = "BUY|SELL")]
    pub side: Side,
    #[arg(long = "type", value_name = "MARKET|LIMIT|STOP_LIMIT")]
    pub kind: OrderKind,
    #[arg(long, value_parser = parse_positive_decimal)]
    pub quantity: Decimal,
    /// Limit price (LIMIT and STOP_LIMIT)
    #[arg(long, value_parser = parse_positive_decimal)]
    pub price: Option<Decimal>,
    /// Trigger price (STOP_LIMIT only)
    #[arg(long = "stop-price", alias = "stop_price", value_parser = parse_positive_decimal)]
    pub stop_price: Option<Decimal>,
    #[arg(long, value_name = "GTC|IOC|FOK", default_value = "GTC", value_parser = parse_time_in_force)]
    pub tif: TimeInForce,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl OrderArgs {
    pub fn to_params(&self) -> OrderParams {
        OrderParams {
            symbol: self.symbol.clone(),
            side: self.side,
            kind: self.kind,
            quantity: self.quantity,
            price: self.price,
            stop_price: self.stop_price,
            time_in_force: self.tif,
        }
    }
}

/// Validate, pre-check, and place one order.
///
/// Returns failure only when the order was stopped locally; exchange and
/// network errors are printed and still exit successfully.
pub async fn run_order(
    bot: &TradingBot,
    params: OrderParams,
    min_notional: Decimal,
    output: OutputFormat,
) -> Result<ExitCode> {
    let params = match params.validate() {
        Ok(params) => params,
        Err(err) => {
            warn!(error = %err, "order arguments rejected");
            println!("{} {err}", style("Error:").red().bold());
            return Ok(ExitCode::FAILURE);
        }
    };

    match check_notional(bot, &params, min_notional).await {
        NotionalCheck::Passed { notional } => info!(%notional, "notional check passed"),
        NotionalCheck::TooSmall { notional, minimum } => {
            warn!(%notional, %minimum, "order below minimum notional, not sent");
            println!("{}", style(report::notional_too_small(notional, minimum)).yellow());
            return Ok(ExitCode::FAILURE);
        }
        NotionalCheck::Skipped { reason } => {
            println!(
                "{} could not check notional size: {reason}",
                style("Warning:").yellow()
            );
        }
    }

    match bot.place_order(&params).await {
        Ok(order) => println!("{}", report::render_order(&order, output)?),
        Err(err) => println!("{}", style(report::rejection(&err)).red()),
    }

    Ok(ExitCode::SUCCESS)
}

pub async fn run_account(bot: &TradingBot) -> Result<ExitCode> {
    match bot.account_info().await {
        Ok(info) => {
            println!("{}", report::account_summary(&info));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{} {err}", style("Could not load account info:").red());
            Ok(ExitCode::FAILURE)
        }
    }
}
