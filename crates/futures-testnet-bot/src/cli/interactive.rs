/*
[INPUT]:  User input via terminal prompts
[OUTPUT]: Confirmed OrderParams handed to the order flow
[POS]:    CLI interactive flow
[UPDATE]: When the order form fields change
*/

use anyhow::Result;
use binance_futures_adapter::{Side, TimeInForce};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use rust_decimal::Decimal;

use futures_testnet_bot::order::parse_positive_decimal;
use futures_testnet_bot::{OrderKind, OrderParams};

const SIDES: [Side; 2] = [Side::Buy, Side::Sell];
const TIME_IN_FORCE: [TimeInForce; 3] = [TimeInForce::Gtc, TimeInForce::Ioc, TimeInForce::Fok];

/// Ask for one order; `None` when the user declines to send it.
pub fn prompt_order() -> Result<Option<OrderParams>> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Binance Futures Testnet - Create Order").bold().cyan());

    let symbol: String = Input::with_theme(&theme)
        .with_prompt("Symbol (e.g. BTCUSDT, ETHUSDT)")
        .default("BTCUSDT".to_string())
        .interact_text()?;

    let side_index = Select::with_theme(&theme)
        .with_prompt("Side")
        .items(&SIDES.map(Side::as_str))
        .default(0)
        .interact()?;
    let side = SIDES[side_index];

    let kind_index = Select::with_theme(&theme)
        .with_prompt("Order type")
        .items(&OrderKind::ALL.map(OrderKind::as_str))
        .default(0)
        .interact()?;
    let kind = OrderKind::ALL[kind_index];

    let quantity = prompt_decimal(&theme, "Quantity")?;

    let mut params = OrderParams::market(symbol, side, quantity);
    params.kind = kind;

    if kind.needs_price() {
        params.price = Some(prompt_decimal(&theme, "Limit price")?);
    }
    if kind.needs_stop_price() {
        params.stop_price = Some(prompt_decimal(&theme, "Stop price")?);
    }
    if kind.needs_price() {
        let tif_index = Select::with_theme(&theme)
            .with_prompt("Time in force (GTC = Good Till Cancel, IOC = Immediate Or Cancel, FOK = Fill Or Kill)")
            .items(&TIME_IN_FORCE.map(TimeInForce::as_str))
            .default(0)
            .interact()?;
        params.time_in_force = TIME_IN_FORCE[tif_index];
    }

    print_order_preview(&params);

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt("Place this order now?")
        .default(true)
        .interact()?;

    if confirmed {
        Ok(Some(params))
    } else {
        println!("{}", style("Order not sent.").yellow());
        Ok(None)
    }
}

fn prompt_decimal(theme: &ColorfulTheme, prompt: &str) -> Result<Decimal> {
    let text: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| parse_positive_decimal(input).map(|_| ()))
        .interact_text()?;
    parse_positive_decimal(&text).map_err(anyhow::Error::msg)
}

fn print_order_preview(params: &OrderParams) {
    println!("\n{}", style("--- Order Preview ---").bold());
    println!("Symbol      : {}", params.symbol.trim().to_ascii_uppercase());
    println!("Side        : {}", params.side);
    println!("Type        : {}", params.kind);
    println!("Quantity    : {}", params.quantity);
    if let Some(price) = params.price {
        println!("Limit price : {price}");
    }
    if let Some(stop_price) = params.stop_price {
        println!("Stop price  : {stop_price}");
    }
    if params.kind.needs_price() {
        println!("TIF         : {}", params.time_in_force);
    }
}
