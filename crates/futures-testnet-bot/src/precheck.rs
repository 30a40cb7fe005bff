/*
[INPUT]:  Validated OrderParams, minimum notional, mark price lookup
[OUTPUT]: NotionalCheck verdict for the order
[POS]:    Domain layer - pre-submission notional check
[UPDATE]: When changing how order value is estimated
*/

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::bot::TradingBot;
use crate::order::OrderParams;

/// Advice shown when an order is stopped before submission
pub const TOO_SMALL_HINT: &str = "Try increasing quantity or using a cheaper symbol.";

/// Advice shown when the exchange rejects an order with code -4164
pub const MIN_NOTIONAL_REJECTION_HINT: &str =
    "This usually means price * quantity is below 100 USDT. Adjust the size or pick another symbol and try again.";

/// Outcome of the notional pre-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionalCheck {
    Passed { notional: Decimal },
    /// The order must not be sent
    TooSmall { notional: Decimal, minimum: Decimal },
    /// No price to estimate with; the exchange decides
    Skipped { reason: String },
}

impl NotionalCheck {
    pub fn allows_submission(&self) -> bool {
        !matches!(self, NotionalCheck::TooSmall { .. })
    }
}

/// Estimate the order value and compare it with `minimum`.
///
/// LIMIT and STOP_LIMIT use their limit price; MARKET uses the current mark
/// price.
pub async fn check_notional(
    bot: &TradingBot,
    params: &OrderParams,
    minimum: Decimal,
) -> NotionalCheck {
    let price = match params.reference_price() {
        Some(price) => price,
        None => match bot.mark_price(&params.symbol).await {
            Ok(mark) => mark.mark_price,
            Err(err) => {
                warn!(
                    symbol = %params.symbol,
                    error = %err,
                    "could not fetch mark price, skipping notional check"
                );
                return NotionalCheck::Skipped {
                    reason: format!("could not fetch mark price for {}: {err}", params.symbol),
                };
            }
        },
    };

    evaluate(price, params.quantity, minimum)
}

fn evaluate(price: Decimal, quantity: Decimal, minimum: Decimal) -> NotionalCheck {
    let Some(notional) = price.checked_mul(quantity) else {
        warn!(%price, %quantity, "order value overflows, skipping notional check");
        return NotionalCheck::Skipped {
            reason: format!("price {price} * quantity {quantity} is too large to estimate"),
        };
    };
    debug!(%price, %quantity, %notional, %minimum, "notional estimate");
    if notional < minimum {
        NotionalCheck::TooSmall { notional, minimum }
    } else {
        NotionalCheck::Passed { notional }
    }
}
