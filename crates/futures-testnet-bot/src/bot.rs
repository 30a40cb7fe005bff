/*
[INPUT]:  BotConfig credentials and validated OrderParams
[OUTPUT]: Order acknowledgements, account info, mark prices
[POS]:    Service layer - order placement on top of the exchange client
[UPDATE]: When adding order flows or changing what gets logged
*/

use binance_futures_adapter::{
    AccountInfo, BinanceClient, BinanceError, Credentials, MarkPrice, OrderResponse, Side,
    TimeInForce,
};
use rust_decimal::Decimal;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::BotConfig;
use crate::order::OrderParams;

const CLIENT_ORDER_ID_PREFIX: &str = "tb-";

/// Thin wrapper that places orders and logs every request and outcome
#[derive(Debug)]
pub struct TradingBot {
    client: BinanceClient,
    testnet: bool,
}

impl TradingBot {
    pub fn from_config(config: &BotConfig) -> Result<Self, BinanceError> {
        let mut client =
            BinanceClient::with_config_and_base_url(config.client_config(), config.base_url())?;
        client.set_credentials(Credentials::new(
            config.api_key.clone(),
            config.api_secret.clone(),
        ));

        info!(
            testnet = config.testnet,
            base_url = %client.base_url(),
            "initialized trading bot (testnet={})",
            config.testnet
        );

        Ok(Self {
            client,
            testnet: config.testnet,
        })
    }

    pub fn is_testnet(&self) -> bool {
        self.testnet
    }

    pub fn client(&self) -> &BinanceClient {
        &self.client
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> Result<OrderResponse, BinanceError> {
        self.place_order(&OrderParams::market(symbol, side, quantity))
            .await
    }

    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<OrderResponse, BinanceError> {
        let params =
            OrderParams::limit(symbol, side, quantity, price).with_time_in_force(time_in_force);
        self.place_order(&params).await
    }

    /// Limit order that rests until the mark price crosses `stop_price`
    pub async fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<OrderResponse, BinanceError> {
        let params = OrderParams::stop_limit(symbol, side, quantity, price, stop_price)
            .with_time_in_force(time_in_force);
        self.place_order(&params).await
    }

    /// Send an order; callers are expected to have validated `params`.
    pub async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, BinanceError> {
        let client_order_id = new_client_order_id();
        info!(
            client_order_id = %client_order_id,
            symbol = %params.symbol,
            side = %params.side,
            kind = %params.kind,
            quantity = %params.quantity,
            price = ?params.price,
            stop_price = ?params.stop_price,
            time_in_force = %params.time_in_force,
            "placing order"
        );

        let request = params.to_request(Some(client_order_id.clone()));
        match self.client.new_order(&request).await {
            Ok(response) => {
                info!(
                    client_order_id = %client_order_id,
                    order_id = response.order_id,
                    status = %response.status,
                    response = ?response,
                    "order placed"
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    client_order_id = %client_order_id,
                    symbol = %params.symbol,
                    code = ?err.api_code(),
                    error = %err,
                    "order failed"
                );
                Err(err)
            }
        }
    }

    pub async fn account_info(&self) -> Result<AccountInfo, BinanceError> {
        self.client
            .account_info()
            .await
            .inspect_err(|err| error!(error = %err, "account info request failed"))
    }

    pub async fn mark_price(&self, symbol: &str) -> Result<MarkPrice, BinanceError> {
        self.client.mark_price(symbol).await
    }
}

fn new_client_order_id() -> String {
    format!("{CLIENT_ORDER_ID_PREFIX}{}", Uuid::new_v4().simple())
}
