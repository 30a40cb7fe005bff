/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-futures-adapter tests

use binance_futures_adapter::{BinanceClient, ClientConfig, Credentials};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server with test credentials
pub fn signed_client(server: &MockServer) -> BinanceClient {
    let mut client = BinanceClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    client.set_credentials(Credentials::new(TEST_API_KEY, TEST_API_SECRET));
    client
}

/// Minimal order acknowledgement as the testnet sends it
pub fn order_ack(order_type: &str, side: &str) -> serde_json::Value {
    serde_json::json!({
        "orderId": 1001,
        "symbol": "BTCUSDT",
        "status": "NEW",
        "clientOrderId": "tb-test",
        "price": "0",
        "avgPrice": "0.00",
        "origQty": "0.002",
        "executedQty": "0",
        "cumQuote": "0",
        "timeInForce": "GTC",
        "type": order_type,
        "reduceOnly": false,
        "side": side,
        "stopPrice": "0",
        "workingType": "CONTRACT_PRICE",
        "updateTime": 1_700_000_000_000_i64
    })
}
