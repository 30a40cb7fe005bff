/*
[INPUT]:  futures-testnet-bot binary, mock exchange
[OUTPUT]: Exit code and printed output verification
[POS]:    Integration test layer - CLI process behaviour
[UPDATE]: When changing CLI flags, printed text, or exit codes
*/

use std::path::Path;
use std::process::Output;

use tokio::process::Command;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bot_command(base_url: &str, work_dir: &Path) -> Command {
    let binary_path = env!("CARGO_BIN_EXE_futures-testnet-bot");
    let mut command = Command::new(binary_path);
    command
        .env_clear()
        .env("BINANCE_API_KEY", "cli-key")
        .env("BINANCE_API_SECRET", "cli-secret")
        .env("BINANCE_BASE_URL", base_url)
        .current_dir(work_dir)
        .arg("--log-level")
        .arg("warn")
        .arg("--log-dir")
        .arg(work_dir.join("logs"));
    command
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn describe(output: &Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[tokio::test]
async fn limit_without_price_exits_with_failure() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args(["order", "--symbol", "BTCUSDT", "--side", "BUY", "--type", "LIMIT", "--quantity", "0.01"])
        .output()
        .await
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
    assert!(stdout(&output).contains("Limit price must be set and > 0 for LIMIT orders."));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn missing_credentials_fail_fast() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command("http://127.0.0.1:9", dir.path())
        .env_remove("BINANCE_API_KEY")
        .env_remove("BINANCE_API_SECRET")
        .arg("account")
        .output()
        .await
        .expect("run binary");

    assert!(!output.status.success(), "{}", describe(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("API credentials not found"));
}

#[tokio::test]
async fn small_notional_is_not_sent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args([
            "order", "--symbol", "BTCUSDT", "--side", "SELL", "--type", "LIMIT", "--quantity", "0.001",
            "--price", "30000",
        ])
        .output()
        .await
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
    let text = stdout(&output);
    assert!(text.contains("Order not sent:"));
    assert!(text.contains("estimated notional = 30.00 USDT"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn market_order_prints_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fapi/v1/premiumIndex"))
        .and(query_param("symbol", "BTCUSDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "symbol": "BTCUSDT",
            "markPrice": "65000.0"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(query_param("type", "MARKET"))
        .and(query_param("side", "BUY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": 1001,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "tb-cli",
            "price": "0",
            "origQty": "0.002",
            "executedQty": "0",
            "type": "MARKET",
            "side": "BUY",
            "updateTime": 1_700_000_000_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args(["order", "--symbol", "btcusdt", "--side", "buy", "--type", "market", "--quantity", "0.002"])
        .output()
        .await
        .expect("run binary");

    assert!(output.status.success(), "{}", describe(&output));
    let text = stdout(&output);
    assert!(text.contains("--- Order Result ---"));
    assert!(text.contains("Order ID    : 1001"));
    assert!(text.contains("Client ID   : tb-cli"));
    assert!(dir.path().join("logs").is_dir());
}

#[tokio::test]
async fn order_is_sent_when_mark_price_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fapi/v1/premiumIndex"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(query_param("type", "MARKET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": 1002,
            "symbol": "ETHUSDT",
            "status": "NEW",
            "clientOrderId": "tb-skip",
            "origQty": "0.5",
            "type": "MARKET",
            "side": "SELL",
            "updateTime": 1_700_000_000_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args(["order", "--symbol", "ETHUSDT", "--side", "SELL", "--type", "MARKET", "--quantity", "0.5"])
        .output()
        .await
        .expect("run binary");

    assert_eq!(output.status.code(), Some(0), "{}", describe(&output));
    let text = stdout(&output);
    assert!(text.contains("could not check notional size"));
    assert!(text.contains("Order ID    : 1002"));
}

#[tokio::test]
async fn post_only_time_in_force_is_refused() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args([
            "order", "--symbol", "BTCUSDT", "--side", "BUY", "--type", "LIMIT", "--quantity", "0.01",
            "--price", "61000", "--tif", "GTX",
        ])
        .output()
        .await
        .expect("run binary");

    assert!(!output.status.success(), "{}", describe(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected GTC, IOC or FOK"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn exchange_rejection_is_reported_and_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -4164,
            "msg": "Order's notional must be no smaller than 100"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args([
            "order", "--symbol", "ETHUSDT", "--side", "BUY", "--type", "STOP_LIMIT", "--quantity", "1",
            "--price", "3000", "--stop-price", "2990", "--output", "json",
        ])
        .output()
        .await
        .expect("run binary");

    assert!(output.status.success(), "{}", describe(&output));
    let text = stdout(&output);
    assert!(text.contains("Order rejected by Binance:"));
    assert!(text.contains("code   : -4164"));
    assert!(text.contains("below 100 USDT"));
}

#[tokio::test]
async fn json_output_is_machine_readable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": 77,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "price": "61000",
            "origQty": "0.01",
            "type": "LIMIT",
            "side": "SELL",
            "timeInForce": "GTC"
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = bot_command(&server.uri(), dir.path())
        .args([
            "order", "--symbol", "BTCUSDT", "--side", "SELL", "--type", "LIMIT", "--quantity", "0.01",
            "--price", "61000", "--output", "json",
        ])
        .output()
        .await
        .expect("run binary");

    assert!(output.status.success(), "{}", describe(&output));
    let value: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("stdout is JSON");
    assert_eq!(value["orderId"], 77);
    assert_eq!(value["type"], "LIMIT");
}
