/*
[INPUT]:  Symbol identifiers
[OUTPUT]: Connectivity checks, server time, mark price
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use reqwest::Method;
use tracing::{debug, warn};

use crate::http::{BinanceClient, Result};
use crate::types::{EmptyResponse, MarkPrice, ServerTime};

impl BinanceClient {
    /// Test connectivity
    ///
    /// GET /fapi/v1/ping
    pub async fn ping(&self) -> Result<()> {
        let builder = self.public_request(Method::GET, "/fapi/v1/ping", &[])?;
        let _: EmptyResponse = self.send_json(builder).await?;
        Ok(())
    }

    /// Exchange server time in milliseconds
    ///
    /// GET /fapi/v1/time
    pub async fn server_time(&self) -> Result<ServerTime> {
        let builder = self.public_request(Method::GET, "/fapi/v1/time", &[])?;
        self.send_json(builder).await
    }

    /// Mark price and funding snapshot for a symbol
    ///
    /// GET /fapi/v1/premiumIndex?symbol={symbol}
    pub async fn mark_price(&self, symbol: &str) -> Result<MarkPrice> {
        debug!(symbol, "querying mark price");
        let builder = self.public_request(
            Method::GET,
            "/fapi/v1/premiumIndex",
            &[("symbol", symbol.to_string())],
        )?;
        self.send_json(builder).await.inspect_err(|err| {
            warn!(symbol, error = %err, "mark price query failed");
        })
    }
}
