/*
[INPUT]:  API key + signature
[OUTPUT]: Futures account data (balances per asset)
[POS]:    HTTP layer - user data endpoints (SIGNED)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

use reqwest::Method;
use tracing::{debug, warn};

use crate::http::{BinanceClient, Result};
use crate::types::AccountInfo;

impl BinanceClient {
    /// Futures account snapshot
    ///
    /// GET /fapi/v2/account
    pub async fn account_info(&self) -> Result<AccountInfo> {
        debug!("querying account info");
        let builder = self.signed_request(Method::GET, "/fapi/v2/account", &[])?;
        self.send_json(builder).await.inspect_err(|err| {
            warn!(error = %err, "account info query failed");
        })
    }
}
