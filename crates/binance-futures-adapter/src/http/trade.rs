/*
[INPUT]:  Order requests with HMAC query signature
[OUTPUT]: Order acknowledgements
[POS]:    HTTP layer - trading endpoints (require API key + signature)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;
use tracing::{debug, warn};

use crate::http::{BinanceClient, Result};
use crate::types::{NewOrderRequest, OrderResponse};

impl BinanceClient {
    /// Create a new order
    ///
    /// POST /fapi/v1/order
    /// Requires: X-MBX-APIKEY header + signature
    pub async fn new_order(&self, req: &NewOrderRequest) -> Result<OrderResponse> {
        debug!(
            symbol = %req.symbol,
            side = %req.side,
            order_type = %req.order_type,
            "submitting new order"
        );
        let builder = self.signed_request(Method::POST, "/fapi/v1/order", &req.to_params())?;
        self.send_json(builder).await.inspect_err(|err| {
            warn!(symbol = %req.symbol, error = %err, "new order failed");
        })
    }
}
