/*
[INPUT]:  Query strings and the API secret
[OUTPUT]: Hex-encoded HMAC-SHA256 request signatures
[POS]:    HTTP layer - request signing for SIGNED endpoints
[UPDATE]: When changing signing algorithm or signature format
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs request payloads for SIGNED endpoints
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Create a new request signer with the given API secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Hex HMAC-SHA256 of the query string, as Binance expects
    ///
    /// The payload is the full query string (or form body) without the
    /// `signature` parameter. Returns lowercase hex.
    pub fn sign(&self, payload: &str) -> String {
        hex::encode(self.mac(payload).finalize().into_bytes())
    }

    /// Verify a hex signature in constant time
    pub fn verify(&self, payload: &str, signature: &str) -> bool {
        let Ok(bytes) = hex::decode(signature) else {
            return false;
        };
        self.mac(payload).verify_slice(&bytes).is_ok()
    }

    fn mac(&self, payload: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac
    }
}
