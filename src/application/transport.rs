// Transport boundary for HTTP submission
use async_trait::async_trait;

/// Status code and raw body of an HTTP exchange that completed, even
/// unsuccessfully. Failing to complete the exchange at all is the
/// `Err` side of `post_json`.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The only boundary dependency of the client: something that can POST
/// a JSON body and report back the status code and body.
///
/// Implementations must send the payload with a
/// `Content-Type: application/json` header.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<TransportResponse>;
}
