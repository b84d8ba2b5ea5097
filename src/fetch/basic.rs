use super::client::HttpClient;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Plain `reqwest` client with connect and overall timeouts.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "HTTP client builder failed, using a client without timeouts");
                reqwest::Client::new()
            }
        };
        Self(client)
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
