use crate::errors::{ParleyError, ParleyResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint path on the chatbot server. The field names in the wire
/// structs below are the interop contract; the server is not ours.
pub const GET_RESPONSE_PATH: &str = "/get_response";

#[derive(Debug, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    /// The base URL is injected rather than hardwired so tests can point
    /// the client at a mock server.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ParleyResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParleyError::api_error(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Performs the one round trip: POST the query, decode the reply.
    pub async fn get_response(&self, query: &str) -> ParleyResult<String> {
        let url = format!("{}{}", self.base_url, GET_RESPONSE_PATH);
        log::debug!("POST {} ({} chars)", url, query.len());

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| ParleyError::api_error(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ParleyError::api_error(format!(
                "server returned {}: {}",
                status, error_text
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ParleyError::api_error(format!("failed to parse server response: {}", e)))?;

        log::debug!("reply received ({} chars)", body.response.len());
        Ok(body.response)
    }
}
