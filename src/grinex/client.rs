use std::time::Duration;

use reqwest::{
    StatusCode,
    Url,
};

use thiserror::Error;

use crate::grinex::dto::DepthResponse;



const DEPTH_ENDPOINT: &str = "/api/v2/depth";

// How much of unexpected response body is kept for diagnostics.
const ERROR_BODY_MAX: usize = 256;



#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl {
        url: String,
        reason: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response status: {status}, body: {body:?}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
    },

    #[error("could not decode response as JSON: {0}")]
    Decode(#[from] serde_json::Error),
}



/// Grinex REST API client.
///
/// Holds a single `reqwest::Client`, so connections are pooled and reused
/// between calls. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}



impl Client {
    /// Build client for given base URL, i.e. "https://grinex.io".
    ///
    /// `timeout` applies to a whole request, from connect until body is read.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Self::with_http_client(base_url, http)
    }



    /// Build client that uses preconfigured HTTP client.
    pub fn with_http_client(base_url: &str, http: reqwest::Client)
        -> Result<Self, ClientError>
    {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL can not be a base".to_string()))
        }

        Ok(Self {
            http,
            base_url,
        })
    }



    /// Fetch order book depth for `market`, i.e. "usdtrub".
    ///
    /// Single attempt, no retries. Any status other than 200 is an error.
    pub async fn get_depth(&self, market: &str) -> Result<DepthResponse, ClientError> {
        let mut url = self.base_url.join(DEPTH_ENDPOINT)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("market", market);

        let result = self.http.get(url).send().await?;

        let status = result.status();
        if status != StatusCode::OK {
            let body = error_body(result).await;
            return Err(ClientError::UnexpectedStatus { status, body })
        }

        let b = result.text().await?;
        let decoded: DepthResponse = serde_json::from_str(&b)?;

        Ok(decoded)
    }
}



// Read at most ERROR_BODY_MAX bytes of response body, rest is never
// downloaded. Body is only used for diagnostics, so failing to read it is not
// worth reporting separately.
async fn error_body(mut result: reqwest::Response) -> String {
    let mut buf: Vec<u8> = Vec::with_capacity(ERROR_BODY_MAX);

    while buf.len() < ERROR_BODY_MAX {
        let Ok(Some(chunk)) = result.chunk().await else {
            break
        };

        let take = chunk.len().min(ERROR_BODY_MAX - buf.len());
        buf.extend_from_slice(&chunk[..take]);
    }

    // Cut may land inside a multi-byte character, drop that tail.
    match std::str::from_utf8(&buf) {
        Ok(body) => body.to_string(),
        Err(e) if e.error_len().is_none() => {
            String::from_utf8_lossy(&buf[..e.valid_up_to()]).into_owned()
        }
        Err(..) => String::from_utf8_lossy(&buf).into_owned(),
    }
}
