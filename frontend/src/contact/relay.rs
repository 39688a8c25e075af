use async_trait::async_trait;
use gloo_net::http::Request;
use log::debug;
use thiserror::Error;
use web_sys::FormData;

use super::payload::FormPayload;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("relay responded with status {0}")]
    Status(u16),
    #[error("could not build request body: {0}")]
    Body(String),
}

/// Result of handing one payload to the relay.
#[derive(Debug)]
pub enum Delivery {
    Delivered,
    Failed(RelayError),
}

impl From<Result<(), RelayError>> for Delivery {
    fn from(result: Result<(), RelayError>) -> Self {
        match result {
            Ok(()) => Delivery::Delivered,
            Err(e) => Delivery::Failed(e),
        }
    }
}

#[async_trait(?Send)]
pub trait Relay {
    async fn deliver(&self, payload: &FormPayload) -> Delivery;
}

/// Posts the payload as multipart form data to a hosted form relay.
pub struct HttpRelay {
    url: String,
}

impl HttpRelay {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    async fn post(&self, payload: &FormPayload) -> Result<(), RelayError> {
        let body = FormData::new().map_err(|e| RelayError::Body(format!("{:?}", e)))?;
        for (name, value) in payload.iter() {
            body.append_with_str(name, value)
                .map_err(|e| RelayError::Body(format!("{:?}", e)))?;
        }

        debug!("Posting {} form entries to {}", payload.len(), self.url);
        let response = Request::post(&self.url)
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await?;

        if !response.ok() {
            return Err(RelayError::Status(response.status()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Relay for HttpRelay {
    async fn deliver(&self, payload: &FormPayload) -> Delivery {
        self.post(payload).await.into()
    }
}
