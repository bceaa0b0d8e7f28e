//! HTTP plumbing shared by the backends: client timeout, status handling and
//! response decoding.

use std::env;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Backend;
use crate::error::SuggestError;

/// Default request timeout (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable to override the default request timeout.
pub const TIMEOUT_ENV_VAR: &str = "GITCM_HTTP_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from GITCM_HTTP_TIMEOUT if set, otherwise uses the default of
/// 120 seconds. Invalid values are logged and ignored.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

pub(crate) fn build_client() -> Result<Client, SuggestError> {
    Client::builder()
        .timeout(get_timeout())
        .build()
        .map_err(SuggestError::ClientBuild)
}

/// Send a prepared request once and decode a successful JSON body.
///
/// A non-success status yields [`SuggestError::Api`] with the body exactly as
/// received; it is never decoded.
pub(crate) async fn send_json<R: DeserializeOwned>(
    backend: Backend,
    request: RequestBuilder,
) -> Result<R, SuggestError> {
    let response = request
        .send()
        .await
        .map_err(|e| SuggestError::Request { backend, source: e })?;

    let status = response.status();
    debug!("{} responded with {}", backend, status);

    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| SuggestError::Request { backend, source: e })?;
        return Err(SuggestError::Api {
            backend,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SuggestError::Request { backend, source: e })?;

    serde_json::from_slice(&bytes).map_err(|e| SuggestError::InvalidResponse {
        backend,
        message: e.to_string(),
    })
}
