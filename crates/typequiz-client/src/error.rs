//! Mapping of transport failures onto `RequestError`.

use typequiz_core::error::RequestError;

/// Classify a reqwest error raised while sending or reading a request.
pub(crate) fn classify(err: reqwest::Error, base_url: &str) -> RequestError {
    if err.is_decode() {
        RequestError::Decode(err.to_string())
    } else if err.is_connect() {
        RequestError::Network(format!("quiz server not reachable at {base_url}: {err}"))
    } else if err.is_timeout() {
        RequestError::Network(format!("request to {base_url} timed out"))
    } else if let Some(status) = err.status() {
        RequestError::Status {
            status: status.as_u16(),
        }
    } else {
        RequestError::Network(err.to_string())
    }
}

/// Turn a non-success HTTP status into a `RequestError`.
pub(crate) fn check_status(response: &reqwest::Response) -> Result<(), RequestError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(RequestError::Status {
            status: status.as_u16(),
        })
    }
}
