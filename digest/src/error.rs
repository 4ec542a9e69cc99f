use thiserror::Error;
use warp::http::StatusCode;
use warp::{reject::Reject, Rejection, Reply};

/// Failures raised by the pipeline stages. None of the stages catch
/// these internally; they bubble up to the HTTP handler unchanged.
#[derive(Error, Debug)]
pub enum DigestError {
    /// Transport-level failure reaching a remote endpoint.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Endpoint reachable but returned an error status or a response
    /// violating the expected contract.
    #[error("service error: {0}")]
    Service(String),

    /// Fetched document body is not well-formed XML.
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pipeline(#[from] DigestError),
}

impl Reject for ApiError {}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(api_err) = err.find::<ApiError>() {
        let (code, message) = match api_err {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad request"),
            ApiError::Pipeline(DigestError::Network(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream service unreachable")
            }
            ApiError::Pipeline(DigestError::Service(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream service error")
            }
            ApiError::Pipeline(DigestError::Parse(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream response malformed")
            }
        };

        let json = warp::reply::json(&serde_json::json!({
            "error": message,
            "details": api_err.to_string(),
        }));

        Ok(warp::reply::with_status(json, code))
    } else {
        Err(err)
    }
}
