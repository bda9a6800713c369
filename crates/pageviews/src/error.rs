pub use pageviews_core::pageviews::{QueryError, UpstreamError, ViewCountError};

/// Classify a `reqwest` failure into the upstream error taxonomy
///
/// Errors raised before the request leaves (bad URL, bad scheme) and replies
/// that cannot be decoded are dispatch failures. Connect failures, timeouts
/// and connections dropped mid-exchange mean no response was received.
pub fn classify_transport_error(err: &reqwest::Error) -> UpstreamError {
    let cause = error_chain(err);

    if err.is_builder() || err.is_decode() || err.is_redirect() {
        UpstreamError::Dispatch { cause }
    } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        UpstreamError::Unreachable { cause }
    } else {
        UpstreamError::Dispatch { cause }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }

    message
}
