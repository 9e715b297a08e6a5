use crate::{BodySnippetConfig, Session};
use http::HeaderMap;

use super::redact::{redact_text, truncate_utf8};

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in [
        "x-soracom-request-id",
        "x-request-id",
        "x-correlation-id",
        "x-amzn-requestid",
        "x-amz-request-id",
    ] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

pub(crate) fn body_snippet(
    body: &[u8],
    config: BodySnippetConfig,
    session: Option<&Session>,
) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    let snippet = truncate_utf8(&body, config.max_bytes).to_string();
    let secrets = session.map(Session::secrets).unwrap_or_default();
    Some(redact_text(snippet, secrets).into_boxed_str())
}
