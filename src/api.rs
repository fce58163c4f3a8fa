//! REST client for the event-registration backend. Every call is a plain
//! one-shot fetch: no retries, no deduplication, no cancellation. Rapid
//! repeated clicks can put overlapping requests in flight; the last
//! response to land wins.

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::state::{classify_reply, ActionReply};
use crate::types::{
    Badge, BadgesEnvelope, Event, EventsEnvelope, LeaderboardEntry, LeaderboardEnvelope, Session,
    UserRanking,
};

/// Empty means same-origin: the backend serves this frontend.
pub const API_BASE_URL: &str = "";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network request failed")]
    Network,
    #[error("malformed response body")]
    Malformed,
    #[error("server returned status {0}")]
    Status(u16),
}

/// The four mutating per-event endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOp {
    Register,
    Unregister,
    MarkAttendance,
    Complete,
}

impl EventOp {
    pub fn path(self) -> &'static str {
        match self {
            EventOp::Register => "register",
            EventOp::Unregister => "unregister",
            EventOp::MarkAttendance => "mark-attendance",
            EventOp::Complete => "complete",
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            EventOp::Unregister => "DELETE",
            _ => "POST",
        }
    }
}

/// Percent-encodes one URL component (path segment or form value).
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Builds an `application/x-www-form-urlencoded` body.
pub fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

async fn send(method: &str, url: &str, form_body: Option<String>) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or(ApiError::Network)?;

    let headers = Headers::new().map_err(|_| ApiError::Network)?;
    if form_body.is_some() {
        headers
            .set("Content-Type", "application/x-www-form-urlencoded")
            .map_err(|_| ApiError::Network)?;
    }

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &form_body {
        opts.set_body(&JsValue::from_str(body));
    }
    opts.set_headers(&JsValue::from(&headers));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|_| ApiError::Network)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ApiError::Network)?;
    resp_value.dyn_into::<Response>().map_err(|_| ApiError::Network)
}

async fn decode<T: DeserializeOwned>(resp: &Response) -> Result<T, ApiError> {
    let promise = resp.json().map_err(|_| ApiError::Malformed)?;
    let json = JsFuture::from(promise).await.map_err(|_| ApiError::Malformed)?;
    serde_wasm_bindgen::from_value(json).map_err(|_| ApiError::Malformed)
}

/// `GET /events` — the full published collection; callers replace their
/// cache wholesale.
pub async fn fetch_events() -> Result<Vec<Event>, ApiError> {
    let resp = send("GET", &format!("{API_BASE_URL}/events"), None).await?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    let envelope: EventsEnvelope = decode(&resp).await?;
    Ok(envelope.events)
}

/// `GET /leaderboard?limit=N`.
pub async fn fetch_leaderboard(limit: u32) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let url = format!("{API_BASE_URL}/leaderboard?limit={limit}");
    let resp = send("GET", &url, None).await?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    let envelope: LeaderboardEnvelope = decode(&resp).await?;
    Ok(envelope.leaderboard)
}

/// `GET /leaderboard/user/{email}`. A non-2xx response means the user has
/// no ranking record yet, which is the zero state rather than an error.
pub async fn fetch_user_ranking(email: &str) -> Result<Option<UserRanking>, ApiError> {
    let url = format!(
        "{API_BASE_URL}/leaderboard/user/{}",
        encode_component(email)
    );
    let resp = send("GET", &url, None).await?;
    if !resp.ok() {
        return Ok(None);
    }
    Ok(Some(decode(&resp).await?))
}

/// `GET /badges` — the static catalog.
pub async fn fetch_badges() -> Result<Vec<Badge>, ApiError> {
    let resp = send("GET", &format!("{API_BASE_URL}/badges"), None).await?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    let envelope: BadgesEnvelope = decode(&resp).await?;
    Ok(envelope.badges)
}

/// Submits one mutating event action as a form-encoded request and
/// classifies the reply body. Business-rule rejections arrive as `detail`
/// bodies on 4xx statuses, so the body shape decides, not the status.
pub async fn submit_event_action(
    op: EventOp,
    event_id: &str,
    session: &Session,
) -> Result<ActionReply, ApiError> {
    let mut pairs = vec![("user_email", session.email.as_str())];
    if op == EventOp::Register {
        pairs.push(("user_name", session.name.as_str()));
    }
    let body = form_encode(&pairs);

    let url = format!(
        "{API_BASE_URL}/events/{}/{}",
        encode_component(event_id),
        op.path()
    );
    let resp = send(op.method(), &url, Some(body)).await?;
    let value: serde_json::Value = decode(&resp).await?;
    Ok(classify_reply(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_component("ann@mergington.edu"), "ann%40mergington.edu");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("plain-safe_1.0~"), "plain-safe_1.0~");
    }

    #[test]
    fn form_encode_joins_pairs() {
        let body = form_encode(&[
            ("user_email", "ann@mergington.edu"),
            ("user_name", "Ann Lee"),
        ]);
        assert_eq!(body, "user_email=ann%40mergington.edu&user_name=Ann%20Lee");
    }

    #[test]
    fn ops_map_to_backend_routes() {
        assert_eq!(EventOp::Register.path(), "register");
        assert_eq!(EventOp::Register.method(), "POST");
        assert_eq!(EventOp::Unregister.path(), "unregister");
        assert_eq!(EventOp::Unregister.method(), "DELETE");
        assert_eq!(EventOp::MarkAttendance.path(), "mark-attendance");
        assert_eq!(EventOp::MarkAttendance.method(), "POST");
        assert_eq!(EventOp::Complete.path(), "complete");
        assert_eq!(EventOp::Complete.method(), "POST");
    }
}
