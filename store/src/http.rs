//! Typed HTTP error layer for the remote task store.
//!
//! Classifies transport failures by kind and keeps the HTTP status, the
//! request URL, and a bounded preview of the response body so a failed call
//! can be diagnosed from the log line alone.

use std::{error::Error as StdError, fmt};

use serde::de::DeserializeOwned;

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Unknown,
}

impl StoreHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StoreHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct StoreHttpError {
    kind: StoreHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl StoreHttpError {
    pub fn kind(&self) -> StoreHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            StoreHttpErrorKind::Timeout
        } else if err.is_connect() {
            StoreHttpErrorKind::Connect
        } else if err.is_request() {
            StoreHttpErrorKind::Request
        } else if err.is_body() {
            StoreHttpErrorKind::Body
        } else if err.is_decode() {
            StoreHttpErrorKind::Decode
        } else {
            StoreHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        StoreHttpError {
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    pub(crate) fn status_error(status: u16, url: String, preview: String) -> Self {
        StoreHttpError {
            kind: StoreHttpErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: preview,
            source: None,
        }
    }

    pub(crate) fn decode_error(
        status: u16,
        url: String,
        err: serde_json::Error,
        preview: String,
    ) -> Self {
        let message = format!("failed to decode response body: {} | body={}", err, preview);
        StoreHttpError {
            kind: StoreHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    pub fn is_decode(&self) -> bool {
        self.kind == StoreHttpErrorKind::Decode
    }
}

impl fmt::Display for StoreHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task store http error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for StoreHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

pub(crate) fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Read the body, enforce a success status, and decode it as `T`.
pub(crate) async fn parse_json<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, StoreHttpError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| StoreHttpError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(StoreHttpError::status_error(status.as_u16(), url, preview));
    }

    serde_json::from_str::<T>(&body).map_err(|err| {
        let preview = preview_body(&body);
        StoreHttpError::decode_error(status.as_u16(), url, err, preview)
    })
}

/// Enforce a success status on a response whose body carries no payload we
/// care about.
pub(crate) async fn ensure_success(resp: reqwest::Response) -> Result<(), StoreHttpError> {
    let status = resp.status();
    let url = resp.url().to_string();

    if status.is_success() {
        return Ok(());
    }

    let body = resp
        .text()
        .await
        .map_err(|err| StoreHttpError::from_reqwest(err, url.clone()))?;
    let preview = preview_body(&body);
    Err(StoreHttpError::status_error(status.as_u16(), url, preview))
}
