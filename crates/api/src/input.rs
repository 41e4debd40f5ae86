//! Request input shared by the data routes.
//!
//! Data routes accept GET and POST alike: GET carries parameters in the query
//! string, any other method carries them in a JSON body. The body is kept
//! unread until a handler asks for it, so handlers can reject requests (e.g.
//! when the store is down) before anything is buffered or parsed.

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{FromRequest, Request};
use axum::http::{Method, Uri};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::convert::Infallible;
use url::form_urlencoded;

pub struct RequestInput {
    method: Method,
    uri: Uri,
    body: Body,
}

impl<S> FromRequest<S> for RequestInput
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        Ok(Self {
            method: parts.method,
            uri: parts.uri,
            body,
        })
    }
}

impl RequestInput {
    pub fn new(method: Method, uri: Uri, body: impl Into<Body>) -> Self {
        Self {
            method,
            uri,
            body: body.into(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// First value of a query string parameter, regardless of method
    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.uri.query()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    /// Decode the query string. A repeated key keeps its first value and
    /// every value is a string.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, String> {
        let mut params = Map::new();
        if let Some(query) = self.uri.query() {
            for (name, value) in form_urlencoded::parse(query.as_bytes()) {
                params
                    .entry(name.into_owned())
                    .or_insert_with(|| Value::String(value.into_owned()));
            }
        }
        serde_json::from_value(Value::Object(params)).map_err(|e| e.to_string())
    }

    /// Read the whole body. No size limit is applied.
    pub async fn bytes(self) -> Result<Bytes, String> {
        to_bytes(self.body, usize::MAX)
            .await
            .map_err(|e| e.to_string())
    }

    /// Read and decode the JSON body
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, String> {
        let body = self.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| e.to_string())
    }

    /// Decode parameters from the query string on GET, from the JSON body otherwise
    pub async fn params<T: DeserializeOwned>(self) -> Result<T, String> {
        if self.is_get() {
            self.query()
        } else {
            self.json().await
        }
    }
}
