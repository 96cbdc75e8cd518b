//! Test client helpers.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Drives a router in-process, optionally as an authenticated caller.
pub struct TestClient {
    app: Router,
    token: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, token: None }
    }

    /// Returns a client that sends `token` as its bearer token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            app: self.app.clone(),
            token: Some(token.into()),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None, Body::empty()).await
    }

    pub async fn patch_json(&self, uri: &str, json: serde_json::Value) -> TestResponse {
        self.send("PATCH", uri, Some("application/json"), Body::from(json.to_string()))
            .await
    }

    pub async fn patch_raw(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send("PATCH", uri, Some(content_type), Body::from(body.to_string()))
            .await
    }

    pub async fn post_bytes(
        &self,
        uri: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> TestResponse {
        self.send("POST", uri, content_type, Body::from(bytes)).await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().uri(uri).method(method);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        self.request(builder.body(body).unwrap()).await
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        TestResponse::from_response(response).await
    }
}

/// Collected response with assertion helpers.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Body is not valid UTF-8")
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Asserts the `code` field of an error body.
    pub fn assert_error_code(&self, expected: &str) -> &Self {
        let body: serde_json::Value = self.json();
        assert_eq!(body["code"], expected, "Body: {}", self.text());
        self
    }
}
