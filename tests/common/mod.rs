//! Shared harness: an in-memory app driven through `tower::ServiceExt`,
//! with a cookie jar holding the session cookie between requests.

#![allow(dead_code, clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use flaskr::api::build_router;
use flaskr::app_state::AppState;
use flaskr::config::AuthConfig;
use flaskr::persistence::{EntryStore, Schema};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin";

/// A rendered response.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> serde_json::Value {
        let Ok(value) = serde_json::from_str(&self.body) else {
            panic!("body is not JSON: {}", self.body);
        };
        value
    }
}

/// A browser-like client with one cookie slot.
#[derive(Debug)]
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub async fn new() -> Self {
        Self::with_schema(Schema::Entries).await
    }

    pub async fn with_schema(schema: Schema) -> Self {
        let Ok(store) = EntryStore::in_memory(schema).await else {
            panic!("in-memory store");
        };
        Self::from_state(AppState::new(store, &AuthConfig::default()))
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            app: build_router(state),
            cookie: None,
        }
    }

    /// A second client with its own cookie jar against the same app.
    pub fn fresh_session(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    pub fn set_raw_cookie(&mut self, cookie: &str) {
        self.cookie = Some(cookie.to_string());
    }

    pub async fn get(&mut self, path: &str) -> Reply {
        let request = self.request("GET", path).body(Body::empty());
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Reply {
        let request = self
            .request("POST", path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)));
        self.send(request).await
    }

    /// Follows a `303 See Other` with a GET, like a browser.
    pub async fn follow(&mut self, reply: Reply) -> Reply {
        match (reply.status, reply.location.clone()) {
            (StatusCode::SEE_OTHER, Some(location)) => self.get(&location).await,
            _ => reply,
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Reply {
        let reply = self
            .post_form("/login", &[("username", username), ("password", password)])
            .await;
        self.follow(reply).await
    }

    pub async fn logout(&mut self) -> Reply {
        let reply = self.get("/logout").await;
        self.follow(reply).await
    }

    pub async fn add(&mut self, title: &str, text: &str) -> Reply {
        let reply = self.post_form("/add", &[("title", title), ("text", text)]).await;
        self.follow(reply).await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie.as_str());
        }
        builder
    }

    async fn send(&mut self, request: Result<Request<Body>, axum::http::Error>) -> Reply {
        let Ok(request) = request else {
            panic!("invalid request");
        };
        let response = match self.app.clone().oneshot(request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        };

        if let Some(set_cookie) = response.headers().get(SET_COOKIE)
            && let Ok(set_cookie) = set_cookie.to_str()
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("unreadable body");
        };
        Reply {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// `application/x-www-form-urlencoded` encoding.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            other => format!("%{other:02X}"),
        })
        .collect()
}
