//! HTTP client for the remote habit service.

use crate::models::{CreateHabit, Habit, TrackRequest, UpdateHabit};
use reqwest::{Client, Method, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("habit service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("habit service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct HabitClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl HabitClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
            http,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Empty without a session, like a disabled query.
    pub async fn list(&self) -> Result<Vec<Habit>, ClientError> {
        if !self.is_authenticated() {
            return Ok(Vec::new());
        }
        let request = self.request(Method::GET, "/habits")?;
        send_json(request).await
    }

    pub async fn get(&self, id: &str) -> Result<Habit, ClientError> {
        let mut request = self.http.get(self.url(&format!("/habits/{id}")));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        send_json(request).await
    }

    pub async fn get_stats(&self, id: &str) -> Result<serde_json::Value, ClientError> {
        let request = self.request(Method::GET, &format!("/habits/{id}/stats"))?;
        send_json(request).await
    }

    pub async fn create(&self, payload: &CreateHabit) -> Result<Habit, ClientError> {
        let request = self.request(Method::POST, "/habits")?.json(payload);
        send_json(request).await
    }

    pub async fn update(&self, id: &str, payload: &UpdateHabit) -> Result<Habit, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/habits/{id}"))?
            .json(payload);
        send_json(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/habits/{id}"))?;
        send(request).await.map(|_| ())
    }

    pub async fn track(&self, id: &str, date: &str) -> Result<Habit, ClientError> {
        self.track_call(id, "track", date).await
    }

    pub async fn untrack(&self, id: &str, date: &str) -> Result<Habit, ClientError> {
        self.track_call(id, "untrack", date).await
    }

    async fn track_call(&self, id: &str, action: &str, date: &str) -> Result<Habit, ClientError> {
        let body = TrackRequest {
            date: date.to_string(),
        };
        let request = self
            .request(Method::POST, &format!("/habits/{id}/{action}"))?
            .json(&body);
        send_json(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticated request; fails before any I/O when no token is configured.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json"))
    }
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(%status, url = %response.url(), "habit service response");
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = send(request).await?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitType;

    fn anonymous() -> HabitClient {
        // Port 9 is discard; nothing here should reach the network.
        HabitClient::new("http://127.0.0.1:9/", None).unwrap()
    }

    #[tokio::test]
    async fn list_without_session_is_empty() {
        let habits = anonymous().list().await.unwrap();
        assert!(habits.is_empty());
    }

    #[tokio::test]
    async fn mutations_fail_fast_without_session() {
        let client = anonymous();
        let payload = CreateHabit {
            name: "Walk".into(),
            color: "#4db6ac".into(),
            kind: HabitType::Boolean,
            target_counter: None,
        };
        assert!(matches!(client.create(&payload).await, Err(ClientError::NotAuthenticated)));
        assert!(matches!(
            client.update("h1", &UpdateHabit::default()).await,
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(client.delete("h1").await, Err(ClientError::NotAuthenticated)));
        assert!(matches!(
            client.track("h1", "2026-01-01").await,
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(
            client.untrack("h1", "2026-01-01").await,
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(client.get_stats("h1").await, Err(ClientError::NotAuthenticated)));
    }

    #[test]
    fn blank_token_counts_as_no_session() {
        let client = HabitClient::new("http://localhost:3000", Some("  ".into())).unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.url("/habits"), "http://localhost:3000/habits");
    }
}
