//! HTTP client for the tender backend
//!
//! Login sends HTTP basic credentials once; the server answers with a session
//! cookie which the client's cookie store attaches to every later request.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tender_forms::config::ApiConfig;
use tracing::{debug, instrument, warn};

use crate::error::{ApiError, Result};
use crate::models::{Bid, Tender, User};

const LOGIN_PATH: &str = "/api/users/login";
const LOGOUT_PATH: &str = "/api/users/logout";
const CURRENT_USER_PATH: &str = "/api/users/current";
const TENDERS_PATH: &str = "/api/tenders";
const BIDS_PATH: &str = "/api/bids";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the tender REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Client for `base_url` with default settings otherwise
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn expect_json<T: DeserializeOwned>(
        method: &'static str,
        path: &str,
        resp: Response,
    ) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            warn!(method, path, status = status.as_u16(), "request failed");
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.json::<T>().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.http.get(self.url(path)).send().await?;
        Self::expect_json("GET", path, resp).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::expect_json("POST", path, resp).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.http.put(self.url(path)).json(body).send().await?;
        Self::expect_json("PUT", path, resp).await
    }

    /// DELETE; reports whether the server accepted it
    async fn delete(&self, path: &str) -> Result<bool> {
        let resp = self.http.delete(self.url(path)).send().await?;
        let ok = resp.status().is_success();
        if !ok {
            warn!(path, status = resp.status().as_u16(), "delete refused");
        }
        Ok(ok)
    }

    // ---------------------------------------------------------------------
    // Authentication
    // ---------------------------------------------------------------------

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let resp = self
            .http
            .post(self.url(LOGIN_PATH))
            .basic_auth(username, Some(password))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error.unwrap_or_else(|| "Unknown error".to_string()),
                Err(_) => "Login failed".to_string(),
            };
            warn!(status = status.as_u16(), %message, "login refused");
            return Err(ApiError::Login {
                status: status.as_u16(),
                message,
            });
        }

        let user = resp.json::<User>().await?;
        debug!(user = %user.username, "logged in");
        Ok(user)
    }

    /// Ends the session; true when the server acknowledged it
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<bool> {
        let resp = self.http.post(self.url(LOGOUT_PATH)).send().await?;
        Ok(resp.status().is_success())
    }

    /// The logged-in user, or `None` when there is no valid session
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<Option<User>> {
        let resp = self.http.get(self.url(CURRENT_USER_PATH)).send().await?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        Ok(Some(resp.json::<User>().await?))
    }

    // ---------------------------------------------------------------------
    // Tenders
    // ---------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn list_tenders(&self) -> Result<Vec<Tender>> {
        self.get_json(TENDERS_PATH).await
    }

    #[instrument(skip(self))]
    pub async fn get_tender(&self, id: i64) -> Result<Tender> {
        self.get_json(&format!("{}/{}", TENDERS_PATH, id)).await
    }

    #[instrument(skip(self, tender))]
    pub async fn create_tender(&self, tender: &Tender) -> Result<Tender> {
        self.post_json(TENDERS_PATH, tender).await
    }

    #[instrument(skip(self, tender), fields(id = ?tender.id))]
    pub async fn update_tender(&self, tender: &Tender) -> Result<Tender> {
        let id = tender.id.ok_or(ApiError::MissingId("tender"))?;
        self.put_json(&format!("{}/{}", TENDERS_PATH, id), tender).await
    }

    #[instrument(skip(self))]
    pub async fn delete_tender(&self, id: i64) -> Result<bool> {
        self.delete(&format!("{}/{}", TENDERS_PATH, id)).await
    }

    // ---------------------------------------------------------------------
    // Bids
    // ---------------------------------------------------------------------

    /// All bids, or only those for one tender
    #[instrument(skip(self))]
    pub async fn list_bids(&self, tender_id: Option<i64>) -> Result<Vec<Bid>> {
        let path = match tender_id {
            Some(id) => format!("{}?tenderId={}", BIDS_PATH, id),
            None => BIDS_PATH.to_string(),
        };
        self.get_json(&path).await
    }

    #[instrument(skip(self))]
    pub async fn get_bid(&self, id: i64) -> Result<Bid> {
        self.get_json(&format!("{}/{}", BIDS_PATH, id)).await
    }

    #[instrument(skip(self, bid))]
    pub async fn create_bid(&self, bid: &Bid) -> Result<Bid> {
        self.post_json(BIDS_PATH, bid).await
    }

    #[instrument(skip(self, bid), fields(id = ?bid.id))]
    pub async fn update_bid(&self, bid: &Bid) -> Result<Bid> {
        let id = bid.id.ok_or(ApiError::MissingId("bid"))?;
        self.put_json(&format!("{}/{}", BIDS_PATH, id), bid).await
    }

    #[instrument(skip(self))]
    pub async fn delete_bid(&self, id: i64) -> Result<bool> {
        self.delete(&format!("{}/{}", BIDS_PATH, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let client = ApiClient::with_base_url("http://localhost:8888/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8888");
        assert_eq!(client.url(TENDERS_PATH), "http://localhost:8888/api/tenders");
    }

    #[test]
    fn test_default_base_url() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8888");
    }
}
