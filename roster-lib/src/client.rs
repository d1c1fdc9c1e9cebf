//! Main UsersClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::warn;
use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;
use crate::model::User;

/// Public endpoint serving the demo user list.
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Client for the users endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be moved
/// into spawned tasks.
///
/// # Example
///
/// ```ignore
/// use roster_lib::UsersClient;
///
/// let client = UsersClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let users = client.fetch_users().await?;
/// ```
#[derive(Clone, Debug)]
pub struct UsersClient {
    inner: Arc<UsersClientInner>,
}

#[derive(Debug)]
struct UsersClientInner {
    url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl UsersClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> UsersClientBuilder {
        UsersClientBuilder::new()
    }

    /// Fetches the full user list.
    ///
    /// The endpoint takes no parameters and is not paginated; every
    /// filtering, sorting and paging step happens client-side on the result.
    pub async fn fetch_users(&self) -> Result<Vec<User>, Error> {
        debug!("GET {}", self.inner.url);

        let mut request = self.inner.http_client.get(self.inner.url.clone());
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            warn!("users endpoint answered {}", status);
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message).into());
        }

        match serde_json::from_str::<Vec<User>>(&body) {
            Ok(users) => {
                debug!("fetched {} users", users.len());
                Ok(users)
            }
            Err(e) => {
                warn!("users payload did not parse: {}", e);
                Err(ApiError::parse_with_body(e.to_string(), body).into())
            }
        }
    }

    /// Returns the endpoint URL.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout).into(),
            _ => ApiError::Network(err).into(),
        }
    }
}

/// Builder for constructing a [`UsersClient`].
///
/// Every field has a default, so `UsersClient::builder().build()` talks to
/// [`DEFAULT_USERS_URL`] with no request timeout.
///
/// # Example
///
/// ```ignore
/// let client = UsersClient::builder()
///     .url("http://127.0.0.1:8080/users")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct UsersClientBuilder {
    url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl UsersClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_USERS_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the users endpoint URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client, so it is ignored when a
    /// custom client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`UsersClient`].
    ///
    /// Fails with [`ApiError::InvalidUrl`] when the URL does not parse or is
    /// not http(s).
    pub fn build(self) -> Result<UsersClient, Error> {
        let url = Url::parse(&self.url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!("{}: unsupported scheme", self.url)).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(UsersClient {
            inner: Arc::new(UsersClientInner {
                url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for UsersClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
