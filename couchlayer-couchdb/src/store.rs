use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use url::Url;
use couchlayer_core::{
    backend::{StoreBackend, StoreBackendBuilder, UpdateResponse},
    error::{ServerError, StoreError, StoreResult},
};

/// Server address used when none is configured.
pub const DEFAULT_COUCHDB_URL: &str = "http://localhost:5984/";
/// Environment variable read by [`CouchDbStoreBuilder::from_env`].
pub const COUCHDB_URL_ENV: &str = "COUCHDB_URL";

const JSON: &str = "application/json";

/// A CouchDB server reached over HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CouchDbStore {
    client: Client,
    base_url: Url,
}

impl CouchDbStore {
    /// Creates a store from an existing client and the server's base URL.
    ///
    /// A base URL without a trailing slash gets one, so paths resolve beneath it.
    pub fn new(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn builder(url: &str) -> CouchDbStoreBuilder {
        CouchDbStoreBuilder::new(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs one exchange and decodes the 2xx response body as `T`.
    pub async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> StoreResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let bytes = self.send(method, path, body).await?;

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decoding(e.to_string()))
    }

    /// Performs one exchange and returns the raw 2xx response body.
    ///
    /// `path` is resolved against the base URL and must already be percent-encoded.
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> StoreResult<Bytes>
    where
        B: Serialize + ?Sized + Sync,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| StoreError::Encoding(e.to_string()))?;

        tracing::debug!(
            %method,
            path,
            body = %payload.as_deref().map(String::from_utf8_lossy).unwrap_or_default(),
            "couchdb request"
        );

        let url = self
            .base_url
            .join(path)
            .map_err(|e| StoreError::Request(format!("invalid path {path:?}: {e}")))?;

        let mut builder = self.client.request(method, url).header(ACCEPT, JSON);
        if let Some(payload) = payload {
            builder = builder.header(CONTENT_TYPE, JSON).body(payload);
        }
        let request = builder
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::ResponseRead(e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes);

        tracing::debug!(status = status.as_u16(), body = %text, "couchdb response");

        if !status.is_success() {
            return Err(ServerError::new(status.as_u16(), text.into_owned()).into());
        }

        Ok(bytes)
    }
}

#[async_trait]
impl StoreBackend for CouchDbStore {
    async fn create_database(&self, db: &str) -> StoreResult<()> {
        self.send(Method::PUT, db, None::<&Value>).await?;

        Ok(())
    }

    async fn delete_database(&self, db: &str) -> StoreResult<()> {
        self.send(Method::DELETE, db, None::<&Value>).await?;

        Ok(())
    }

    async fn get_document(&self, path: &str) -> StoreResult<Value> {
        self.request(Method::GET, path, None::<&Value>).await
    }

    async fn create_document(&self, db: &str, document: &Value) -> StoreResult<UpdateResponse> {
        self.request(Method::POST, db, Some(document)).await
    }
}

/// Configures and builds a [`CouchDbStore`].
#[derive(Debug, Clone)]
pub struct CouchDbStoreBuilder {
    url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CouchDbStoreBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Reads the server address from `COUCHDB_URL`, falling back to
    /// [`DEFAULT_COUCHDB_URL`].
    pub fn from_env() -> Self {
        Self::new(std::env::var(COUCHDB_URL_ENV).unwrap_or_else(|_| DEFAULT_COUCHDB_URL.to_string()))
    }

    /// Total time allowed for each request, response body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for CouchDbStoreBuilder {
    type Backend = CouchDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let base_url = Url::parse(&self.url)
            .map_err(|e| StoreError::Initialization(format!("invalid url {:?}: {e}", self.url)))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(StoreError::Initialization(format!(
                "unsupported scheme {:?}, expected http or https",
                base_url.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(CouchDbStore::new(
            builder
                .build()
                .map_err(|e| StoreError::Initialization(e.to_string()))?,
            base_url,
        ))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
