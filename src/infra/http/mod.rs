//! `PostService` over HTTP: multipart writes, JSON reads.

mod multipart;

use async_trait::async_trait;
use blogdesk_api_types::{ErrorBody, Post};
use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::application::{CancelToken, PostPayload, PostService, ServiceError, ServiceResponse};
use crate::config::ApiSettings;

use super::error::InfraError;

pub use multipart::post_form;

const POSTS: &str = "posts";

#[derive(Clone, Debug)]
pub struct HttpPostService {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpPostService {
    pub fn new(api: &ApiSettings) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(api.timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self {
            client,
            base: api.base_url.clone(),
            token: api.token.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ServiceError::Request(format!("base url `{}` cannot carry a path", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send one request and collect the body, mapping non-2xx to `Server`.
    async fn exchange(
        &self,
        method: Method,
        url: Url,
        payload: Option<PostPayload>,
        cancel: &CancelToken,
    ) -> Result<(u16, Bytes), ServiceError> {
        let mut req = self.request(method.clone(), url.clone());
        if let Some(payload) = payload {
            req = req.multipart(post_form(payload)?);
        }

        let send = async {
            let resp = req.send().await?;
            let status = resp.status();
            let body = resp.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match cancel.run(send).await? {
            Ok(parts) => parts,
            Err(err) => {
                warn!(%method, path = url.path(), error = %err, "request failed before a response");
                return Err(ServiceError::Network(err.to_string()));
            }
        };

        debug!(%method, path = url.path(), status = status.as_u16(), "response received");
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message);
            warn!(%method, path = url.path(), status = status.as_u16(), ?message, "server rejected request");
            return Err(ServiceError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok((status.as_u16(), body))
    }

    async fn read<T: DeserializeOwned>(
        &self,
        url: Url,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<T>, ServiceError> {
        let (status, body) = self.exchange(Method::GET, url, None, cancel).await?;
        let data = serde_json::from_slice(&body).map_err(|err| {
            warn!(error = %err, "response body did not decode");
            ServiceError::Decode(err.to_string())
        })?;
        Ok(ServiceResponse::new(status, data))
    }

    async fn write(
        &self,
        method: Method,
        url: Url,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError> {
        let (status, body) = self.exchange(method, url, Some(payload), cancel).await?;
        Ok(ServiceResponse::new(status, lenient_json(&body)))
    }
}

/// Success bodies of writes are informational; never fail a persisted write on them.
fn lenient_json(body: &[u8]) -> serde_json::Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

#[async_trait]
impl PostService for HttpPostService {
    #[instrument(skip_all, fields(title = %payload.title))]
    async fn create(
        &self,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError> {
        let url = self.endpoint(&[POSTS])?;
        self.write(Method::POST, url, payload, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn get_by_id(
        &self,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<Post>, ServiceError> {
        let url = self.endpoint(&[POSTS, id])?;
        self.read(url, cancel).await
    }

    #[instrument(skip_all)]
    async fn get_all(
        &self,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<Vec<Post>>, ServiceError> {
        let url = self.endpoint(&[POSTS])?;
        self.read(url, cancel).await
    }

    #[instrument(skip(self, payload, cancel))]
    async fn update(
        &self,
        id: &str,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError> {
        let url = self.endpoint(&[POSTS, id])?;
        self.write(Method::PUT, url, payload, cancel).await
    }
}
