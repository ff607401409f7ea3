//! HTTP gateway
//!
//! Every backend call goes through [`ApiGateway`]. Request stages run on
//! the outgoing request in registration order; response stages see the
//! status of every response, success or not, before it is decoded.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use domain::Page;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Source of the bearer credential and sink for credential refusals
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Credential to attach, if any
    fn bearer_token(&self) -> Option<String>;

    /// Called once per 401 response to a request that carried `refused`
    async fn on_unauthorized(&self, refused: &str);
}

/// Transform applied to every outgoing request
pub trait RequestStage: Send + Sync {
    /// Decorate the request
    fn apply(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Hook invoked with the status of every response
#[async_trait]
pub trait ResponseStage: Send + Sync {
    /// Observe the status along with the bearer credential the request carried
    async fn inspect(&self, status: StatusCode, credential: Option<&str>);
}

/// Attaches `Authorization: Bearer <credential>` when one is held
pub struct BearerAuth {
    source: Arc<dyn CredentialSource>,
}

impl BearerAuth {
    /// Create the stage
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        Self { source }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl RequestStage for BearerAuth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self.source.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Reports every 401 to the credential source
///
/// Requests sent without a credential are not reported.
pub struct UnauthorizedReset {
    source: Arc<dyn CredentialSource>,
}

impl UnauthorizedReset {
    /// Create the stage
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        Self { source }
    }
}

impl fmt::Debug for UnauthorizedReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnauthorizedReset").finish_non_exhaustive()
    }
}

#[async_trait]
impl ResponseStage for UnauthorizedReset {
    async fn inspect(&self, status: StatusCode, credential: Option<&str>) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        match credential {
            Some(refused) => {
                warn!("Backend refused the credential");
                self.source.on_unauthorized(refused).await;
            },
            None => debug!("401 for a request without a credential"),
        }
    }
}

/// Builder for [`ApiGateway`]
pub struct ApiGatewayBuilder {
    config: ApiConfig,
    request_stages: Vec<Arc<dyn RequestStage>>,
    response_stages: Vec<Arc<dyn ResponseStage>>,
}

impl fmt::Debug for ApiGatewayBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiGatewayBuilder")
            .field("config", &self.config)
            .field("request_stages", &self.request_stages.len())
            .field("response_stages", &self.response_stages.len())
            .finish()
    }
}

impl ApiGatewayBuilder {
    /// Append a request stage
    #[must_use]
    pub fn request_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.request_stages.push(Arc::new(stage));
        self
    }

    /// Append a response stage
    #[must_use]
    pub fn response_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.response_stages.push(Arc::new(stage));
        self
    }

    /// Validate the configuration and build the HTTP client
    pub fn build(self) -> Result<ApiGateway, ApiError> {
        self.config.validate()?;
        let client = Client::builder()
            .timeout(self.config.timeout())
            .user_agent(self.config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(ApiGateway {
            client,
            config: Arc::new(self.config),
            request_stages: self.request_stages.into(),
            response_stages: self.response_stages.into(),
            cancel: None,
        })
    }
}

/// Shared HTTP entry point for all resource clients
///
/// Cloning is cheap; clones share the connection pool and stages.
#[derive(Clone)]
pub struct ApiGateway {
    client: Client,
    config: Arc<ApiConfig>,
    request_stages: Arc<[Arc<dyn RequestStage>]>,
    response_stages: Arc<[Arc<dyn ResponseStage>]>,
    cancel: Option<CancellationToken>,
}

impl fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.config.base_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .field("request_stages", &self.request_stages.len())
            .field("response_stages", &self.response_stages.len())
            .field("scoped", &self.cancel.is_some())
            .finish()
    }
}

impl ApiGateway {
    /// Start composing a gateway
    pub fn builder(config: ApiConfig) -> ApiGatewayBuilder {
        ApiGatewayBuilder {
            config,
            request_stages: Vec::new(),
            response_stages: Vec::new(),
        }
    }

    /// Gateway without stages
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Self::builder(config).build()
    }

    /// Gateway with the bearer and 401 stages wired to `source`
    pub fn with_credentials(
        config: ApiConfig,
        source: Arc<dyn CredentialSource>,
    ) -> Result<Self, ApiError> {
        Self::builder(config)
            .request_stage(BearerAuth::new(Arc::clone(&source)))
            .response_stage(UnauthorizedReset::new(source))
            .build()
    }

    /// Copy of this gateway whose requests stop when `token` fires
    #[must_use]
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET` and decode
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.guarded(async {
            let response = self.send(Method::GET, path, true, |r| r).await?;
            self.decode(response).await
        })
        .await
    }

    /// `GET` with query parameters and decode
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        self.guarded(async {
            let response = self
                .send(Method::GET, path, true, |r| r.query(query))
                .await?;
            self.decode(response).await
        })
        .await
    }

    /// `GET` a list, forwarding `skip` and `limit` verbatim
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        page: Page,
    ) -> Result<Vec<T>, ApiError> {
        self.get_with_query(path, &page.query()).await
    }

    /// `POST` a JSON body and decode
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.with_body(Method::POST, path, body, true).await
    }

    /// `POST` without stages
    ///
    /// Used for authentication: no credential is attached and a 401 is not
    /// reported to the credential source.
    pub async fn post_anonymous<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.with_body(Method::POST, path, body, false).await
    }

    /// `PUT` a JSON body and decode
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.with_body(Method::PUT, path, body, true).await
    }

    /// `PATCH` a JSON body and decode
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.with_body(Method::PATCH, path, body, true).await
    }

    /// `PATCH` without a body and decode
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.guarded(async {
            let response = self.send(Method::PATCH, path, true, |r| r).await?;
            self.decode(response).await
        })
        .await
    }

    /// `PATCH` with query parameters and no body, then decode
    pub async fn patch_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        self.guarded(async {
            let response = self
                .send(Method::PATCH, path, true, |r| r.query(query))
                .await?;
            self.decode(response).await
        })
        .await
    }

    /// `DELETE`, ignoring the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.guarded(async {
            self.send(Method::DELETE, path, true, |r| r).await?;
            Ok(())
        })
        .await
    }

    async fn with_body<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        staged: bool,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.guarded(async {
            let response = self.send(method, path, staged, |r| r.json(body)).await?;
            self.decode(response).await
        })
        .await
    }

    async fn guarded<T>(
        &self,
        operation: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("Request cancelled");
                    Err(ApiError::Cancelled)
                },
                result = operation => result,
            },
            None => operation.await,
        }
    }

    #[instrument(skip(self, build), fields(url = tracing::field::Empty))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        staged: bool,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response, ApiError> {
        let url = self.config.endpoint(path);
        tracing::Span::current().record("url", url.as_str());

        let mut builder = build(self.client.request(method, &url));
        if staged {
            for stage in self.request_stages.iter() {
                builder = stage.apply(builder);
            }
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;
        let credential = bearer_credential(&request);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::from_reqwest(&e, self.config.timeout_secs))
            .inspect_err(|e| warn!(error = %e, "Request failed"))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Response received");
        if staged {
            for stage in self.response_stages.iter() {
                stage.inspect(status, credential.as_deref()).await;
            }
        }

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);
        debug!(error = %error, "Backend returned an error");
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(&e, self.config.timeout_secs))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

fn bearer_credential(request: &reqwest::Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticToken(Option<&'static str>);

    #[async_trait]
    impl CredentialSource for StaticToken {
        fn bearer_token(&self) -> Option<String> {
            self.0.map(str::to_string)
        }

        async fn on_unauthorized(&self, _refused: &str) {}
    }

    fn build_request(stage: &BearerAuth) -> reqwest::Request {
        let request = Client::new().get("http://localhost/api/users");
        stage.apply(request).build().unwrap()
    }

    #[test]
    fn bearer_stage_attaches_token() {
        let stage = BearerAuth::new(Arc::new(StaticToken(Some("abc"))));
        let request = build_request(&stage);
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn bearer_stage_skips_without_token() {
        let stage = BearerAuth::new(Arc::new(StaticToken(None)));
        let request = build_request(&stage);
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn sent_credential_is_read_back_from_request() {
        let stage = BearerAuth::new(Arc::new(StaticToken(Some("abc"))));
        assert_eq!(bearer_credential(&build_request(&stage)).as_deref(), Some("abc"));

        let anonymous = BearerAuth::new(Arc::new(StaticToken(None)));
        assert!(bearer_credential(&build_request(&anonymous)).is_none());
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = ApiGateway::builder(ApiConfig::for_testing("not a url")).build();
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn scoped_copy_keeps_stages() {
        let source: Arc<dyn CredentialSource> = Arc::new(StaticToken(None));
        let gateway = ApiGateway::with_credentials(ApiConfig::default(), source).unwrap();
        let scoped = gateway.scoped(CancellationToken::new());
        let debug = format!("{scoped:?}");
        assert!(debug.contains("scoped: true"));
        assert!(debug.contains("request_stages: 1"));
    }
}
