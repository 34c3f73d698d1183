use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::{ClientConfig, ParamEncoding};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;

#[derive(Debug, Clone)]
/// HTTP-транспорт: собирает URL, подставляет токен сессии, разбирает ответ.
pub(crate) struct HttpClient {
    base_url: String,
    param_encoding: ParamEncoding,
    client: Client,
    session: Session,
}

impl HttpClient {
    pub(crate) fn new(config: &ClientConfig, session: Session) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            param_encoding: config.param_encoding,
            client,
            session,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "sending request");

        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Запрос без тела.
    pub(crate) async fn send<TRes>(&self, method: Method, path: &str) -> ApiResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        Self::execute(self.request(method, path)).await
    }

    /// Запрос с параметрами в теле, закодированными согласно настройкам.
    pub(crate) async fn send_params<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        params: &TReq,
    ) -> ApiResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let request = self.request(method, path);
        let request = match self.param_encoding {
            ParamEncoding::Json => request.json(params),
            ParamEncoding::Form => request.form(params),
        };
        Self::execute(request).await
    }

    async fn execute<TRes>(request: RequestBuilder) -> ApiResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            debug!(%status, "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                payload: serde_json::from_slice(&body).ok(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
