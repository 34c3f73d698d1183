use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, EditUserError, LoginError, SignupError};
use crate::http_client::HttpClient;
use crate::models::User;
use crate::repository::UserRepository;
use crate::session::Session;
use crate::wire::WireUser;

const REGISTER_PATH: &str = "/auth/register";
const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/me";

#[derive(Debug, Serialize)]
struct SignupRequestDto<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct EditUserRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
}

impl<'a> EditUserRequestDto<'a> {
    /// Имя имеет приоритет: фамилия отправляется, только если имя не задано.
    fn new(firstname: Option<&'a str>, lastname: Option<&'a str>) -> Self {
        match (firstname, lastname) {
            (Some(first_name), _) => Self {
                first_name: Some(first_name),
                last_name: None,
            },
            (None, Some(last_name)) => Self {
                first_name: None,
                last_name: Some(last_name),
            },
            (None, None) => Self::default(),
        }
    }
}

#[derive(Debug, Clone)]
/// REST-реализация `UserRepository`.
///
/// Копии разделяют одну `Session`, поэтому токен, полученный при входе,
/// виден всем клонам клиента.
pub struct RestApi {
    http: HttpClient,
    session: Session,
}

impl RestApi {
    /// Создаёт клиент с новой пустой сессией.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Self::with_session(config, Session::new())
    }

    /// Создаёт клиент поверх существующей сессии.
    pub fn with_session(config: ClientConfig, session: Session) -> ApiResult<Self> {
        let http = HttpClient::new(&config, session.clone())?;
        Ok(Self { http, session })
    }

    /// Сессия клиента.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Загружает текущего пользователя по токену сессии.
    pub async fn current_user(&self) -> ApiResult<User> {
        let wire: WireUser = self.http.send(Method::GET, ME_PATH).await?;
        Ok(wire.into())
    }
}

fn collapse<E>(operation: &'static str, err: ApiError) -> E
where
    E: for<'e> From<&'e ApiError> + std::fmt::Display,
{
    let mapped = E::from(&err);
    warn!(operation, error = %err, mapped = %mapped, "request failed");
    mapped
}

#[async_trait]
impl UserRepository for RestApi {
    async fn signup(
        &self,
        email: &str,
        password: &str,
        firstname: &str,
        lastname: &str,
    ) -> Result<User, SignupError> {
        let payload = SignupRequestDto {
            email,
            password,
            first_name: firstname,
            last_name: lastname,
            username: firstname,
        };
        let wire: WireUser = self
            .http
            .send_params(Method::POST, REGISTER_PATH, &payload)
            .await
            .map_err(|err| collapse::<SignupError>("signup", err))?;
        Ok(wire.into())
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, LoginError> {
        self.session.clear();

        let payload = LoginRequestDto { email, password };
        let wire: WireUser = self
            .http
            .send_params(Method::POST, LOGIN_PATH, &payload)
            .await
            .map_err(|err| collapse::<LoginError>("login", err))?;

        self.session.replace(wire.auth_token.clone());
        Ok(wire.into())
    }

    async fn fetch(&self, _user: &User) -> Result<User, ApiError> {
        self.current_user().await
    }

    async fn edit_user(
        &self,
        firstname: Option<&str>,
        lastname: Option<&str>,
    ) -> Result<(), EditUserError> {
        let payload = EditUserRequestDto::new(firstname, lastname);
        let _: WireUser = self
            .http
            .send_params(Method::PATCH, ME_PATH, &payload)
            .await
            .map_err(|err| collapse::<EditUserError>("edit_user", err))?;
        Ok(())
    }
}
