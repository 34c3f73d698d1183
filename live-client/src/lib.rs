//! Клиентская библиотека для REST API учётных записей Live.
//!
//! Предоставляет трейт `UserRepository` (регистрация, вход, загрузка и
//! редактирование профиля) и его HTTP-реализацию `RestApi` поверх `reqwest`.
//!
//! Клиент хранит токен в `Session` после `login` и автоматически передаёт его
//! в заголовке `Authorization` во всех последующих запросах.
#![warn(missing_docs)]

mod config;
mod error;
mod http_client;
mod models;
mod repository;
mod rest_api;
mod session;
mod wire;

pub use config::{ClientConfig, ParamEncoding};
pub use error::{ApiError, ApiResult, EditUserError, LoginError, SignupError};
pub use models::User;
pub use repository::UserRepository;
pub use rest_api::RestApi;
pub use session::Session;
