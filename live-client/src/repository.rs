use async_trait::async_trait;

use crate::error::{ApiError, EditUserError, LoginError, SignupError};
use crate::models::User;

/// Операции над учётной записью текущего пользователя.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Регистрирует нового пользователя.
    async fn signup(
        &self,
        email: &str,
        password: &str,
        firstname: &str,
        lastname: &str,
    ) -> Result<User, SignupError>;

    /// Выполняет вход и запоминает токен авторизации.
    async fn login(&self, email: &str, password: &str) -> Result<User, LoginError>;

    /// Загружает актуальные данные текущего пользователя.
    ///
    /// `user` не используется: личность определяется токеном сессии.
    async fn fetch(&self, user: &User) -> Result<User, ApiError>;

    /// Меняет имя или фамилию. Если заданы оба поля, отправляется только имя.
    async fn edit_user(
        &self,
        firstname: Option<&str>,
        lastname: Option<&str>,
    ) -> Result<(), EditUserError>;
}
