use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Имя.
    pub firstname: String,
    /// Фамилия.
    pub lastname: String,
    /// Email.
    pub email: String,
    /// Логин.
    pub username: String,
    /// Прошёл ли пользователь опрос.
    pub has_answered_survey: bool,
    /// URL маленькой версии аватара, если он загружен.
    pub avatar_url: Option<String>,
}
