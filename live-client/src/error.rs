use thiserror::Error;

/// Значение `error_type`, которым сервер помечает неверные учётные данные.
const WRONG_ARGUMENTS: &str = "WrongArguments";

#[derive(Debug, Error)]
/// Ошибка транспортного уровня: сеть, HTTP-статус или декодирование ответа.
pub enum ApiError {
    /// Ошибка HTTP-транспорта (`reqwest`): соединение, таймаут, чтение тела.
    #[error("http error: {0}")]
    Network(#[from] reqwest::Error),

    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("http status {status}")]
    Status {
        /// Код HTTP-статуса.
        status: u16,
        /// Тело ответа, если оно разобралось как JSON.
        payload: Option<serde_json::Value>,
    },

    /// Успешный ответ не удалось декодировать в ожидаемую модель.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Результат транспортных операций.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Возвращает HTTP-статус, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Возвращает поле `error_type` из JSON-тела ошибки, если оно есть.
    pub fn error_type(&self) -> Option<&str> {
        match self {
            Self::Status {
                payload: Some(payload),
                ..
            } => payload.get("error_type").and_then(serde_json::Value::as_str),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Ошибки регистрации.
pub enum SignupError {
    /// Email уже занят другим пользователем.
    #[error("email already taken")]
    EmailAlreadyTaken,
    /// Любая другая ошибка.
    #[error("signup failed")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Ошибки входа.
pub enum LoginError {
    /// Неверный email или пароль.
    #[error("wrong credentials")]
    WrongCredentials,
    /// Любая другая ошибка.
    #[error("login failed")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Ошибки редактирования профиля.
pub enum EditUserError {
    /// Любая ошибка.
    #[error("edit user failed")]
    Unknown,
}

impl From<&ApiError> for SignupError {
    // TODO: различать EmailAlreadyTaken, когда сервер задокументирует формат ошибки регистрации.
    fn from(_: &ApiError) -> Self {
        Self::Unknown
    }
}

impl From<&ApiError> for LoginError {
    fn from(err: &ApiError) -> Self {
        if err.status() == Some(400) && err.error_type() == Some(WRONG_ARGUMENTS) {
            return Self::WrongCredentials;
        }
        Self::Unknown
    }
}

impl From<&ApiError> for EditUserError {
    fn from(_: &ApiError) -> Self {
        Self::Unknown
    }
}
