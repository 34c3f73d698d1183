use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
/// Сессия клиента: токен авторизации, общий для всех копий `RestApi`.
///
/// Токен выставляется после успешного входа и сбрасывается в начале каждой
/// попытки входа. Транспорт подставляет его в заголовок `Authorization`.
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Создаёт пустую сессию.
    pub fn new() -> Self {
        Self::default()
    }

    /// Возвращает копию текущего токена.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Устанавливает токен вручную, например восстановленный с диска.
    pub fn set_token(&self, token: impl Into<String>) {
        self.replace(Some(token.into()));
    }

    /// Очищает сохранённый токен.
    pub fn clear(&self) {
        self.replace(None);
    }

    pub(crate) fn replace(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
