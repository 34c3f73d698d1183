use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::models::User;

/// Пользователь в том виде, в каком его отдаёт сервер.
///
/// `auth_token` присутствует только в ответе на вход. Аватар достаётся из
/// `profile_image.image.small`; отсутствие любого уровня даёт `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireUserDto", into = "WireUserDto")]
pub(crate) struct WireUser {
    pub(crate) id: String,
    pub(crate) firstname: String,
    pub(crate) lastname: String,
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) is_verified: bool,
    pub(crate) is_staff: bool,
    pub(crate) auth_token: Option<String>,
    pub(crate) has_answered_survey: bool,
    pub(crate) avatar_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireUserDto {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    username: String,
    is_verified: bool,
    is_staff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<Value>,
    is_survey_attempted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image: Option<Value>,
}

impl From<WireUserDto> for WireUser {
    fn from(value: WireUserDto) -> Self {
        let auth_token = match value.auth_token {
            Some(Value::String(token)) => Some(token),
            _ => None,
        };
        let avatar_url = value
            .profile_image
            .as_ref()
            .and_then(|profile_image| profile_image.get("image"))
            .and_then(|image| image.get("small"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            id: value.id,
            firstname: value.first_name,
            lastname: value.last_name,
            email: value.email,
            username: value.username,
            is_verified: value.is_verified,
            is_staff: value.is_staff,
            auth_token,
            has_answered_survey: value.is_survey_attempted,
            avatar_url,
        }
    }
}

impl From<WireUser> for WireUserDto {
    fn from(value: WireUser) -> Self {
        Self {
            id: value.id,
            first_name: value.firstname,
            last_name: value.lastname,
            email: value.email,
            username: value.username,
            is_verified: value.is_verified,
            is_staff: value.is_staff,
            auth_token: value.auth_token.map(Value::String),
            is_survey_attempted: value.has_answered_survey,
            profile_image: value
                .avatar_url
                .map(|url| json!({ "image": { "small": url } })),
        }
    }
}

impl From<WireUser> for User {
    fn from(value: WireUser) -> Self {
        Self {
            firstname: value.firstname,
            lastname: value.lastname,
            email: value.email,
            username: value.username,
            has_answered_survey: value.has_answered_survey,
            avatar_url: value.avatar_url,
        }
    }
}
