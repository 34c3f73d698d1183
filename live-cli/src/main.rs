use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use live_client::{
    ApiError, EditUserError, LoginError, RestApi, SignupError, User, UserRepository,
};
use tracing::info;

mod logging;
mod settings;

use logging::init_logging;
use settings::Settings;

const TOKEN_FILE: &str = ".live_token";

#[derive(Debug, Parser)]
#[command(name = "live-cli", version, about = "CLI клиент для API учётных записей Live")]
struct Cli {
    /// Адрес API (перекрывает LIVE_API_URL).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Профиль текущего пользователя (требует токен).
    Me,
    /// Изменение имени или фамилии (требует токен).
    ///
    /// Если указаны оба поля, сервер получит только имя.
    Edit {
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
    },
    /// Удаление сохранённого токена.
    Logout,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?.with_server(cli.server);

    init_logging(&settings.log_level)?;

    let token_file = Path::new(TOKEN_FILE);
    let api = RestApi::new(settings.client_config()).context("не удалось создать HTTP-клиент")?;
    if let Some(token) = load_token(token_file).context("не удалось прочитать .live_token")? {
        api.session().set_token(token);
    }

    match cli.command {
        Command::Signup {
            email,
            password,
            firstname,
            lastname,
        } => {
            let user = api
                .signup(&email, &password, &firstname, &lastname)
                .await
                .map_err(map_signup_error)?;
            print_user("Регистрация успешна", &user);
        }
        Command::Login { email, password } => {
            let user = login_and_persist(&api, token_file, &email, &password).await?;
            info!(username = %user.username, "logged in");
            print_user("Вход выполнен", &user);
        }
        Command::Me => {
            let user = api.current_user().await.map_err(map_api_error)?;
            print_user("Профиль", &user);
        }
        Command::Edit {
            firstname,
            lastname,
        } => {
            if firstname.is_none() && lastname.is_none() {
                anyhow::bail!("укажите --firstname или --lastname");
            }
            api.edit_user(firstname.as_deref(), lastname.as_deref())
                .await
                .map_err(map_edit_user_error)?;
            println!("Профиль обновлён");
        }
        Command::Logout => {
            api.session().clear();
            persist_token(&api, token_file).context("не удалось удалить токен")?;
            println!("Токен удалён");
        }
    }

    Ok(())
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token(path: &Path) -> io::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(api: &RestApi, path: &Path) -> io::Result<()> {
    match api.session().token() {
        Some(token) => fs::write(path, token),
        None if path.exists() => fs::remove_file(path),
        None => Ok(()),
    }
}

/// Неудачный вход тоже сбрасывает токен сессии, поэтому файл
/// синхронизируется при любом исходе.
async fn login_and_persist(
    api: &RestApi,
    token_file: &Path,
    email: &str,
    password: &str,
) -> Result<User> {
    let result = api.login(email, password).await;
    persist_token(api, token_file).context("не удалось сохранить токен")?;
    result.map_err(map_login_error)
}

fn map_signup_error(err: SignupError) -> anyhow::Error {
    let message = match err {
        SignupError::EmailAlreadyTaken => "этот email уже зарегистрирован",
        SignupError::Unknown => "не удалось зарегистрироваться",
    };
    anyhow::anyhow!(message)
}

fn map_login_error(err: LoginError) -> anyhow::Error {
    let message = match err {
        LoginError::WrongCredentials => "неверный email или пароль",
        LoginError::Unknown => "не удалось выполнить вход",
    };
    anyhow::anyhow!(message)
}

fn map_edit_user_error(err: EditUserError) -> anyhow::Error {
    let message = match err {
        EditUserError::Unknown => "не удалось обновить профиль",
    };
    anyhow::anyhow!(message)
}

fn map_api_error(err: ApiError) -> anyhow::Error {
    let message = match &err {
        ApiError::Status {
            status: 401 | 403, ..
        } => "требуется авторизация: выполните `live-cli login ...`".to_string(),
        ApiError::Status { status, .. } => format!("сервер ответил статусом {status}"),
        ApiError::Network(err) => format!("ошибка HTTP: {err}"),
        ApiError::Decode(err) => format!("некорректный ответ сервера: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_user(title: &str, user: &User) {
    println!("{title}");
    println!("firstname: {}", user.firstname);
    println!("lastname: {}", user.lastname);
    println!("email: {}", user.email);
    println!("username: {}", user.username);
    println!("survey answered: {}", user.has_answered_survey);
    if let Some(avatar_url) = &user.avatar_url {
        println!("avatar: {avatar_url}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_client::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_body() -> serde_json::Value {
        json!({
            "id": "17",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "username": "Ada",
            "is_verified": true,
            "is_staff": false,
            "is_survey_attempted": false,
            "auth_token": "fresh-token",
        })
    }

    async fn login_server(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn failed_login_removes_stale_token_file() {
        let server = login_server(
            ResponseTemplate::new(400).set_body_json(json!({ "error_type": "WrongArguments" })),
        )
        .await;
        let dir = tempfile::tempdir().expect("temp dir");
        let token_file = dir.path().join(TOKEN_FILE);
        fs::write(&token_file, "stale-token").expect("seed token file");

        let api = RestApi::new(ClientConfig::new(server.uri())).expect("client must build");
        let token = load_token(&token_file).expect("read token");
        api.session().set_token(token.expect("seeded token"));

        let err = login_and_persist(&api, &token_file, "ada@example.com", "bad")
            .await
            .expect_err("login must fail");

        assert_eq!(err.to_string(), "неверный email или пароль");
        assert!(!token_file.exists());
        assert_eq!(api.session().token(), None);
    }

    #[tokio::test]
    async fn successful_login_overwrites_token_file() {
        let server = login_server(ResponseTemplate::new(200).set_body_json(user_body())).await;
        let dir = tempfile::tempdir().expect("temp dir");
        let token_file = dir.path().join(TOKEN_FILE);
        fs::write(&token_file, "stale-token").expect("seed token file");

        let api = RestApi::new(ClientConfig::new(server.uri())).expect("client must build");
        let user = login_and_persist(&api, &token_file, "ada@example.com", "pw")
            .await
            .expect("login must succeed");

        assert_eq!(user.username, "Ada");
        assert_eq!(
            load_token(&token_file).expect("read token").as_deref(),
            Some("fresh-token")
        );
    }

    #[test]
    fn load_token_without_file_is_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let token = load_token(&dir.path().join(TOKEN_FILE)).expect("read token");
        assert!(token.is_none());
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }

    #[test]
    fn cli_parses_edit_with_optional_fields() {
        let cli = Cli::try_parse_from(["live-cli", "edit", "--lastname", "Hopper"])
            .expect("must parse");
        match cli.command {
            Command::Edit {
                firstname,
                lastname,
            } => {
                assert_eq!(firstname, None);
                assert_eq!(lastname.as_deref(), Some("Hopper"));
            }
            other => panic!("expected edit command, got {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_global_server_flag() {
        let cli = Cli::try_parse_from(["live-cli", "me", "--server", "api.local:9000"])
            .expect("must parse");
        assert_eq!(cli.server.as_deref(), Some("api.local:9000"));
        assert!(matches!(cli.command, Command::Me));
    }

    #[test]
    fn wrong_credentials_message_is_specific() {
        let err = map_login_error(LoginError::WrongCredentials);
        assert_eq!(err.to_string(), "неверный email или пароль");
    }

    #[test]
    fn unauthorized_status_suggests_login() {
        let err = map_api_error(ApiError::Status {
            status: 401,
            payload: None,
        });
        assert!(err.to_string().contains("live-cli login"));
    }
}
