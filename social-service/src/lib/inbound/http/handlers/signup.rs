use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use super::page;
use super::redirect;
use super::ApiError;
use super::LOGIN_PATH;
use crate::domain::user::models::Age;
use crate::domain::user::models::City;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::user::errors::UserError;

pub async fn signup_form() -> Html<String> {
    Html(views::signup_page(&[]))
}

pub async fn signup(
    State(state): State<AppState>,
    Form(body): Form<SignupRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(username = %body.username, "Signup attempt");

    let command = match body.try_into_command() {
        Ok(command) => command,
        Err(errors) => {
            tracing::info!(failures = errors.len(), "Signup rejected by validation");
            return Ok(page(StatusCode::BAD_REQUEST, views::signup_page(&errors)));
        }
    };

    match state.user_service.create_user(command).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Signup succeeded");
            Ok(redirect(LOGIN_PATH))
        }
        Err(err @ UserError::AlreadyExists) => Ok(page(
            StatusCode::BAD_REQUEST,
            views::signup_page(&[err.to_string()]),
        )),
        Err(err) => Err(ApiError::from(err)),
    }
}

/// Raw signup form. Absent fields deserialize as empty strings so that they
/// surface as field-level validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    username: String,
    email: String,
    password: String,
    city: String,
    age: String,
}

impl SignupRequest {
    /// Validate every field, collecting all messages rather than stopping at
    /// the first failure.
    fn try_into_command(self) -> Result<CreateUserCommand, Vec<String>> {
        let mut errors = Vec::new();

        let username = Username::new(self.username)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let city = City::new(self.city)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let age = Age::parse(&self.age)
            .map_err(|e| errors.push(e.to_string()))
            .ok();

        match (username, email, password, age, city) {
            (Some(username), Some(email), Some(password), Some(age), Some(city)) => {
                Ok(CreateUserCommand {
                    username,
                    email,
                    password,
                    age,
                    city,
                })
            }
            _ => Err(errors),
        }
    }
}
