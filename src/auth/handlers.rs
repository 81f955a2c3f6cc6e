use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use time::{macros::format_description, Date};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, ProfileResponse,
            RegisterRequest, UpdateUserRequest,
        },
        password::{hash_password, validate_password, verify_password},
        repo::User,
        session::{clear_session_cookie, session_cookie, token_from_headers, Session, SessionUser},
    },
    error::ApiError,
    state::AppState,
};

// The two login failures answer with different bodies; the message
// tells the caller which half of the credential check failed.
const UNKNOWN_USERNAME: &str = "Unknown username";
const INCORRECT_PASSWORD: &str = "Incorrect password";

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn parse_birthdate(raw: Option<&str>) -> Result<Option<Date>, ApiError> {
    let Some(raw) = raw else { return Ok(None) };
    let fmt = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &fmt)
        .map(Some)
        .map_err(|_| ApiError::Validation("Invalid birthdate".into()))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.username.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        warn!("registration with missing fields");
        return Err(ApiError::Validation("Missing required fields".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if User::find_by_username(&state.db, &payload.username)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_username failed");
            ApiError::Persistence(e)
        })?
        .is_some()
    {
        warn!(username = %payload.username, "username already exists");
        return Err(ApiError::Conflict("Username already exists".into()));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            ApiError::Persistence(e)
        })?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    validate_password(&payload.password).map_err(|m| ApiError::Validation(m.into()))?;

    let birthdate = parse_birthdate(payload.birthdate.as_deref())?;
    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Validation("Could not process password".into())
    })?;

    // Two concurrent registrations can both pass the pre-checks; the DB
    // unique constraints decide the race and the loser lands here.
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &hash,
        payload.favorite_food.as_deref(),
        payload.spice_level.as_deref(),
        birthdate,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "create user failed");
        ApiError::Persistence(e)
    })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let user = User::find_by_username(&state.db, &payload.username)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_username failed");
            ApiError::Persistence(e)
        })?
        .ok_or_else(|| {
            warn!(username = %payload.username, "login unknown username");
            ApiError::Auth(UNKNOWN_USERNAME.into())
        })?;

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::Auth(INCORRECT_PASSWORD.into())
    })?;
    if !ok {
        warn!(username = %user.username, "login incorrect password");
        return Err(ApiError::Auth(INCORRECT_PASSWORD.into()));
    }

    let session = Session::create(
        &state.db,
        user.id,
        &user.username,
        state.config.session_ttl_minutes,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "session create failed");
        ApiError::Persistence(e)
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(session.token, state.config.session_ttl_minutes)
            .parse()
            .map_err(|_| ApiError::Auth("Could not establish session".into()))?,
    );

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((
        headers,
        Json(LoginResponse {
            message: "Logged in successfully".into(),
            username: user.username,
        }),
    ))
}

#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (HeaderMap, Json<MessageResponse>) {
    if let Some(token) = token_from_headers(&headers) {
        if let Err(e) = Session::delete(&state.db, token).await {
            error!(error = %e, "session delete failed");
        }
    }

    let mut out = HeaderMap::new();
    if let Ok(value) = clear_session_cookie().parse() {
        out.insert(header::SET_COOKIE, value);
    }
    (
        out,
        Json(MessageResponse {
            message: "Logged out successfully".into(),
        }),
    )
}

#[instrument(skip(state, session))]
pub async fn current_user(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, session.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_id failed");
            ApiError::Auth("No user logged in".into())
        })?
        .ok_or_else(|| ApiError::Auth("No user logged in".into()))?;

    Ok(Json(ProfileResponse {
        username: user.username,
        email: user.email,
        favorite_food: user.favorite_food,
        spice_level: user.spice_level,
        grade: user.grade,
    }))
}

#[instrument(skip(state, session, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    session: SessionUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let birthdate = parse_birthdate(payload.birthdate.as_deref())?;

    User::update_profile(
        &state.db,
        session.user_id,
        payload.favorite_food.as_deref(),
        payload.spice_level.as_deref(),
        birthdate,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "update_profile failed");
        ApiError::Persistence(e)
    })?;

    info!(user_id = %session.user_id, "profile updated");
    Ok(Json(MessageResponse {
        message: "User information updated".into(),
    }))
}

#[instrument(skip(state, session, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    session: SessionUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_password(&payload.new_password).map_err(|m| ApiError::Validation(m.into()))?;

    let hash = hash_password(&payload.new_password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Validation("Could not process password".into())
    })?;

    User::update_password(&state.db, session.user_id, &hash)
        .await
        .map_err(|e| {
            error!(error = %e, "update_password failed");
            ApiError::Persistence(e)
        })?;

    info!(user_id = %session.user_id, "password changed");
    Ok(Json(MessageResponse {
        message: "Password changed successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn login_failures_are_distinct_401s() {
        assert_ne!(UNKNOWN_USERNAME, INCORRECT_PASSWORD);
        for message in [UNKNOWN_USERNAME, INCORRECT_PASSWORD] {
            let res = ApiError::Auth(message.into()).into_response();
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("cook@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@at@example.com"));
    }
}
