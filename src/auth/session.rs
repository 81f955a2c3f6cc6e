//! Server-side session store keyed by a cookie.
//!
//! A session row carries the user id and username and a fixed absolute
//! expiry (30 minutes by default). The extractor treats an expired row
//! as no session and deletes it lazily.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        username: &str,
        ttl_minutes: i64,
    ) -> anyhow::Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, username, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING token, user_id, username, expires_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(username)
        .bind(OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes))
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    pub async fn find(db: &PgPool, token: Uuid) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, user_id, username, expires_at FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(session)
    }

    pub async fn delete(db: &PgPool, token: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

/// Pulls the session token out of the Cookie header, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value).ok()
        } else {
            None
        }
    })
}

/// Set-Cookie value for a fresh session. SameSite=None + Secure because
/// the browser frontend is served from a different origin.
pub fn session_cookie(token: Uuid, ttl_minutes: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=None; Secure",
        ttl_minutes * 60
    )
}

/// Set-Cookie value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=None; Secure")
}

/// Extracts the authenticated session, rejecting with 401 otherwise.
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::Auth("No user logged in".into()))?;

        let session = Session::find(&state.db, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                ApiError::Auth("No user logged in".into())
            })?
            .ok_or_else(|| ApiError::Auth("No user logged in".into()))?;

        if session.is_expired(OffsetDateTime::now_utc()) {
            // Lazy cleanup; a failure here only leaves a dead row behind.
            let _ = Session::delete(&state.db, token).await;
            return Err(ApiError::Auth("Session expired".into()));
        }

        Ok(SessionUser {
            user_id: session.user_id,
            username: session.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use time::macros::datetime;

    #[test]
    fn parses_session_token_among_other_cookies() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; session={token}; lang=ko")).unwrap(),
        );
        assert_eq!(token_from_headers(&headers), Some(token));
    }

    #[test]
    fn missing_or_malformed_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=not-a-uuid"));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn cookie_roundtrip() {
        let token = Uuid::new_v4();
        let cookie = session_cookie(token, 30);
        assert!(cookie.contains("Max-Age=1800"));
        assert!(cookie.contains("HttpOnly"));

        let mut headers = HeaderMap::new();
        let pair = cookie.split(';').next().unwrap().to_string();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
        assert_eq!(token_from_headers(&headers), Some(token));
    }

    #[test]
    fn expiry_is_absolute() {
        let session = Session {
            token: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "alice".into(),
            expires_at: datetime!(2025-01-01 12:00 UTC),
        };
        assert!(!session.is_expired(datetime!(2025-01-01 11:59 UTC)));
        assert!(session.is_expired(datetime!(2025-01-01 12:00 UTC)));
        assert!(session.is_expired(datetime!(2025-01-01 12:01 UTC)));
    }
}
