use serde::{Deserialize, Serialize};

/// Request body for user registration. Preference fields are optional.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "favoriteFood")]
    pub favorite_food: Option<String>,
    #[serde(default, rename = "spiceLevel")]
    pub spice_level: Option<String>,
    /// ISO date string (YYYY-MM-DD).
    #[serde(default)]
    pub birthdate: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Partial profile update; absent fields stay untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, rename = "favoriteFood")]
    pub favorite_food: Option<String>,
    #[serde(default, rename = "spiceLevel")]
    pub spice_level: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}

/// Profile payload for the landing/my-page views.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    #[serde(rename = "favoriteFood")]
    pub favorite_food: Option<String>,
    #[serde(rename = "spiceLevel")]
    pub spice_level: Option<String>,
    pub grade: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_tolerates_missing_optionals() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username": "alice", "email": "a@b.c", "password": "pw"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.favorite_food.is_none());
        assert!(req.birthdate.is_none());
    }

    #[test]
    fn profile_response_uses_frontend_field_names() {
        let resp = ProfileResponse {
            username: "alice".into(),
            email: "a@b.c".into(),
            favorite_food: Some("korean".into()),
            spice_level: None,
            grade: "basic".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("favoriteFood"));
        assert!(json.contains("spiceLevel"));
    }
}
