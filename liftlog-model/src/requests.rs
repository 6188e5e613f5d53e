//! Request and response bodies for the account endpoints.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /users`.
///
/// The password pair is only sent when a rotation was requested; both
/// fields are then present together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateProfileRequest {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub old_password: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub password: Option<String>,
}

/// Body returned by `PATCH /users/avatar`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvatarUpdated {
    pub avatar: String,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn name_only_update_omits_password_fields() {
        let body = UpdateProfileRequest {
            name: "Alex".into(),
            old_password: None,
            password: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Alex" }));
    }

    #[test]
    fn rotation_update_carries_both_passwords() {
        let body = UpdateProfileRequest {
            name: "Alex".into(),
            old_password: Some("current1".into()),
            password: Some("abcdef".into()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["old_password"], "current1");
        assert_eq!(json["password"], "abcdef");
    }
}
