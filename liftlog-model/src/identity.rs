//! The authenticated user's profile record as held by the client.

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Profile record for the signed-in user.
///
/// `email` is fixed once the account exists; the client never edits it.
/// Updates produce new values through [`Identity::with_name`] and
/// [`Identity::with_avatar`] so that a shared copy is never half-modified.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identity {
    /// Opaque server id; empty when the server does not send one. Numeric
    /// ids are kept in their decimal form.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "id_from_text_or_number")
    )]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Server-side avatar file reference, resolved to a URL by the client
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar: Option<String>,
}

#[cfg(feature = "serde")]
fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

impl Identity {
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_avatar(&self, avatar: impl Into<String>) -> Self {
        Self {
            avatar: Some(avatar.into()),
            ..self.clone()
        }
    }
}

/// Body returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthSession {
    pub user: Identity,
    pub token: String,
}
