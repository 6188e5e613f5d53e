use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Password input that is wiped from memory on drop
///
/// Every password field in the account forms is held as a
/// `SecureCredential`. The value never shows up in `Debug` or `Display`
/// output, so forms can be logged freely.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureCredential {
    data: String,
}

impl SecureCredential {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// Borrow the secret. The borrow must not outlive `self`.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// An empty credential means the field was left blank
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length in characters, which is what the length rules count
    pub fn char_len(&self) -> usize {
        self.data.chars().count()
    }

    /// Copy the secret out for a request body. The copy is not zeroized.
    pub fn expose_secret(&self) -> String {
        self.data.clone()
    }
}

impl Clone for SecureCredential {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl From<String> for SecureCredential {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for SecureCredential {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

impl fmt::Debug for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureCredential")
            .field("empty", &self.is_empty())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for SecureCredential {
    /// Byte comparison that does not stop at the first differing byte
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.data.as_bytes(), other.data.as_bytes());
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl Eq for SecureCredential {}
