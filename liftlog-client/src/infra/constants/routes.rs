//! API Routes Constants for the Liftlog client
//!
//! Server endpoints used by the account workflows. Routes are unversioned
//! and relative to the configured server URL.

/// Session endpoints
pub mod sessions {
    /// Sign in with e-mail and password
    pub const CREATE: &str = "/sessions";
}

/// User account endpoints
pub mod users {
    /// Register (POST) and update the profile (PUT)
    pub const COLLECTION: &str = "/users";
    /// Replace the avatar (multipart PATCH)
    pub const AVATAR: &str = "/users/avatar";
    /// Multipart part name carrying the avatar file
    pub const AVATAR_FIELD: &str = "avatar";
}

/// Exercise history endpoints
pub mod history {
    /// History grouped by day
    pub const LIST: &str = "/history";
}

/// Static avatar files
pub mod avatar {
    pub const FILES: &str = "/avatar";
}
