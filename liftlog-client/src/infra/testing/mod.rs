//! Test doubles for the service seams
//!
//! Shared by unit tests and the integration tests under `tests/`.

pub mod stubs;

pub use stubs::{
    RecordingNotifier, StubAccountService, StubAssetSource, StubAuthenticator,
    StubHistoryService, StubProfileService,
};

use liftlog_model::Identity;

/// A signed-in user for tests
pub fn identity(name: &str) -> Identity {
    Identity {
        id: "user-1".to_string(),
        name: name.to_string(),
        email: "alex@example.com".to_string(),
        avatar: None,
    }
}
