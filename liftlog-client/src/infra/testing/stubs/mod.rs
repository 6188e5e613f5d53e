pub mod assets;
pub mod auth;
pub mod history;
pub mod notifier;
pub mod profile;

pub use assets::StubAssetSource;
pub use auth::{StubAccountService, StubAuthenticator};
pub use history::StubHistoryService;
pub use notifier::RecordingNotifier;
pub use profile::StubProfileService;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A panicking test must not take the other assertions down with it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
