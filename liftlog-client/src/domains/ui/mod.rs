pub mod feedback;

pub use feedback::{NotificationSink, ToastKind, ToastNotification};
