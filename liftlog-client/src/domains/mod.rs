pub mod auth;
pub mod history;
pub mod profile;
pub mod ui;
