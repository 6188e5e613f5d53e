//! Liftlog client library
//!
//! Account management for the Liftlog training service: sign-in, sign-up,
//! profile and credential updates (including avatar replacement), and the
//! grouped exercise history. The `liftlog` binary in `src/main.rs` drives
//! these flows from a terminal.
//!
//! Notes
//! - `domains` holds the workflows and their rules; they only talk to the
//!   outside world through the traits in `infra::services`,
//!   `domains::auth::session` and `domains::ui::feedback`.
//! - `infra` holds the HTTP adapters, configuration and test stubs.

pub mod app;
pub mod common;
pub mod domains;
pub mod infra;
