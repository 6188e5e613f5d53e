pub mod api_client;
pub mod assets;
pub mod config;
pub mod constants;
pub mod services;
pub mod testing;
