pub mod agent;
pub mod config;
pub mod credentials;
pub mod error;
pub mod payload;
pub mod platform;
