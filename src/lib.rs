pub mod app;
pub mod auth;
pub mod blogs;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
