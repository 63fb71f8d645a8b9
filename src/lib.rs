pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod mapper;
