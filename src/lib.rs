pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod http;
pub mod logging;
pub mod schema;
pub mod services;
pub mod wire;
