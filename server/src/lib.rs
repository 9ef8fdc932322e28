//! HTTP surface of the workforce suite.

pub mod chart;
pub mod config;
pub mod http;
pub mod i18n;
pub mod master;
pub mod session;
pub mod tabs;

pub use config::AppConfig;
pub use http::{AppState, ServeConfig, build_app, serve};
