//! Application service layer - session state, config

pub mod app;
pub mod config;
