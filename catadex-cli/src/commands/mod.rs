//! CLI command implementations.

pub mod auth;
pub mod browse;
pub mod config;
pub mod favorites;
pub mod search;
pub mod show;
