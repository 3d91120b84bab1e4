// src/lib.rs

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod persona;
pub mod state;

pub use state::AppState;
