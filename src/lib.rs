// src/lib.rs

pub mod api;
pub mod config;
pub mod llm;
pub mod persona;
pub mod routing;
pub mod session;
pub mod state;

pub use config::CONFIG;
