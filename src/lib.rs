// src/lib.rs
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod scheduler;

pub use application::*;
pub use config::*;
pub use domain::*;
pub use error::*;
pub use infrastructure::*;
