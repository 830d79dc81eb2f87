// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("content store error: {0}")]
    Store(String),

    #[error("content not found: {0}")]
    NotFound(String),

    #[error("run state error: {0}")]
    State(String),

    #[error("mail dispatch failed: {0}")]
    Mail(String),

    #[error("configuration error: {0}")]
    Config(String),
}
