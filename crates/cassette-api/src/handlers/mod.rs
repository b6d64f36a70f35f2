//! HTTP request handlers

pub mod health;
pub mod media_get;
pub mod media_upload;
pub mod transcript_upload;
