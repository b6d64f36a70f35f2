//! Utility functions shared across handlers

pub mod upload;
