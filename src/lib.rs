//! TikPublish - multi-account video publishing through TikTok's Content Posting API
//!
//! This crate stores creator bearer tokens, verifies them against the creator
//! info endpoint, and drives publish jobs through init, chunked upload and
//! status polling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
