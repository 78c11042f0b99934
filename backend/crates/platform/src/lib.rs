//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Reversible password encryption (AES-256-GCM)
//! - TTL key/value cache abstraction with an in-process backend
//! - Request context helpers

pub mod cache;
pub mod cipher;
pub mod request;
