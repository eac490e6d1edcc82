//! Tiffin Core - Shared types library.
//!
//! This crate provides common types used across all Tiffin components:
//! - `api` - HTTP backend for the mess-management app
//! - `cli` - Command-line tools for migrations and admin bootstrap
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
