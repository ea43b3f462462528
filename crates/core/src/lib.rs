//! Sephyx Core - Shared types library.
//!
//! This crate provides common types used across the Sephyx admin components:
//! - `admin` - Back-office library (session gate, product cache, mutation pipeline)
//! - `cli` - Command-line tool for one-time catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
