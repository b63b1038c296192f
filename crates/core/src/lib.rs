//! Mowlid Core - Shared types library.
//!
//! This crate provides common types used across the mowlid.dev components:
//! - `site` - Public portfolio, storefront, and admin dashboard
//! - `relay` - Local email relay process
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, price ranges, emails,
//!   order references, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
