//! mowlid.dev site library.
//!
//! The public portfolio, storefront, and admin dashboard as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
