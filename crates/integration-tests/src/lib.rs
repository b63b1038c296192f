//! Integration tests for mowlid.dev.
//!
//! These tests exercise the site library end to end at the type level:
//! cart sequences, order assembly, and the wire shapes exchanged with the
//! remote store. They run with plain `cargo test` and need no live store,
//! relay, or SMTP credentials.
