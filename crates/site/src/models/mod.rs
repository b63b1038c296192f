//! Session-scoped models and keys.

/// Session storage keys.
///
/// All per-visitor state lives under these keys: the cart and the admin
/// authentication flag. Nothing else is persisted client-side.
pub mod session_keys {
    /// The visitor's cart ([`crate::cart::Cart`]).
    pub const CART: &str = "cart";
    /// Boolean admin authentication flag set by the session gate.
    pub const ADMIN_AUTHENTICATED: &str = "admin_authenticated";
}
