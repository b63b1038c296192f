//! Shared type definitions.

pub mod email;
pub mod id;
pub mod order_ref;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{ContactId, OrderRowId, ProjectId, ServiceId};
pub use order_ref::{OrderRef, OrderRefError};
pub use price::PriceRange;
pub use status::{ContactStatus, OrderStatus};
