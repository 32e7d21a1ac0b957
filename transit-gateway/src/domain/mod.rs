//! Domain types for the transit gateway.
//!
//! Types here enforce their invariants at construction time, so handlers
//! and the upstream client can trust a value once they hold one.

mod site_id;

pub use site_id::{InvalidSiteId, SiteId};
