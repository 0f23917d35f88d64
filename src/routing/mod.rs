//! Routing
//!
//! - [`RouteTable`]: immutable exact-match path → producer table
//! - [`Router`]: navigation interception and history updates

mod router;
mod table;

pub use router::{Dispatch, NavigationEvent, Router};
pub use table::{RouteMatch, RouteTable, RouteTableBuilder};
