//! Storefront record types
//!
//! Each type maps to one collection and validates its own payload:
//!
//! | Type | Collection |
//! |---|---|
//! | [`MenuItem`] | `menuitem` |
//! | [`CateringRequest`] | `cateringrequest` |
//! | [`Order`] (with embedded [`OrderItem`]s) | `order` |

pub mod catering;
pub mod menu_item;
pub mod order;

pub use catering::CateringRequest;
pub use menu_item::MenuItem;
pub use order::{Order, OrderItem};
