//! Shared foundation for the matchday crates.
//!
//! Hosts the pieces every other crate needs without depending on any of
//! them: the `inventory`-based service registration types, the unified
//! logging layer, and common validation traits.

pub mod di;
pub mod logging;
pub mod validation;

pub use di::{collect_all_services, ServiceEntry, ServiceFactory};
pub use validation::{Validatable, ValidationError, Validator};
