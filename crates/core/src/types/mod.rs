//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod height;
pub mod id;
pub mod phone;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use height::HeightTag;
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use price::{Price, group_thousands};
pub use status::*;
