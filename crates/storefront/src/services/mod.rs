//! Clients for the external services the storefront talks to.
//!
//! # Services
//!
//! - `telegram` - Order notifications to the shop's Telegram chat
//! - `novaposhta` - Settlement and warehouse lookups for delivery

pub mod novaposhta;
pub mod telegram;

pub use novaposhta::{NovaPoshtaClient, NovaPoshtaError};
pub use telegram::{TelegramClient, TelegramError};
