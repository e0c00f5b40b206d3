#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

/// Base32 secret material
pub mod secret;

/// HOTP (HMAC-based One-Time Password) generation and verification
pub mod hotp;

/// TOTP (Time-based One-Time Password) generation and verification
pub mod totp;

/// Accounts, the ordered account store, and secret validation
pub mod account;

/// Query resolution and candidate ranking
pub mod matcher;

/// Code formatting and result rendering
pub mod output;

/// Secret retrieval capability for accounts configured without one
pub mod resolver;

/// Accounts file location, loading, and saving
pub mod config;

/// Clipboard sink for the primary match's code
pub mod clipboard;
