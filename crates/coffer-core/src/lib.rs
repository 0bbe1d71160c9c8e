//! # Coffer Core
//!
//! Core library for Coffer - a keyed flat-file container for account
//! credentials.
//!
//! This crate provides the account store, its cipher, and the wire format,
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **cipher**: the keyed offset cipher behind the wire format
//! - **store**: uniquely named credential records and their (de)serialization
//! - **generate**: random password generation
//!
//! The cipher is a reversible numeric substitution kept for compatibility
//! with existing container files; it is not an authenticated encryption
//! scheme and Coffer makes no claim to be a hardened secret store.

pub mod cipher;
pub mod error;
pub mod generate;
pub mod store;

pub use cipher::Cipher;
pub use error::{CofferError, Result};
pub use generate::generate_password;
pub use store::{Account, AccountStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
