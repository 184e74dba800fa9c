//! # Core Library
//!
//! Configuration, error taxonomy, and transfer data types shared by the
//! chain, wallet, and payment crates.

pub mod config;
pub mod dto;
pub mod error;

// Re-export commonly used types
pub use config::{core_config, init_config, Config};
pub use dto::transfer::{SignedTransfer, TransferCall, TransferIntent};
pub use error::{AppError, Result};
