//! # Data Transfer Objects
//!
//! Value objects exchanged between the wallet, chain, and payment layers.

pub mod transfer;

pub use transfer::{SignedTransfer, TransferCall, TransferIntent};
