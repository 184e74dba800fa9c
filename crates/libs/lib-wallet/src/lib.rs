//! # Wallet Library
//!
//! Account discovery and signing through a browser-injected wallet
//! extension. The extension is an external capability the application only
//! consumes: keys never enter the process, absence is a recoverable
//! condition, and every interaction may suspend on user interaction with the
//! extension's own UI.
//!
//! The concrete extension bridge (wasm-bindgen interop in a browser host)
//! lives with the embedder; this crate defines the [`WalletExtension`] and
//! [`TransferSigner`] contracts plus the [`AccountProvider`] selection state
//! built on top of them.

pub mod account;
pub mod extension;

// Re-export commonly used types
pub use account::{AccountProvider, WalletAccount};
pub use extension::{TransferSigner, WalletExtension};
