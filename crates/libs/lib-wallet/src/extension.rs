//! # Wallet Extension Boundary
//!
//! Contracts for the browser-injected wallet extension. Implementations wrap
//! the host environment's injected API (`enable`, account enumeration,
//! per-address signers); tests use in-process fakes.

use async_trait::async_trait;
use lib_core::dto::transfer::{SignedTransfer, TransferIntent};
use lib_core::error::Result;
use std::sync::Arc;

use crate::account::WalletAccount;

/// Capability to authorize one outgoing transfer for a single account.
///
/// Signing happens inside the extension and usually prompts the user, so
/// [`sign_transfer`](TransferSigner::sign_transfer) can suspend for as long
/// as the prompt stays open — or fail when it is dismissed.
#[async_trait]
pub trait TransferSigner: Send + Sync {
    /// Sign the transfer and return the submit-ready extrinsic.
    async fn sign_transfer(&self, intent: &TransferIntent) -> Result<SignedTransfer>;
}

/// A compatible wallet extension injected into the execution environment.
///
/// Discovery is one-shot per call; there is no polling. Every method maps
/// extension-side failures into [`AppError`](lib_core::error::AppError)
/// variants rather than panicking.
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Request permission to use the extension on behalf of `app_name`.
    ///
    /// Fails with `NoExtension` when no compatible wallet is injected. May
    /// trigger a user-interactive permission prompt, which can be silently
    /// denied.
    async fn enable(&self, app_name: &str) -> Result<()>;

    /// Enumerate the accounts authorized for this application.
    ///
    /// An empty list is a valid outcome distinct from `NoExtension`: the
    /// extension is present but has nothing authorized.
    async fn accounts(&self) -> Result<Vec<WalletAccount>>;

    /// Obtain a signer capability for the given account address.
    async fn signer(&self, address: &str) -> Result<Arc<dyn TransferSigner>>;
}
