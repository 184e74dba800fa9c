//! # Account Provider
//!
//! Holds the accounts enumerated from the wallet extension and the current
//! selection. Discovery is explicit: the set only changes when
//! [`AccountProvider::connect`] runs again.

use lib_core::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::extension::{TransferSigner, WalletExtension};

/// One signing identity exposed by the wallet extension.
///
/// Immutable once enumerated. The address is the chain-specific encoded
/// public key; the application treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// SS58-encoded public key
    pub address: String,
    /// Display name from the extension's metadata
    pub name: String,
    /// Identifier of the source extension
    pub source: String,
}

/// Wallet account discovery and selection state.
///
/// The first account returned by discovery becomes the default selection;
/// callers can override it by address at any time.
pub struct AccountProvider {
    extension: Arc<dyn WalletExtension>,
    accounts: Vec<WalletAccount>,
    selected: Option<usize>,
}

impl AccountProvider {
    pub fn new(extension: Arc<dyn WalletExtension>) -> Self {
        Self {
            extension,
            accounts: Vec::new(),
            selected: None,
        }
    }

    /// Run discovery: request permission, then enumerate accounts.
    ///
    /// Replaces any previously discovered set. Returns the accounts found;
    /// an empty slice means the extension is present but nothing is
    /// authorized — callers must surface that distinctly from `NoExtension`.
    pub async fn connect(&mut self, app_name: &str) -> Result<&[WalletAccount]> {
        self.extension.enable(app_name).await?;

        let accounts = self.extension.accounts().await?;
        info!("Wallet discovery found {} account(s)", accounts.len());

        self.selected = if accounts.is_empty() { None } else { Some(0) };
        self.accounts = accounts;
        Ok(&self.accounts)
    }

    pub fn accounts(&self) -> &[WalletAccount] {
        &self.accounts
    }

    /// Currently selected account, if any.
    pub fn selected(&self) -> Option<&WalletAccount> {
        self.selected.and_then(|idx| self.accounts.get(idx))
    }

    /// Select an account by address.
    pub fn select(&mut self, address: &str) -> Result<()> {
        match self.accounts.iter().position(|a| a.address == address) {
            Some(idx) => {
                debug!("Selected account {}", address);
                self.selected = Some(idx);
                Ok(())
            }
            None => Err(AppError::NoAccount(format!(
                "No discovered account with address {}",
                address
            ))),
        }
    }

    /// Signer capability for the selected account.
    pub async fn signer_for_selected(&self) -> Result<Arc<dyn TransferSigner>> {
        let account = self
            .selected()
            .ok_or_else(|| AppError::NoAccount("No account selected".to_string()))?;
        self.extension.signer(&account.address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lib_core::dto::transfer::{SignedTransfer, TransferIntent};

    struct FakeExtension {
        accounts: Vec<WalletAccount>,
        present: bool,
    }

    struct FakeSigner;

    #[async_trait]
    impl TransferSigner for FakeSigner {
        async fn sign_transfer(&self, intent: &TransferIntent) -> Result<SignedTransfer> {
            Ok(SignedTransfer {
                extrinsic: format!("0xsigned-{}", intent.amount_minimal),
                tx_hash: "0xhash".to_string(),
            })
        }
    }

    #[async_trait]
    impl WalletExtension for FakeExtension {
        async fn enable(&self, _app_name: &str) -> Result<()> {
            if self.present {
                Ok(())
            } else {
                Err(AppError::NoExtension("nothing injected".to_string()))
            }
        }

        async fn accounts(&self) -> Result<Vec<WalletAccount>> {
            Ok(self.accounts.clone())
        }

        async fn signer(&self, _address: &str) -> Result<Arc<dyn TransferSigner>> {
            Ok(Arc::new(FakeSigner))
        }
    }

    fn account(address: &str, name: &str) -> WalletAccount {
        WalletAccount {
            address: address.to_string(),
            name: name.to_string(),
            source: "fake-extension".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_account_is_default_selection() {
        let ext = Arc::new(FakeExtension {
            accounts: vec![account("5Grw", "Alice"), account("5FHn", "Bob")],
            present: true,
        });
        let mut provider = AccountProvider::new(ext);

        let found = provider.connect("SuperPage").await.expect("discovery");
        assert_eq!(found.len(), 2);
        assert_eq!(provider.selected().map(|a| a.name.as_str()), Some("Alice"));
    }

    #[tokio::test]
    async fn test_select_by_address_and_unknown_address() {
        let ext = Arc::new(FakeExtension {
            accounts: vec![account("5Grw", "Alice"), account("5FHn", "Bob")],
            present: true,
        });
        let mut provider = AccountProvider::new(ext);
        provider.connect("SuperPage").await.expect("discovery");

        provider.select("5FHn").expect("known address");
        assert_eq!(provider.selected().map(|a| a.name.as_str()), Some("Bob"));

        let err = provider.select("5Xyz").unwrap_err();
        assert!(matches!(err, AppError::NoAccount(_)));
        // Selection is unchanged after a failed select.
        assert_eq!(provider.selected().map(|a| a.name.as_str()), Some("Bob"));
    }

    #[tokio::test]
    async fn test_no_extension_is_distinct_from_no_accounts() {
        let absent = Arc::new(FakeExtension {
            accounts: vec![],
            present: false,
        });
        let mut provider = AccountProvider::new(absent);
        let err = provider.connect("SuperPage").await.unwrap_err();
        assert!(matches!(err, AppError::NoExtension(_)));

        let empty = Arc::new(FakeExtension {
            accounts: vec![],
            present: true,
        });
        let mut provider = AccountProvider::new(empty);
        let found = provider.connect("SuperPage").await.expect("discovery");
        assert!(found.is_empty());
        assert!(provider.selected().is_none());
    }

    #[tokio::test]
    async fn test_signer_requires_selection() {
        let ext = Arc::new(FakeExtension {
            accounts: vec![],
            present: true,
        });
        let mut provider = AccountProvider::new(ext);
        provider.connect("SuperPage").await.expect("discovery");

        let err = match provider.signer_for_selected().await {
            Err(err) => err,
            Ok(_) => panic!("expected an error without a selection"),
        };
        assert!(matches!(err, AppError::NoAccount(_)));
    }
}
