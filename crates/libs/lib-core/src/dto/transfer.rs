//! # Transfer Value Objects
//!
//! Per-attempt payment values passed from the submission engine to the wallet
//! signer and the chain session. A [`TransferIntent`] is built at submission
//! time and discarded once the attempt resolves or is reset.

use serde::{Deserialize, Serialize};

/// Which balance-transfer call the signed extrinsic carries.
///
/// `KeepAlive` refuses transfers that would reap the sender account below the
/// existential deposit; `AllowDeath` permits them. Chain-specific, selected
/// via configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferCall {
    KeepAlive,
    AllowDeath,
}

impl TransferCall {
    /// Runtime call name as exposed by the chain's balances pallet.
    pub fn call_name(&self) -> &'static str {
        match self {
            TransferCall::KeepAlive => "balances.transferKeepAlive",
            TransferCall::AllowDeath => "balances.transferAllowDeath",
        }
    }
}

/// Ephemeral value object describing one payment attempt.
///
/// The recipient is a raw address string, unvalidated beyond non-empty; the
/// chain itself rejects malformed recipients at dispatch. Amounts are carried
/// both in display units (as entered) and in exact minimal units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
    /// Sender account address (SS58-encoded public key)
    pub sender: String,
    /// Recipient address as entered by the user
    pub recipient: String,
    /// Amount in display units, as entered (decimal string)
    pub amount_display: String,
    /// Amount in the chain's minimal unit
    pub amount_minimal: u128,
    /// Transfer call flavor to submit
    pub call: TransferCall,
}

/// A signed, submit-ready extrinsic produced by the wallet signer.
///
/// The application never sees key material; it receives only the encoded
/// extrinsic and its transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransfer {
    /// Hex-encoded signed extrinsic, ready for `author_submitAndWatchExtrinsic`
    pub extrinsic: String,
    /// Transaction hash of the signed extrinsic (hex string)
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_names() {
        assert_eq!(TransferCall::KeepAlive.call_name(), "balances.transferKeepAlive");
        assert_eq!(TransferCall::AllowDeath.call_name(), "balances.transferAllowDeath");
    }

    #[test]
    fn test_transfer_call_serde() {
        let json = serde_json::to_string(&TransferCall::KeepAlive).unwrap();
        assert_eq!(json, "\"keep-alive\"");
        let back: TransferCall = serde_json::from_str("\"allow-death\"").unwrap();
        assert_eq!(back, TransferCall::AllowDeath);
    }
}
