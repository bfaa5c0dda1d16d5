//! # Wallet Sessions
//!
//! The caller's on-chain identity, resolved once at connect time and
//! threaded explicitly into the ledger client. The original held the
//! connected account in process-wide context; here the session is a value
//! with a visible connect/disconnect lifecycle, so nothing downstream can
//! observe a half-connected wallet.

use hearth_core::Address;

/// A connected wallet identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    account: Address,
}

impl WalletSession {
    /// Establish a session for the given account.
    pub fn connect(account: Address) -> Self {
        tracing::info!(account = %account.truncated(), "wallet session connected");
        Self { account }
    }

    /// The connected account address.
    pub fn account(&self) -> &Address {
        &self.account
    }

    /// Tear the session down. Consumes the session so no client can keep
    /// using a disconnected identity.
    pub fn disconnect(self) {
        tracing::info!(account = %self.account.truncated(), "wallet session disconnected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_exposes_connected_account() {
        let addr = Address::parse("0x1111111111111111111111111111111111111111").unwrap();
        let session = WalletSession::connect(addr.clone());
        assert_eq!(session.account(), &addr);
        session.disconnect();
    }
}
