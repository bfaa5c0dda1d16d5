//! # Sandbox State File
//!
//! The sandbox persists a simulated chain and its mirror as one JSON
//! document, loaded at the start of an invocation and written back after
//! a successful mutation. A failed command leaves the file as it was.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use hearth_core::Address;
use hearth_escrow::EscrowCoordinator;
use hearth_ledger::{LedgerClient, SimLedger, SimState, WalletSession};
use hearth_mirror::{MemoryStore, StoreData};

/// Default path of the sandbox state file.
pub const DEFAULT_STATE_FILE: &str = "hearth-sandbox.json";

/// Manager address deployed when `init` is not given one.
const DEFAULT_MANAGER: &str = "0x00000000000000000000000000000000000000ec";

/// On-disk shape of a sandbox: the chain and its mirror, side by side.
#[derive(Debug, Serialize, Deserialize)]
struct SandboxFile {
    chain: SimState,
    mirror: StoreData,
}

/// A loaded sandbox: live handles plus the path to write back to.
pub struct Sandbox {
    path: PathBuf,
    pub ledger: SimLedger,
    pub store: MemoryStore,
}

impl Sandbox {
    /// Create a fresh sandbox file. Refuses to clobber an existing one.
    pub fn create(path: &Path, manager: Option<Address>) -> anyhow::Result<Self> {
        if path.exists() {
            anyhow::bail!("state file {} already exists", path.display());
        }
        let manager = match manager {
            Some(manager) => manager,
            None => Address::parse(DEFAULT_MANAGER)?,
        };
        let sandbox = Self {
            path: path.to_path_buf(),
            ledger: SimLedger::new(manager),
            store: MemoryStore::new(),
        };
        sandbox.save()?;
        Ok(sandbox)
    }

    /// Load a sandbox from its state file.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading state file {}", path.display()))?;
        let file: SandboxFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing state file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "sandbox state loaded");
        Ok(Self {
            path: path.to_path_buf(),
            ledger: SimLedger::from_state(file.chain),
            store: MemoryStore::from_data(file.mirror),
        })
    }

    /// Write the current chain and mirror back to the state file.
    pub fn save(&self) -> anyhow::Result<()> {
        let file = SandboxFile {
            chain: self.ledger.snapshot()?,
            mirror: self.store.snapshot()?,
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing state file {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "sandbox state saved");
        Ok(())
    }

    /// A coordinator acting as `account` over this sandbox's handles.
    pub fn coordinator(
        &self,
        account: Address,
    ) -> anyhow::Result<EscrowCoordinator<SimLedger, MemoryStore>> {
        let client = LedgerClient::new(
            self.ledger.clone(),
            WalletSession::connect(account),
            self.ledger.manager()?,
        );
        Ok(EscrowCoordinator::new(client, self.store.clone()))
    }
}
