//! # Query Subcommands
//!
//! Read-only views over the mirror: the per-account escrow list with
//! offered actions, and the full mirrored record of one escrow.

use std::path::Path;

use clap::Args;

use hearth_core::{Address, EscrowId, Timestamp};
use hearth_mirror::MirrorStore;

use crate::sandbox::Sandbox;

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Account whose escrows to list.
    #[arg(long = "as", value_name = "ADDRESS")]
    pub account: Address,
}

pub async fn list(state: &Path, args: ListArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    let coordinator = sandbox.coordinator(args.account)?;
    let mine = coordinator.my_escrows().await?;
    if mine.is_empty() {
        println!("no escrows for {}", coordinator.account().truncated());
        return Ok(());
    }

    let now = Timestamp::now();
    for entry in &mine {
        let offered = coordinator.offered_actions(&entry.record, now);
        let offered = if offered.is_empty() {
            "-".to_string()
        } else {
            offered
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        println!(
            "{}  {:<9}  as {:<7}  {:>10}  {}  [{}]",
            entry.record.id,
            entry.record.status,
            entry.role,
            entry.record.amount,
            entry.record.listing_title,
            offered,
        );
    }
    Ok(())
}

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Escrow to show.
    #[arg(long)]
    pub id: u64,
}

pub async fn show(state: &Path, args: ShowArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    let record = sandbox
        .store
        .get_escrow(EscrowId(args.id))
        .await?
        .ok_or_else(|| anyhow::anyhow!("no mirrored escrow with id {}", args.id))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
