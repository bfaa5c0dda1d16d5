//! # hearth-cli — Local Sandbox Command-Line Interface
//!
//! Drives the full escrow lifecycle against a simulated settlement chain
//! and an in-memory mirror, both persisted to a JSON state file between
//! invocations. No network, no browser wallet: the `--as` flag stands in
//! for the connected account.
//!
//! ## Subcommands
//!
//! - `init` / `faucet` / `advance` — sandbox setup, funding, and clock
//!   control
//! - `open` / `release` / `dispute` / `auto-release` / `arbitrate` — the
//!   five lifecycle actions
//! - `list` / `show` — mirror views, including the actions offered to the
//!   acting account
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to the coordinator — no lifecycle rules here.

pub mod actions;
pub mod admin;
pub mod query;
pub mod sandbox;
