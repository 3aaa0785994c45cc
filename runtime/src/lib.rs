//! Ledger runtime for the house programs.
//!
//! Holds every account in an explicit store, derives program addresses the
//! same way the Solana runtime does, and executes transactions atomically:
//! either every instruction lands or the store is left untouched.

pub mod account;
pub mod address;
pub mod context;
pub mod ed25519;
pub mod error;
pub mod ledger;
pub mod token;

pub use account::*;
pub use address::*;
pub use context::*;
pub use ed25519::*;
pub use error::*;
pub use ledger::*;
