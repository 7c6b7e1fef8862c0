// crates/nostrust-reputation/src/lib.rs
//
// nostrust-reputation: personalized web-of-trust scoring for nostrust.
//
// Trust starts at one seed identity and flows outward along follow edges for
// a bounded number of hops. Mutes and reports then subtract trust, reposts
// add a little back, and the resulting ledger is ranked for display.

pub mod boost;
pub mod distrust;
pub mod engine;
mod fetch;
pub mod follow;
pub mod ledger;
pub mod ranker;

pub use engine::TrustEngine;
pub use ledger::{Ledger, SideTable};
pub use ranker::RankedEntry;
