//! Karma Courtroom session service.
//!
//! Wires the domain core to its collaborators: player identity, stats
//! stores, the post supply, and the audit trail. The service owns all I/O;
//! the rules themselves live in `courtroom_common`.

pub mod audit;
pub mod auth;
pub mod session;
pub mod store;
pub mod supply;
