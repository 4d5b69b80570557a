//! Domain types and rules for the Sharenet workshop service.
//!
//! Holds everything that does not touch the network or the database:
//! the upstream spot shape, the spot-to-workshop derivation rules and the
//! seat allocation policy.

pub mod error;
pub mod seats;
pub mod spot;
pub mod types;
pub mod workshop;
