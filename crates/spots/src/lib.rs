//! Client for the Sharenet spots listing.
//!
//! [`SpotSource`] is the seam the ingestion pipeline consumes;
//! [`HttpSpotSource`] is the production implementation backed by
//! [`reqwest`].

pub mod client;
pub mod source;

pub use client::{HttpSpotSource, SpotsError};
pub use source::SpotSource;
