//! Workshop ingestion and booking.
//!
//! [`ingest`] turns upstream spots into persisted workshops; [`booking`]
//! takes a seat on an existing workshop.

pub mod booking;
pub mod ingest;

pub use booking::{book, BookingError};
pub use ingest::{derive_workshop, IngestOptions, IngestionError, WorkshopIngestor};
