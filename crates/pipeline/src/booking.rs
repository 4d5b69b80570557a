//! Seat booking.

use sharenet_core::types::DbId;
use sharenet_db::models::workshop::Workshop;
use sharenet_db::repositories::WorkshopRepo;
use sharenet_db::DbPool;

/// Why a booking did not go through.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Workshop {0} not found")]
    NotFound(DbId),

    #[error("Workshop {0} has no available seats")]
    NoSeats(DbId),

    #[error("Failed to book workshop: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Take one seat on workshop `id` and return the updated workshop.
///
/// The decrement is conditional on a seat being left, so the stored count
/// never goes negative. When nothing was updated the row is re-read only to
/// tell a missing workshop apart from a full one.
pub async fn book(pool: &DbPool, id: DbId) -> Result<Workshop, BookingError> {
    if let Some(workshop) = WorkshopRepo::book_seat(pool, id).await? {
        tracing::info!(
            workshop_id = id,
            available_seats = workshop.available_seats,
            "Seat booked"
        );
        return Ok(workshop);
    }

    match WorkshopRepo::find_by_id(pool, id).await? {
        Some(_) => {
            tracing::debug!(workshop_id = id, "Booking rejected, no seats left");
            Err(BookingError::NoSeats(id))
        }
        None => Err(BookingError::NotFound(id)),
    }
}
