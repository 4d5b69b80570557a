//! Spot-to-workshop ingestion.
//!
//! One workshop is derived per upstream spot and persisted in upstream
//! order. By default each row is inserted on its own, so a storage failure
//! part-way through leaves the earlier rows in place and still fails the
//! call. [`IngestOptions::atomic`] inserts the batch in one transaction
//! instead.

use std::collections::HashSet;
use std::sync::Arc;

use sharenet_core::error::CoreError;
use sharenet_core::seats::SeatPolicy;
use sharenet_core::spot::Spot;
use sharenet_core::types::Timestamp;
use sharenet_core::workshop::{scheduled_date, workshop_title, DEFAULT_VENUE};
use sharenet_db::models::workshop::{CreateWorkshop, Workshop};
use sharenet_db::repositories::WorkshopRepo;
use sharenet_db::DbPool;
use sharenet_spots::{SpotSource, SpotsError};

/// Errors from a single ingestion run.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    /// The spot listing could not be fetched.
    #[error("Failed to fetch spots: {0}")]
    Upstream(#[from] SpotsError),

    /// A spot could not be turned into a workshop.
    #[error("Spot {code} is invalid: {reason}")]
    InvalidSpot { code: String, reason: String },

    /// Persisting a derived workshop failed.
    #[error("Failed to store workshop: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Tunables for ingestion.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Venue assigned to every ingested workshop.
    pub venue: String,
    /// Range and seed for the initial seat count.
    pub seats: SeatPolicy,
    /// Insert the whole batch in one transaction.
    pub atomic: bool,
    /// Skip spots whose (code, date) pair is already scheduled.
    pub skip_duplicates: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            venue: DEFAULT_VENUE.to_string(),
            seats: SeatPolicy::default(),
            atomic: false,
            skip_duplicates: false,
        }
    }
}

/// Derive the workshop for a spot.
pub fn derive_workshop(
    spot: &Spot,
    venue: &str,
    available_seats: i32,
) -> Result<CreateWorkshop, CoreError> {
    let date = scheduled_date(spot.event_time()?)?;
    Ok(CreateWorkshop {
        title: workshop_title(&spot.full_name),
        date,
        venue: venue.to_string(),
        available_seats,
        spot_code: spot.code.clone(),
        spot_name: spot.full_name.clone(),
        category_name: spot.category_name.clone(),
    })
}

/// Pulls spots from a [`SpotSource`] and stores one workshop per spot.
#[derive(Clone)]
pub struct WorkshopIngestor {
    source: Arc<dyn SpotSource>,
    options: IngestOptions,
}

impl WorkshopIngestor {
    pub fn new(source: Arc<dyn SpotSource>, options: IngestOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Fetch the current spots and persist a workshop for each.
    ///
    /// Returns the newly created workshops in upstream order.
    pub async fn ingest(&self, pool: &DbPool) -> Result<Vec<Workshop>, IngestionError> {
        let spots = self.source.fetch_spots().await?;
        tracing::info!(count = spots.len(), "Ingesting workshops from spots");

        let drafts = self.derive_all(&spots)?;
        let skip = self.options.skip_duplicates;

        let created = if self.options.atomic {
            if skip {
                WorkshopRepo::create_batch_unless_scheduled(pool, &drafts).await?
            } else {
                WorkshopRepo::create_batch(pool, &drafts).await?
            }
        } else {
            let mut created = Vec::with_capacity(drafts.len());
            for draft in &drafts {
                let inserted = if skip {
                    WorkshopRepo::create_unless_scheduled(pool, draft).await
                } else {
                    WorkshopRepo::create(pool, draft).await.map(Some)
                };
                let inserted = inserted.map_err(|e| {
                    tracing::error!(
                        error = %e,
                        spot_code = %draft.spot_code,
                        persisted = created.len(),
                        "Workshop insert failed; earlier rows of this run remain stored"
                    );
                    e
                })?;
                match inserted {
                    Some(workshop) => created.push(workshop),
                    None => tracing::debug!(
                        spot_code = %draft.spot_code,
                        date = %draft.date,
                        "Skipping already scheduled spot"
                    ),
                }
            }
            created
        };

        tracing::info!(
            created = created.len(),
            skipped = spots.len() - created.len(),
            "Workshop ingestion complete"
        );
        Ok(created)
    }

    /// Derive every draft up front so a bad spot fails the run before any write.
    ///
    /// With `skip_duplicates`, repeats of a (code, date) pair within the
    /// listing are dropped here. Pairs already stored are skipped at insert
    /// time under the schedule lock.
    fn derive_all(&self, spots: &[Spot]) -> Result<Vec<CreateWorkshop>, IngestionError> {
        let mut rng = self.options.seats.rng();
        let mut seen: HashSet<(String, Timestamp)> = HashSet::new();
        let mut drafts = Vec::with_capacity(spots.len());

        for spot in spots {
            let seats = self.options.seats.draw(&mut rng);
            let draft = derive_workshop(spot, &self.options.venue, seats).map_err(|e| {
                IngestionError::InvalidSpot {
                    code: spot.code.clone(),
                    reason: e.to_string(),
                }
            })?;

            if self.options.skip_duplicates
                && !seen.insert((draft.spot_code.clone(), draft.date))
            {
                tracing::debug!(spot_code = %draft.spot_code, date = %draft.date, "Skipping repeated spot");
                continue;
            }

            drafts.push(draft);
        }

        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn spot(datetime: &str) -> Spot {
        Spot {
            code: "JSE".to_string(),
            full_name: "JSE Futures".to_string(),
            category_name: "Futures".to_string(),
            price: Some(100.0),
            move_: None,
            pmove: None,
            datetime: datetime.to_string(),
        }
    }

    #[test]
    fn derives_jse_futures_workshop() {
        let draft = derive_workshop(&spot("2024-01-10T09:00:00Z"), DEFAULT_VENUE, 7).unwrap();

        assert_eq!(draft.title, "JSE Futures Trading Workshop");
        assert_eq!(draft.date, Utc.with_ymd_and_hms(2024, 1, 11, 9, 0, 0).unwrap());
        assert_eq!(draft.venue, "Sharenet Training Room");
        assert_eq!(draft.available_seats, 7);
        assert_eq!(draft.spot_code, "JSE");
        assert_eq!(draft.spot_name, "JSE Futures");
        assert_eq!(draft.category_name, "Futures");
    }

    #[test]
    fn bad_datetime_is_rejected() {
        let err = derive_workshop(&spot("not a date"), DEFAULT_VENUE, 1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
