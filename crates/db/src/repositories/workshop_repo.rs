//! Repository for the `workshops` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use sharenet_core::types::{DbId, Timestamp};

use crate::models::workshop::{CreateWorkshop, UpdateWorkshop, Workshop};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, date, venue, available_seats, spot_code, spot_name, \
    category_name, created_at, updated_at";

/// Advisory lock key serialising skip-if-scheduled inserts across connections.
const SCHEDULE_LOCK_KEY: i64 = 0x5348_4e54_574b_5348;

/// Provides CRUD operations and the seat booking statement for workshops.
pub struct WorkshopRepo;

impl WorkshopRepo {
    /// Insert a new workshop, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorkshop) -> Result<Workshop, sqlx::Error> {
        let query = insert_query();
        bind_create(sqlx::query_as::<_, Workshop>(&query), input)
            .fetch_one(pool)
            .await
    }

    /// Insert several workshops in a single transaction.
    ///
    /// Either every row is inserted or none is. Rows are returned in input order.
    pub async fn create_batch(
        pool: &PgPool,
        inputs: &[CreateWorkshop],
    ) -> Result<Vec<Workshop>, sqlx::Error> {
        let query = insert_query();
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let workshop = bind_create(sqlx::query_as::<_, Workshop>(&query), input)
                .fetch_one(&mut *tx)
                .await?;
            created.push(workshop);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a workshop by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workshops WHERE id = $1");
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all workshops, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Workshop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workshops ORDER BY date ASC, id ASC");
        sqlx::query_as::<_, Workshop>(&query).fetch_all(pool).await
    }

    /// Whether a workshop derived from `spot_code` is already scheduled on `date`.
    pub async fn exists_for_spot<'e>(
        executor: impl PgExecutor<'e>,
        spot_code: &str,
        date: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM workshops WHERE spot_code = $1 AND date = $2)",
        )
        .bind(spot_code)
        .bind(date)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Insert a workshop unless one for the same spot code and date exists.
    ///
    /// The check and the insert run in one transaction holding
    /// [`SCHEDULE_LOCK_KEY`], so concurrent callers cannot both insert the
    /// same pair. Returns `None` when the pair was already scheduled.
    pub async fn create_unless_scheduled(
        pool: &PgPool,
        input: &CreateWorkshop,
    ) -> Result<Option<Workshop>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_schedule(&mut tx).await?;
        let created = insert_unless_scheduled(&mut tx, input).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Batch form of [`Self::create_unless_scheduled`].
    ///
    /// All rows go in one transaction. Already scheduled pairs are skipped and
    /// the created rows are returned in input order.
    pub async fn create_batch_unless_scheduled(
        pool: &PgPool,
        inputs: &[CreateWorkshop],
    ) -> Result<Vec<Workshop>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_schedule(&mut tx).await?;

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            if let Some(workshop) = insert_unless_scheduled(&mut tx, input).await? {
                created.push(workshop);
            }
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update a workshop. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkshop,
    ) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!(
            "UPDATE workshops SET \
                title = COALESCE($2, title), \
                date = COALESCE($3, date), \
                venue = COALESCE($4, venue), \
                available_seats = COALESCE($5, available_seats), \
                spot_code = COALESCE($6, spot_code), \
                spot_name = COALESCE($7, spot_name), \
                category_name = COALESCE($8, category_name), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.venue)
            .bind(input.available_seats)
            .bind(&input.spot_code)
            .bind(&input.spot_name)
            .bind(&input.category_name)
            .fetch_optional(pool)
            .await
    }

    /// Take one seat if any is left.
    ///
    /// The check and the decrement are a single statement, so concurrent
    /// callers can never drive the count below zero. Returns `None` when the
    /// workshop does not exist or has no seats left.
    pub async fn book_seat(pool: &PgPool, id: DbId) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!(
            "UPDATE workshops SET \
                available_seats = available_seats - 1, \
                updated_at = NOW() \
             WHERE id = $1 AND available_seats > 0 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a workshop, returning the removed row.
    ///
    /// Returns `None` if no row with the given `id` existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!("DELETE FROM workshops WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Take the transaction-scoped schedule lock. Released on commit or rollback.
async fn lock_schedule(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEDULE_LOCK_KEY)
        .execute(conn)
        .await?;
    Ok(())
}

async fn insert_unless_scheduled(
    conn: &mut PgConnection,
    input: &CreateWorkshop,
) -> Result<Option<Workshop>, sqlx::Error> {
    if WorkshopRepo::exists_for_spot(&mut *conn, &input.spot_code, input.date).await? {
        return Ok(None);
    }
    let query = insert_query();
    let workshop = bind_create(sqlx::query_as::<_, Workshop>(&query), input)
        .fetch_one(conn)
        .await?;
    Ok(Some(workshop))
}

fn insert_query() -> String {
    format!(
        "INSERT INTO workshops \
            (title, date, venue, available_seats, spot_code, spot_name, category_name) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {COLUMNS}"
    )
}

type WorkshopQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, Workshop, sqlx::postgres::PgArguments>;

fn bind_create<'q>(query: WorkshopQuery<'q>, input: &'q CreateWorkshop) -> WorkshopQuery<'q> {
    query
        .bind(&input.title)
        .bind(input.date)
        .bind(&input.venue)
        .bind(input.available_seats)
        .bind(&input.spot_code)
        .bind(&input.spot_name)
        .bind(&input.category_name)
}
