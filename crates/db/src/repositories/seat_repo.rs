//! Repository for the `seats` table.
//!
//! Occupancy writes are conditional: a guest is only ever written into a
//! vacant seat, and seating a guest clears any other seat they held in the
//! same transaction.

use sqlx::PgPool;
use wedplan_core::types::DbId;

use crate::models::seat::Seat;

/// Column list for `seats` queries.
pub(crate) const SEAT_COLUMNS: &str = "id, table_id, seat_index, guest_id, created_at, updated_at";

/// Outcome of a conditional guest assignment.
#[derive(Debug)]
pub enum SeatAssignment {
    /// The guest now sits in `seat`; `vacated` lists seats they left.
    Assigned { seat: Seat, vacated: Vec<DbId> },
    /// The seat exists but already holds a guest.
    Occupied,
    /// No such seat, or seat and guest belong to different weddings.
    NotFound,
}

/// Provides data access for seats.
pub struct SeatRepo;

impl SeatRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!("SELECT {SEAT_COLUMNS} FROM seats WHERE id = $1");
        sqlx::query_as::<_, Seat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Seats of one table ordered by index.
    pub async fn list_by_table(pool: &PgPool, table_id: DbId) -> Result<Vec<Seat>, sqlx::Error> {
        let query = format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE table_id = $1 ORDER BY seat_index"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(table_id)
            .fetch_all(pool)
            .await
    }

    /// Every seat of every table in a wedding.
    pub async fn list_by_wedding(
        pool: &PgPool,
        wedding_id: DbId,
    ) -> Result<Vec<Seat>, sqlx::Error> {
        let query = "\
            SELECT s.id, s.table_id, s.seat_index, s.guest_id, s.created_at, s.updated_at \
            FROM seats s \
            JOIN seating_tables t ON t.id = s.table_id \
            WHERE t.wedding_id = $1 \
            ORDER BY s.table_id, s.seat_index";
        sqlx::query_as::<_, Seat>(query)
            .bind(wedding_id)
            .fetch_all(pool)
            .await
    }

    /// Wedding that owns the seat's table.
    pub async fn wedding_id_of(pool: &PgPool, seat_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT t.wedding_id FROM seats s \
             JOIN seating_tables t ON t.id = s.table_id \
             WHERE s.id = $1",
        )
        .bind(seat_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Seat `guest_id` in `seat_id`, moving them off any other seat.
    ///
    /// Runs in one transaction: the guest's previous seat is cleared first,
    /// then the target is written only if it is still vacant and belongs to
    /// the guest's wedding. If the target cannot be written nothing is
    /// committed.
    pub async fn assign_guest(
        pool: &PgPool,
        seat_id: DbId,
        guest_id: DbId,
    ) -> Result<SeatAssignment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let vacated: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE seats SET guest_id = NULL \
             WHERE guest_id = $1 AND id <> $2 \
             RETURNING id",
        )
        .bind(guest_id)
        .bind(seat_id)
        .fetch_all(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE seats SET guest_id = $2 \
             WHERE id = $1 \
               AND guest_id IS NULL \
               AND table_id IN ( \
                   SELECT t.id FROM seating_tables t \
                   JOIN guests g ON g.wedding_id = t.wedding_id \
                   WHERE g.id = $2) \
             RETURNING {SEAT_COLUMNS}"
        );
        let seat = sqlx::query_as::<_, Seat>(&query)
            .bind(seat_id)
            .bind(guest_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(seat) = seat else {
            let occupied: Option<(bool,)> =
                sqlx::query_as("SELECT guest_id IS NOT NULL FROM seats WHERE id = $1")
                    .bind(seat_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Ok(match occupied {
                Some((true,)) => SeatAssignment::Occupied,
                _ => SeatAssignment::NotFound,
            });
        };

        tx.commit().await?;
        Ok(SeatAssignment::Assigned {
            seat,
            vacated: vacated.into_iter().map(|(id,)| id).collect(),
        })
    }

    /// Vacate a seat. Returns the updated seat and the guest that left, or
    /// `None` if the seat does not exist.
    pub async fn remove_guest(
        pool: &PgPool,
        seat_id: DbId,
    ) -> Result<Option<(Seat, Option<DbId>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(Option<DbId>,)> =
            sqlx::query_as("SELECT guest_id FROM seats WHERE id = $1 FOR UPDATE")
                .bind(seat_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous,)) = previous else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE seats SET guest_id = NULL WHERE id = $1 RETURNING {SEAT_COLUMNS}"
        );
        let seat = sqlx::query_as::<_, Seat>(&query)
            .bind(seat_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((seat, previous)))
    }
}
