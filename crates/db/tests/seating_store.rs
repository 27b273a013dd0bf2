//! Integration tests for seating persistence.
//!
//! Exercises the repositories and `PgSeatingStore` against a real database:
//! - Table creation with seats in one transaction
//! - Conditional seat assignment and guest moves
//! - Cascades and `ON DELETE SET NULL` behaviour
//! - The planner driving the PostgreSQL store end to end

use assert_matches::assert_matches;
use sqlx::PgPool;
use wedplan_core::messages::english_translator;
use wedplan_core::roles::AuthContext;
use wedplan_core::seating::assignment::AssignmentPlan;
use wedplan_core::seating::canvas::CanvasPoint;
use wedplan_core::seating::drag::DragPayload;
use wedplan_core::seating::geometry::TableShape;
use wedplan_core::seating::planner::{DropOutcome, PlannerError, TablePlanner};
use wedplan_core::seating::store::{SeatingStore, StoreError};
use wedplan_core::seating::table_spec::NewTable;
use wedplan_db::models::guest::CreateGuest;
use wedplan_db::models::table_group::CreateTableGroup;
use wedplan_db::models::wedding::CreateWedding;
use wedplan_db::repositories::seat_repo::SeatAssignment;
use wedplan_db::repositories::{GuestRepo, SeatRepo, SeatingTableRepo, TableGroupRepo, WeddingRepo};
use wedplan_db::PgSeatingStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn wedding(pool: &PgPool, name: &str) -> i64 {
    WeddingRepo::create(
        pool,
        &CreateWedding {
            name: name.to_string(),
            wedding_date: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn guest(pool: &PgPool, wedding_id: i64, name: &str) -> i64 {
    GuestRepo::create(
        pool,
        wedding_id,
        &CreateGuest {
            name: name.to_string(),
            category: Some("family".to_string()),
            rsvp_status: None,
            dietary_restrictions: None,
            plus_one: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn editor() -> AuthContext {
    AuthContext {
        user_id: 1,
        can_edit_tables: true,
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check(pool: PgPool) {
    wedplan_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_table_created_with_capacity_seats(pool: PgPool) {
    let w = wedding(&pool, "Ada & Ben").await;

    let (table, seats) = SeatingTableRepo::create_with_seats(
        &pool,
        w,
        &NewTable::new("Head", TableShape::Rectangle, 6),
    )
    .await
    .unwrap();

    assert_eq!(table.capacity, 6);
    assert_eq!(table.shape, "rectangle");
    assert_eq!((table.width, table.height), (300.0, 150.0));
    assert_eq!((table.position_x, table.position_y), (50.0, 50.0));
    let indices: Vec<i32> = seats.iter().map(|s| s.seat_index).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4, 5]);
    assert!(seats.iter().all(|s| s.guest_id.is_none()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_only_into_vacant_seat(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let ada = guest(&pool, w, "Ada").await;
    let ben = guest(&pool, w, "Ben").await;
    let (_, seats) =
        SeatingTableRepo::create_with_seats(&pool, w, &NewTable::new("T", TableShape::Round, 2))
            .await
            .unwrap();

    let first = SeatRepo::assign_guest(&pool, seats[0].id, ada).await.unwrap();
    assert_matches!(first, SeatAssignment::Assigned { ref vacated, .. } if vacated.is_empty());

    let second = SeatRepo::assign_guest(&pool, seats[0].id, ben).await.unwrap();
    assert_matches!(second, SeatAssignment::Occupied);

    let seat = SeatRepo::find_by_id(&pool, seats[0].id).await.unwrap().unwrap();
    assert_eq!(seat.guest_id, Some(ada));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_moves_guest_between_seats(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let ada = guest(&pool, w, "Ada").await;
    let (_, seats) =
        SeatingTableRepo::create_with_seats(&pool, w, &NewTable::new("T", TableShape::Round, 3))
            .await
            .unwrap();

    SeatRepo::assign_guest(&pool, seats[0].id, ada).await.unwrap();
    let moved = SeatRepo::assign_guest(&pool, seats[2].id, ada).await.unwrap();

    assert_matches!(moved, SeatAssignment::Assigned { ref vacated, .. } if vacated == &[seats[0].id]);
    let old = SeatRepo::find_by_id(&pool, seats[0].id).await.unwrap().unwrap();
    assert_eq!(old.guest_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_guest_from_other_wedding_rejected(pool: PgPool) {
    let w1 = wedding(&pool, "One").await;
    let w2 = wedding(&pool, "Two").await;
    let stranger = guest(&pool, w2, "Stranger").await;
    let (_, seats) =
        SeatingTableRepo::create_with_seats(&pool, w1, &NewTable::new("T", TableShape::Round, 1))
            .await
            .unwrap();

    let result = SeatRepo::assign_guest(&pool, seats[0].id, stranger).await.unwrap();
    assert_matches!(result, SeatAssignment::NotFound);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_guest_vacates_seat(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let ada = guest(&pool, w, "Ada").await;
    let (_, seats) =
        SeatingTableRepo::create_with_seats(&pool, w, &NewTable::new("T", TableShape::Round, 1))
            .await
            .unwrap();
    SeatRepo::assign_guest(&pool, seats[0].id, ada).await.unwrap();

    assert!(GuestRepo::delete(&pool, ada).await.unwrap());

    let seat = SeatRepo::find_by_id(&pool, seats[0].id).await.unwrap().unwrap();
    assert_eq!(seat.guest_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_group_ungroups_tables(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let group = TableGroupRepo::create(
        &pool,
        w,
        &CreateTableGroup {
            name: "Family".to_string(),
            color: None,
            group_type: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(group.color, "#6366f1");
    assert_eq!(group.group_type, "standard");

    let (table, _) =
        SeatingTableRepo::create_with_seats(&pool, w, &NewTable::new("T", TableShape::Round, 4))
            .await
            .unwrap();
    SeatingTableRepo::set_group(&pool, table.id, Some(group.id)).await.unwrap().unwrap();
    assert_eq!(
        SeatingTableRepo::list_by_wedding(&pool, w, Some(group.id)).await.unwrap().len(),
        1
    );

    TableGroupRepo::delete(&pool, group.id).await.unwrap();
    let table = SeatingTableRepo::find_by_id(&pool, table.id).await.unwrap().unwrap();
    assert_eq!(table.group_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_group_from_other_wedding_not_assignable(pool: PgPool) {
    let w1 = wedding(&pool, "One").await;
    let w2 = wedding(&pool, "Two").await;
    let foreign = TableGroupRepo::create(
        &pool,
        w2,
        &CreateTableGroup {
            name: "Other".to_string(),
            color: Some("#123abc".to_string()),
            group_type: None,
        },
    )
    .await
    .unwrap();
    let (table, _) =
        SeatingTableRepo::create_with_seats(&pool, w1, &NewTable::new("T", TableShape::Round, 4))
            .await
            .unwrap();

    let updated = SeatingTableRepo::set_group(&pool, table.id, Some(foreign.id))
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_group_name_violates_unique(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let dto = CreateTableGroup {
        name: "Friends".to_string(),
        color: None,
        group_type: None,
    };
    TableGroupRepo::create(&pool, w, &dto).await.unwrap();

    let result = TableGroupRepo::create(&pool, w, &dto).await;
    assert!(result.is_err(), "Duplicate group name should fail");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wedding_delete_cascades(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    guest(&pool, w, "Ada").await;
    let (table, seats) =
        SeatingTableRepo::create_with_seats(&pool, w, &NewTable::new("T", TableShape::Round, 2))
            .await
            .unwrap();

    assert!(WeddingRepo::delete(&pool, w).await.unwrap());

    assert!(SeatingTableRepo::find_by_id(&pool, table.id).await.unwrap().is_none());
    assert!(SeatRepo::find_by_id(&pool, seats[0].id).await.unwrap().is_none());
    assert!(GuestRepo::list_by_wedding(&pool, w).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Store and planner
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_load_plan_unknown_wedding(pool: PgPool) {
    let store = PgSeatingStore::new(pool);
    assert_matches!(
        store.load_plan(999_999).await,
        Err(StoreError::NotFound { entity: "Wedding", .. })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_store_reports_conflict_for_occupied_seat(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let ada = guest(&pool, w, "Ada").await;
    let ben = guest(&pool, w, "Ben").await;
    let store = PgSeatingStore::new(pool.clone());
    let table = store
        .create_table(w, &NewTable::new("T", TableShape::Round, 1))
        .await
        .unwrap();
    let seat_id = table.seats[0].id;

    store
        .assign_guest_to_seat(&AssignmentPlan { seat_id, guest_id: ada, vacate_seat_id: None })
        .await
        .unwrap();
    let result = store
        .assign_guest_to_seat(&AssignmentPlan { seat_id, guest_id: ben, vacate_seat_id: None })
        .await;
    assert_matches!(result, Err(StoreError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_planner_round_trip(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let ada = guest(&pool, w, "Ada").await;
    let store = PgSeatingStore::new(pool.clone());

    let mut planner = TablePlanner::load(store.clone(), editor(), english_translator(), w)
        .await
        .unwrap();
    let table = planner
        .add_table(NewTable::new("Head", TableShape::Round, 8))
        .await
        .unwrap();
    let seat_id = table.seats[3].id;

    let outcome = planner
        .drop_on_seat(seat_id, &DragPayload::Guest { guest_id: ada }.encode())
        .await
        .unwrap();
    assert_matches!(outcome, DropOutcome::Assigned(_));

    planner.rotate_table(table.id).await.unwrap();
    planner
        .drop_on_canvas(
            &DragPayload::Table { table_id: table.id, offset_x: 10.0, offset_y: 10.0 }.encode(),
            CanvasPoint::new(410.0, 310.0),
            CanvasPoint::new(0.0, 0.0),
            2.0,
        )
        .await
        .unwrap();

    // A fresh load sees exactly what the planner confirmed.
    let fresh = TablePlanner::load(store, editor(), english_translator(), w)
        .await
        .unwrap();
    assert_eq!(fresh.snapshot(), planner.snapshot());
    let stored = fresh.snapshot().table(table.id).unwrap();
    assert_eq!(stored.rotation, 45.0);
    assert_eq!(stored.position, CanvasPoint::new(200.0, 150.0));
    assert_eq!(fresh.snapshot().seat_of_guest(ada), Some(seat_id));
    assert!(fresh.view(None).unassigned_guests.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_planner_viewer_cannot_write(pool: PgPool) {
    let w = wedding(&pool, "W").await;
    let ada = guest(&pool, w, "Ada").await;
    let store = PgSeatingStore::new(pool.clone());
    let table = store
        .create_table(w, &NewTable::new("T", TableShape::Round, 2))
        .await
        .unwrap();

    let viewer = AuthContext { user_id: 2, can_edit_tables: false };
    let mut planner = TablePlanner::load(store, viewer, english_translator(), w)
        .await
        .unwrap();
    let result = planner
        .drop_on_seat(table.seats[0].id, &DragPayload::Guest { guest_id: ada }.encode())
        .await;
    assert_matches!(result, Err(PlannerError::Permission(_)));

    let seat = SeatRepo::find_by_id(&pool, table.seats[0].id).await.unwrap().unwrap();
    assert_eq!(seat.guest_id, None);
}
