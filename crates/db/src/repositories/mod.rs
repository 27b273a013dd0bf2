//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod guest_repo;
pub mod seat_repo;
pub mod seating_table_repo;
pub mod table_group_repo;
pub mod wedding_repo;

pub use guest_repo::GuestRepo;
pub use seat_repo::SeatRepo;
pub use seating_table_repo::SeatingTableRepo;
pub use table_group_repo::TableGroupRepo;
pub use wedding_repo::WeddingRepo;
