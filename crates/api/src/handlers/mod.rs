pub mod groups;
pub mod guests;
pub mod seating_plan;
pub mod seats;
pub mod tables;
pub mod weddings;
