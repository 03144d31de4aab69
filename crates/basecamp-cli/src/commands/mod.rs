pub mod check;
pub mod setup;
