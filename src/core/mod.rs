pub mod coach;
pub mod goals;
pub mod session;
pub mod views;
