pub mod checkin;
pub mod config;
pub mod done;
pub mod goals;
pub mod history;
pub mod init;
pub mod mood;
pub mod session;
