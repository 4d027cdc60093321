pub mod checkin;
pub mod mood;

pub use checkin::CheckinRecord;
pub use mood::MoodCount;
