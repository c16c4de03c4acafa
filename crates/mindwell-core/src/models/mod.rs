pub mod assessment;
pub mod conversation;
pub mod emotion;
pub mod mood_diary;
pub mod user;
