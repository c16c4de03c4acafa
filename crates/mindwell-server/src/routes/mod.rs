pub mod assessments;
pub mod auth;
pub mod chat;
pub mod diary;
pub mod health;
pub mod users;
