pub mod history;
pub mod postgres_service;
pub mod user;
