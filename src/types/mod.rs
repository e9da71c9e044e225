pub mod error;
pub mod history;
pub mod response;
pub mod user;
