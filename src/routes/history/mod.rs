pub mod delete;
pub mod list;
