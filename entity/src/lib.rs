pub mod user;
pub mod history;

/*
 A user registers once and never changes here. Every OCR scan the user runs
 leaves one history row owned by them; only the owner can list or delete it.
 Deleting a user drops their history with them (FK cascade).
 */
