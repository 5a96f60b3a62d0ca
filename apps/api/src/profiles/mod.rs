// User profile records: create-if-absent, fetch, partial update, delete.

pub mod handlers;
pub mod service;
