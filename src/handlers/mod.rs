//! HTTP handlers for account CRUD.

pub mod account;
