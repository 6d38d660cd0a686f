//! Shared core of the academic administration console.
//!
//! Everything here is platform-independent: resource schemas, draft
//! validation, payload building, the generic resource controller and the
//! notification center. The browser glue lives in the `frontend` crate.

pub mod api;
pub mod config;
pub mod controller;
pub mod model;
pub mod notification;
pub mod payload;
pub mod schema;
pub mod validation;
