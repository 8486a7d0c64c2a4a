//! Paged query and CRUD building blocks for REST APIs with Axum and
//! Sea-ORM.
//!
//! The core is a paged read pipeline (validate, filter, count, sort with
//! a stable identifier tiebreak, window, project) plus generic CRUD
//! handlers with per-mutation transactions and a soft-delete visibility
//! model. Resources implement [`CrudResource`] to plug in.

pub mod cancel;
pub mod errors;
pub mod fields;
pub mod filter;
pub mod models;
pub mod query;
pub mod routes;
pub mod sort;
pub mod traits;
pub mod validation;

pub use errors::ApiError;
pub use models::{ListParams, Page};
pub use traits::CrudResource;
