//! # front-page
//!
//! Client-side plumbing for the storefront single-page app: the route table
//! that maps URL paths to views, and the shared token store holding the
//! signed-in principal's credentials.
//!
//! Both are reached through [`context::AppContext`], which is built once at
//! startup and handed to whatever needs it. There are no module-level
//! singletons.

pub mod config;
pub mod context;
pub mod router;
pub mod routes;
pub mod store;
