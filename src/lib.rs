//! Core library exports for the product catalog service.
//!
//! The `data` feature exposes the domain, models, schema and repositories;
//! the `server` feature adds the forms, services, image store and HTTP
//! routes used by the admin API.

pub mod db;
pub mod domain;
mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod image_store;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
