//! # Pokédex Database Crate
//!
//! This crate is the write side of the loader: everything that knows about SQL
//! and PostgreSQL lives here.
//!
//! ## Architectural Principles
//!
//! - **Values Are Never Interpolated:** Statements are synthesized with `$n`
//!   placeholders and every value travels as a bound parameter. Only table and
//!   column identifiers, which come from the static load plan, are written into
//!   the SQL text.
//! - **Idempotent Writes:** `upsert::synthesize` produces
//!   `INSERT ... ON CONFLICT` statements so a load can be repeated safely.
//! - **One Seam For Execution:** Callers depend on the `StatementExecutor`
//!   trait, so the loader can run against PostgreSQL or an in-memory fake.
//!
//! ## Public API
//!
//! - `connect`: Establishes the connection pool.
//! - `pending_migrations`: Counts migrations in a directory that the database has not applied.
//! - `synthesize`: Builds a `Statement` from a table, a `Record` and a primary key.
//! - `StatementExecutor`: The trait the loader executes statements through.
//! - `DbRepository`: The PostgreSQL implementation of `StatementExecutor`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod executor;
pub mod repository;
pub mod upsert;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, pending_migrations};
pub use error::DbError;
pub use executor::StatementExecutor;
pub use repository::DbRepository;
pub use upsert::{Statement, synthesize};
