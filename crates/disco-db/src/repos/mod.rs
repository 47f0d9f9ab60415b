//! Repository modules implementing CRUD operations for all Disco entities.
//!
//! Each module adds methods to `DiscoService` via `impl DiscoService` blocks.
//! Child lookups are always scoped by `(problem_id, id)`: a child that exists
//! under a different problem is reported as not found.

pub mod experiment;
pub mod problem;
pub mod research;
