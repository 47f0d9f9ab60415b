//! Entity structs for all Disco domain objects.
//!
//! Each entity maps to a table in the libSQL database (`problems`, `research`,
//! `experiments`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema`, and serialize with camelCase keys.

mod experiment;
mod problem;
mod research;

pub use experiment::Experiment;
pub use problem::Problem;
pub use research::Research;
