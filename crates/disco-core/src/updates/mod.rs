//! Update builder types for entity mutations.
//!
//! Each update struct has `Option` fields. Only `Some` fields are applied; the
//! store generates one SET clause per present field. The same structs are the
//! JSON bodies of the `PATCH` (and `PUT`) endpoints, so a key that is absent
//! from the request never overwrites stored data.

pub mod experiment;
pub mod problem;
pub mod research;

pub use experiment::{ExperimentUpdate, ExperimentUpdateBuilder};
pub use problem::{ProblemUpdate, ProblemUpdateBuilder};
pub use research::{ResearchUpdate, ResearchUpdateBuilder};

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field so that an absent key stays `None` while an
/// explicit `null` becomes `Some(None)`. Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
