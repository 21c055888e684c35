#[cfg(test)]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod error;
pub mod fixtures;
pub mod math;
pub mod model;
pub mod reference;
mod registry;
mod util;
#[cfg(test)]
mod tests;

pub use crate::error::{FixtureError, Result};
pub use crate::model::*;
pub use crate::reference::{check_model, evaluate, Verdict};
pub use crate::registry::TestModelManager;
pub use crate::util::*;

/// Builds a registry holding every fixture of the corpus.
pub fn create_registry() -> Result<TestModelManager> {
    let mut manager = TestModelManager::new();
    fixtures::register_all(&mut manager)?;
    info!("Registered {} fixtures.", manager.len());
    Ok(manager)
}
