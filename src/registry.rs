use crate::error::{FixtureError, Result};
use crate::model::TestModel;
use std::collections::BTreeMap;

/// A name-keyed table of test models, owned by whoever assembles the test run.
#[derive(Debug, Default, Clone)]
pub struct TestModelManager {
    models: BTreeMap<String, TestModel>,
}

impl TestModelManager {
    pub fn new() -> TestModelManager {
        TestModelManager::default()
    }

    /// Registers `model` under `name`. Re-adding the same model under the same name has no
    /// effect, adding a different model under a taken name fails.
    pub fn add<S: Into<String>>(&mut self, name: S, model: TestModel) -> Result<()> {
        let name = name.into();
        if let Some(existing) = self.models.get(&name) {
            if *existing == model {
                trace!("Fixture \"{}\" was already registered.", name);
                return Ok(());
            }
            return Err(FixtureError::DuplicateFixture { name });
        }
        trace!(
            "Registering \"{}\" with {} operands and {} operations.",
            name,
            model.main.operands.len(),
            model.main.operations.len()
        );
        self.models.insert(name, model);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TestModel> {
        self.models.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&TestModel> {
        self.get(name).ok_or_else(|| FixtureError::UnknownFixture {
            name: name.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// All fixtures ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestModel)> {
        self.models.iter().map(|(name, model)| (name.as_str(), model))
    }

    /// The fixtures whose name contains `pattern`, ordered by name.
    pub fn filter<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = (&'a str, &'a TestModel)> {
        self.iter().filter(move |(name, _)| name.contains(pattern))
    }
}
