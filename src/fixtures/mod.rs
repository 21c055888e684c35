//! Conformance fixtures. Each family module exposes a pure `fixtures()` enumeration and
//! [`register_all`] collects every family into a caller-owned registry.
mod builder;
pub mod sub_quant8_signed;
#[cfg(test)]
mod test;
mod variation;

pub use self::builder::*;
pub use self::variation::*;
use crate::error::Result;
use crate::model::TestModel;
use crate::registry::TestModelManager;

/// Names the `ordinal`-th fixture of a family. The first fixture carries the bare family name,
/// later ones are suffixed with their 1-based ordinal; the internal-inputs marker precedes the
/// ordinal, e.g. `sub_quant8_signed_all_inputs_as_internal_42`.
pub fn fixture_name(family: &str, internal: bool, ordinal: usize) -> String {
    let mut name = family.to_owned();
    if internal {
        name.push('_');
        name.push_str(ALL_INPUTS_AS_INTERNAL);
    }
    if ordinal > 1 {
        name.push_str(&format!("_{}", ordinal));
    }
    name
}

/// Pairs a fixture with its `all_inputs_as_internal` variation, in that order.
pub fn with_internal_variant(
    family: &str,
    ordinal: usize,
    model: TestModel,
) -> Result<Vec<(String, TestModel)>> {
    let internal = all_inputs_as_internal(&model)?;
    Ok(vec![
        (fixture_name(family, false, ordinal), model),
        (fixture_name(family, true, ordinal), internal),
    ])
}

/// Every fixture of every family, in generation order.
pub fn all_fixtures() -> Result<Vec<(String, TestModel)>> {
    sub_quant8_signed::fixtures()
}

/// Adds every fixture to `manager`.
pub fn register_all(manager: &mut TestModelManager) -> Result<()> {
    let fixtures = all_fixtures()?;
    debug!("Registering {} fixtures.", fixtures.len());
    for (name, model) in fixtures {
        manager.add(name, model)?;
    }
    Ok(())
}
