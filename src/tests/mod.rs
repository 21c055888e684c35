
use super::*;
use crate::fixtures::*;

lazy_static! {
    static ref REGISTRY: TestModelManager = {
        let _ = env_logger::try_init();
        create_registry().unwrap()
    };
    /// Fixtures in generation order, where each base fixture is directly followed by its
    /// `all_inputs_as_internal` variation.
    static ref GENERATED: Vec<(String, TestModel)> = all_fixtures().unwrap();
}

fn base_and_internal_pairs() -> Vec<(&'static (String, TestModel), &'static (String, TestModel))> {
    GENERATED
        .chunks(2)
        .map(|pair| (&pair[0], &pair[1]))
        .collect()
}

#[test]
fn every_base_fixture_is_followed_by_its_internal_variation() {
    let pairs = base_and_internal_pairs();
    assert_eq!(pairs.len() * 2, REGISTRY.len());
    for ((base_name, base), (internal_name, internal)) in pairs {
        assert!(!base_name.contains(ALL_INPUTS_AS_INTERNAL));
        assert!(internal_name.contains(ALL_INPUTS_AS_INTERNAL));
        assert_eq!(REGISTRY.get(base_name), Some(base));
        assert_eq!(REGISTRY.get(internal_name), Some(internal));
    }
}

#[test]
fn supported_fixtures_pass_the_reference_check() {
    let mut passed = 0;
    let mut skipped = 0;
    for (name, model) in REGISTRY.iter() {
        match check_model(model) {
            Ok(Verdict::Passed) => passed += 1,
            Ok(Verdict::Skipped(reason)) => {
                debug!("{} skipped: {}", name, reason);
                assert!(name.contains("zero_sized"), "{} was skipped", name);
                skipped += 1;
            }
            Err(err) => panic!("{} failed: {}", name, err),
        }
    }
    assert_eq!(passed, 130);
    assert_eq!(skipped, 2);
}
