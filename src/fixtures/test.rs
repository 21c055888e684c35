use super::sub_quant8_signed::*;
use super::*;
use crate::error::FixtureError;
use crate::math::QuantizationParams;
use crate::model::*;
use std::collections::HashSet;

#[test]
fn fixture_names() {
    assert_eq!(fixture_name(FAMILY, false, 1), "sub_quant8_signed");
    assert_eq!(
        fixture_name(FAMILY, true, 1),
        "sub_quant8_signed_all_inputs_as_internal"
    );
    assert_eq!(fixture_name(FAMILY, false, 2), "sub_quant8_signed_2");
    assert_eq!(
        fixture_name(FAMILY, true, 42),
        "sub_quant8_signed_all_inputs_as_internal_42"
    );
}

#[test]
fn family_enumerates_every_fixture_once() {
    let fixtures = all_fixtures().unwrap();
    // 64 grid points, the broadcast case and the zero-sized case, each with its variation
    assert_eq!(fixtures.len(), 2 * (64 + 2));

    let names = fixtures.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>();
    assert_eq!(names[0], "sub_quant8_signed");
    assert_eq!(names[1], "sub_quant8_signed_all_inputs_as_internal");
    assert_eq!(names[2], "sub_quant8_signed_2");
    assert_eq!(names[127], "sub_quant8_signed_all_inputs_as_internal_64");
    assert_eq!(names[128], "sub_quant8_signed_quant8");
    assert_eq!(names[129], "sub_quant8_signed_quant8_all_inputs_as_internal");
    assert_eq!(names[130], "sub_quant8_signed_zero_sized_quant8_signed");
    assert_eq!(
        names[131],
        "sub_quant8_signed_zero_sized_quant8_signed_all_inputs_as_internal"
    );

    let unique = names.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn every_fixture_is_structurally_valid() {
    for (name, model) in all_fixtures().unwrap() {
        if let Err(err) = model.validate() {
            panic!("{} is invalid: {}", name, err);
        }
        assert_eq!(model.min_supported_version, TestHalVersion::V1_3, "{}", name);
        assert!(!model.expect_failure, "{}", name);
        assert!(!model.is_relaxed, "{}", name);
    }
}

#[test]
fn grid_order_varies_the_output_fastest() {
    let cases = extremes_cases();
    assert_eq!(cases.len(), 64);
    assert_eq!(
        cases[0],
        ExtremesCase {
            input0: SCALES_AND_ZERO_POINTS[0],
            input1: SCALES_AND_ZERO_POINTS[0],
            output: SCALES_AND_ZERO_POINTS[0],
        }
    );
    assert_eq!(cases[1].output, SCALES_AND_ZERO_POINTS[1]);
    assert_eq!(cases[4].input1, SCALES_AND_ZERO_POINTS[1]);
    assert_eq!(
        cases[32],
        ExtremesCase {
            input0: QuantizationParams::new(0.01, -8),
            input1: QuantizationParams::new(1.0, -128),
            output: QuantizationParams::new(1.0, -128),
        }
    );
}

#[test]
fn grid_inputs_pair_every_extreme_value() {
    let (input0, input1) = extremes_inputs();
    assert_eq!(input0.len(), 144);
    assert_eq!(input1.len(), 144);
    assert_eq!(&input0[..12], &[-128i8; 12][..]);
    assert_eq!(input0[12], -127);
    assert_eq!(&input1[..12], &EXTREME_VALUES[..]);
    assert_eq!(input0[143], 127);
    assert_eq!(input1[143], 127);
}

#[test]
fn grid_model_layout() {
    let model = extremes_model(&extremes_cases()[0]);
    let main = &model.main;
    assert_eq!(main.operands.len(), 4);
    assert_eq!(main.input_indexes, vec![0, 1]);
    assert_eq!(main.output_indexes, vec![3]);
    assert_eq!(main.operations.len(), 1);
    assert_eq!(main.operations[0].op_type, TestOperationType::Sub);
    assert_eq!(main.operations[0].inputs, vec![0, 1, 2]);
    assert_eq!(main.operands[0].dimensions, vec![144]);
    assert_eq!(main.operands[2].data.to_i32(), vec![0]);

    // Identical parameters: a - b at zero point -128 is a - b - 128, saturated
    let expected = main.operands[3].data.to_i8();
    assert_eq!(expected[0], -128);
    assert_eq!(expected[12], -127);
    assert_eq!(expected[11], -128);
    assert_eq!(expected[143], -128);
}

#[test]
fn broadcast_fixture_values() {
    let model = broadcast_model();
    let main = &model.main;
    assert_eq!(main.operands[0].dimensions, vec![1, 2]);
    assert_eq!(main.operands[0].data.to_i8(), vec![-28, 72]);
    assert_eq!(main.operands[1].data.to_i8(), vec![-127, -126, -125, -124]);
    assert_eq!(main.operands[3].data.to_i8(), vec![-29, 70, -31, 68]);
}

#[test]
fn zero_sized_fixture_has_only_empty_outputs() {
    let model = zero_sized_model();
    let ops = model.operations().collect::<Vec<_>>();
    assert_eq!(
        ops,
        vec![
            TestOperationType::BoxWithNmsLimit,
            TestOperationType::RoiAlign,
            TestOperationType::Sub,
        ]
    );
    assert_eq!(model.main.input_indexes.len(), 1);
    assert_eq!(model.main.output_indexes.len(), 3);
    for buffer in model.main.expected_outputs() {
        assert!(buffer.is_empty());
    }
    let sub = &model.main.operations[2];
    let out = model.main.operand(sub.outputs[0]).unwrap();
    assert_eq!(out.dimensions, vec![0, 2, 2, 2]);
}

#[test]
fn internal_variation_feeds_inputs_through_additions() {
    let base = broadcast_model();
    let internal = all_inputs_as_internal(&base).unwrap();
    let main = &internal.main;

    assert_eq!(main.operations.len(), 3);
    assert_eq!(main.operations[0].op_type, TestOperationType::Add);
    assert_eq!(main.operations[1].op_type, TestOperationType::Add);
    assert_eq!(main.operations[2], base.main.operations[0]);

    // The original inputs are now produced by the additions
    for (add, &original) in main.operations.iter().zip(base.main.input_indexes.iter()) {
        assert_eq!(add.outputs, vec![original]);
        let operand = main.operand(original).unwrap();
        assert_eq!(operand.lifetime, TestOperandLifetime::TemporaryVariable);
        assert!(operand.data.is_empty());

        let new_input = main.operand(add.inputs[0]).unwrap();
        assert_eq!(new_input.lifetime, TestOperandLifetime::SubgraphInput);
        assert_eq!(new_input.data, base.main.operands[original as usize].data);

        let placeholder = main.operand(add.inputs[1]).unwrap();
        assert_eq!(placeholder.dimensions, vec![1]);
        assert_eq!(placeholder.data.to_i8(), vec![-128]);
        assert_eq!(main.operand(add.inputs[2]).unwrap().data.to_i32(), vec![0]);
    }
    assert_eq!(
        main.input_indexes,
        vec![main.operations[0].inputs[0], main.operations[1].inputs[0]]
    );

    // Outputs and metadata are untouched
    assert_eq!(main.output_indexes, base.main.output_indexes);
    assert_eq!(main.expected_outputs(), base.main.expected_outputs());
    assert_eq!(internal.min_supported_version, base.min_supported_version);
}

#[test]
fn internal_variation_rejects_a_dangling_input_index() {
    let mut model = broadcast_model();
    model.main.input_indexes.push(99);
    assert_eq!(
        all_inputs_as_internal(&model),
        Err(FixtureError::DanglingIoIndex {
            list: "input",
            index: 99,
        })
    );
}

#[test]
fn register_all_fills_the_registry() {
    let mut manager = TestModelManager::new();
    register_all(&mut manager).unwrap();
    assert_eq!(manager.len(), all_fixtures().unwrap().len());
    // Registering twice changes nothing
    register_all(&mut manager).unwrap();
    assert_eq!(manager.len(), 132);
    assert_eq!(manager.filter("zero_sized").count(), 2);
}
