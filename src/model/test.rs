use super::*;
use crate::error::FixtureError;

const Q8S: TestOperandType = TestOperandType::TensorQuant8AsymmSigned;

fn operand(lifetime: TestOperandLifetime, data: TestBuffer) -> TestOperand {
    TestOperand {
        op_type: Q8S,
        dimensions: vec![2],
        number_of_consumers: 0,
        scale: 1f32,
        zero_point: -128,
        lifetime,
        data,
    }
}

fn activation() -> TestOperand {
    TestOperand {
        op_type: TestOperandType::Int32,
        dimensions: vec![],
        number_of_consumers: 1,
        scale: 0f32,
        zero_point: 0,
        lifetime: TestOperandLifetime::ConstantCopy,
        data: TestBuffer::from_i32(&[0]),
    }
}

/// `out = in0 - in1`, written out by hand.
fn sub_subgraph() -> TestSubgraph {
    let input = TestOperand {
        number_of_consumers: 1,
        ..operand(
            TestOperandLifetime::SubgraphInput,
            TestBuffer::from_i8(&[1, 2]),
        )
    };
    TestSubgraph {
        operands: vec![
            input.clone(),
            input,
            activation(),
            operand(
                TestOperandLifetime::SubgraphOutput,
                TestBuffer::from_i8(&[-128, -128]),
            ),
        ],
        operations: vec![TestOperation {
            op_type: TestOperationType::Sub,
            inputs: vec![0, 1, 2],
            outputs: vec![3],
        }],
        input_indexes: vec![0, 1],
        output_indexes: vec![3],
    }
}

#[test]
fn element_sizes_follow_the_encoding() {
    assert_eq!(TestOperandType::TensorQuant8AsymmSigned.element_size(), 1);
    assert_eq!(TestOperandType::TensorBool8.element_size(), 1);
    assert_eq!(TestOperandType::TensorQuant16Asymm.element_size(), 2);
    assert_eq!(TestOperandType::TensorQuant16Symm.element_size(), 2);
    assert_eq!(TestOperandType::TensorFloat32.element_size(), 4);
    assert_eq!(TestOperandType::Int32.element_size(), 4);
}

#[test]
fn quantized_ranges() {
    assert_eq!(Q8S.quantized_range(), Some((-128, 127)));
    assert_eq!(
        TestOperandType::TensorQuant8Asymm.quantized_range(),
        Some((0, 255))
    );
    assert_eq!(TestOperandType::TensorFloat32.quantized_range(), None);
    assert!(!TestOperandType::Int32.is_quantized());
    assert!(TestOperandType::TensorQuant16Symm.is_symmetric());
    assert!(TestOperandType::Bool.is_scalar());
    assert!(!TestOperandType::TensorInt32.is_scalar());
}

#[test]
fn byte_length_of_zero_sized_and_scalar_operands() {
    let zero_sized = TestOperand {
        dimensions: vec![0, 2, 2, 2],
        ..operand(TestOperandLifetime::SubgraphOutput, TestBuffer::new())
    };
    assert_eq!(zero_sized.element_count(), 0);
    assert_eq!(zero_sized.byte_length(), 0);
    assert_eq!(activation().element_count(), 1);
    assert_eq!(activation().byte_length(), 4);
}

#[test]
fn buffers_decode_little_endian() {
    let buf = TestBuffer::from_bytes(vec![0x01, 0x00, 0xff, 0xff]);
    assert_eq!(buf.to_u16(), vec![1, 0xffff]);
    assert_eq!(buf.to_i16(), vec![1, -1]);
    assert_eq!(buf.to_i8(), vec![1, 0, -1, -1]);
    assert_eq!(TestBuffer::from_i32(&[-2]).as_bytes(), &[0xfe, 0xff, 0xff, 0xff]);
    assert_eq!(TestBuffer::from_f32(&[1.0]).as_bytes(), &[0x00, 0x00, 0x80, 0x3f]);
    assert_eq!(
        TestBuffer::from_bool8(&[true, false]).to_bool8(),
        vec![true, false]
    );
    assert!(TestBuffer::new().is_empty());
}

#[test]
fn handwritten_subgraph_is_valid() {
    let subgraph = sub_subgraph();
    assert_eq!(subgraph.validate(), Ok(()));
    assert_eq!(
        subgraph.expected_outputs(),
        vec![&TestBuffer::from_i8(&[-128, -128])]
    );
    let model = TestModel::new(subgraph).with_min_supported_version(TestHalVersion::V1_3);
    assert_eq!(model.validate(), Ok(()));
    assert_eq!(
        model.operations().collect::<Vec<_>>(),
        vec![TestOperationType::Sub]
    );
    assert!(TestHalVersion::V1_3 > TestHalVersion::V1_2);
}

#[test]
fn dangling_operation_index_is_rejected() {
    let mut subgraph = sub_subgraph();
    subgraph.operations[0].inputs[1] = 9;
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::DanglingOperandIndex {
            operation: 0,
            index: 9,
            num_operands: 4,
        })
    );
}

#[test]
fn input_list_must_reference_inputs() {
    let mut subgraph = sub_subgraph();
    subgraph.input_indexes = vec![0, 2];
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::WrongIoLifetime {
            list: "input",
            index: 2,
            lifetime: TestOperandLifetime::ConstantCopy,
        })
    );

    let mut subgraph = sub_subgraph();
    subgraph.output_indexes.clear();
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::UnlistedIoOperand {
            list: "output",
            index: 3,
            lifetime: TestOperandLifetime::SubgraphOutput,
        })
    );

    let mut subgraph = sub_subgraph();
    subgraph.output_indexes.push(7);
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::DanglingIoIndex {
            list: "output",
            index: 7,
        })
    );
}

#[test]
fn buffer_length_must_match_the_dimensions() {
    let mut subgraph = sub_subgraph();
    subgraph.operands[1].data = TestBuffer::from_i8(&[1, 2, 3]);
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::BufferLengthMismatch {
            index: 1,
            op_type: Q8S,
            expected: 2,
            actual: 3,
        })
    );
}

#[test]
fn temporaries_hold_no_data() {
    let mut subgraph = sub_subgraph();
    subgraph.operands[3].lifetime = TestOperandLifetime::TemporaryVariable;
    subgraph.output_indexes.clear();
    match subgraph.validate() {
        Err(FixtureError::BufferLengthMismatch {
            index, expected, ..
        }) => {
            assert_eq!(index, 3);
            assert_eq!(expected, 0);
        }
        result => panic!("expected a buffer length error, got {:?}", result),
    }
}

#[test]
fn scalars_have_no_dimensions() {
    let mut subgraph = sub_subgraph();
    subgraph.operands[2].dimensions = vec![1];
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::ScalarWithDimensions {
            index: 2,
            op_type: TestOperandType::Int32,
            dimensions: vec![1],
        })
    );
}

#[test]
fn consumer_counts_are_checked() {
    let mut subgraph = sub_subgraph();
    subgraph.operands[0].number_of_consumers = 2;
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::ConsumerCountMismatch {
            index: 0,
            declared: 2,
            actual: 1,
        })
    );
}

#[test]
fn quantization_parameters_are_checked() {
    let mut subgraph = sub_subgraph();
    subgraph.operands[0].zero_point = 128;
    assert_eq!(
        subgraph.validate(),
        Err(FixtureError::InvalidQuantization {
            index: 0,
            scale: 1f32,
            zero_point: 128,
        })
    );

    let mut subgraph = sub_subgraph();
    subgraph.operands[1].scale = 0f32;
    assert!(subgraph.validate().is_err());

    let mut subgraph = sub_subgraph();
    subgraph.operands[2].scale = 0.5f32;
    assert!(subgraph.validate().is_err());
}
