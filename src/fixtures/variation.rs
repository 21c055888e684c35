use super::builder::{OperandSpec, SubgraphBuilder};
use crate::error::{FixtureError, Result};
use crate::model::*;

/// The suffix appended to the name of a fixture whose inputs were made internal.
pub const ALL_INPUTS_AS_INTERNAL: &str = "all_inputs_as_internal";

/// Derives the variation of `model` in which each graph input is computed by the model itself:
/// the original input becomes a temporary produced by `ADD(new_input, zero_point_placeholder,
/// NONE)`, and `new_input` takes over the input data. The placeholder is a `{1}` constant holding
/// the zero point, so the addition is an identity and the expected outputs stay untouched.
///
/// Inputs whose type has no `ADD` stay as they are. An input index without an operand is an
/// error.
pub fn all_inputs_as_internal(model: &TestModel) -> Result<TestModel> {
    let mut builder = SubgraphBuilder::from_subgraph(model.main.clone());
    let original_inputs = model.main.input_indexes.clone();
    let mut new_inputs = Vec::with_capacity(original_inputs.len());
    let mut feeding_adds = Vec::new();

    for &index in &original_inputs {
        let original = model
            .main
            .operand(index)
            .ok_or(FixtureError::DanglingIoIndex { list: "input", index })?;
        let placeholder = match zero_point_placeholder(original) {
            Some(placeholder) => placeholder,
            None => {
                new_inputs.push(index);
                continue;
            }
        };
        let spec = OperandSpec::from(original);

        // The appended operands do not go through `input` so the input list can be rebuilt in order
        let new_input = {
            let subgraph = builder.subgraph_mut();
            subgraph.operands.push(TestOperand {
                lifetime: TestOperandLifetime::SubgraphInput,
                ..original.clone()
            });
            (subgraph.operands.len() - 1) as u32
        };
        let zero = builder.constant(OperandSpec { dimensions: vec![1], ..spec }, placeholder);
        let activation = builder.int32_scalar(0);

        {
            let internal = &mut builder.subgraph_mut().operands[index as usize];
            internal.lifetime = TestOperandLifetime::TemporaryVariable;
            internal.data = TestBuffer::new();
        }
        new_inputs.push(new_input);
        feeding_adds.push(TestOperation {
            op_type: TestOperationType::Add,
            inputs: vec![new_input, zero, activation],
            outputs: vec![index],
        });
    }

    {
        let subgraph = builder.subgraph_mut();
        subgraph.input_indexes = new_inputs;
        // The feeding additions run before every operation of the original graph
        let original_ops = std::mem::replace(&mut subgraph.operations, feeding_adds);
        subgraph.operations.extend(original_ops);
    }

    Ok(TestModel {
        main: builder.build(),
        ..model.clone()
    })
}

/// A one-element buffer holding the zero point of `operand`, in its own encoding.
fn zero_point_placeholder(operand: &TestOperand) -> Option<TestBuffer> {
    match operand.op_type {
        TestOperandType::TensorQuant8AsymmSigned => {
            Some(TestBuffer::from_i8(&[operand.zero_point as i8]))
        }
        TestOperandType::TensorQuant8Asymm => Some(TestBuffer::from_u8(&[operand.zero_point as u8])),
        TestOperandType::TensorFloat32 => Some(TestBuffer::from_f32(&[0f32])),
        _ => None,
    }
}
