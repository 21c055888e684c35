//! A reference evaluator for element-wise graphs. It computes what a conforming driver has to
//! produce for `ADD` and `SUB`, so the expected outputs of a fixture can be re-derived and
//! compared byte for byte.

use crate::error::{FixtureError, Result};
use crate::math::*;
use crate::model::*;
use ndarray::{ArrayD, IxDyn};

/// A tensor value held by the evaluator, typed by the element kind of its operand.
#[derive(Clone, Debug, PartialEq)]
pub enum TensorValue {
    Float32(ArrayD<f32>),
    Int32(ArrayD<i32>),
    Quant8(ArrayD<u8>),
    Quant8Signed(ArrayD<i8>),
    Quant16(ArrayD<u16>),
    Quant16Symm(ArrayD<i16>),
    Bool8(ArrayD<bool>),
}

impl TensorValue {
    /// Decodes the buffer of `operand` into a tensor of its declared shape.
    pub fn from_operand(index: u32, operand: &TestOperand) -> Result<TensorValue> {
        use crate::model::TestOperandType::*;
        let mismatch = || FixtureError::BufferLengthMismatch {
            index,
            op_type: operand.op_type,
            expected: operand.byte_length(),
            actual: operand.data.len(),
        };
        // The wide decoders drop stray trailing bytes, so check the byte count up front
        if operand.data.len() != operand.byte_length() {
            return Err(mismatch());
        }
        let shape = IxDyn(&operand.shape());
        let data = &operand.data;
        let value = match operand.op_type {
            Float32 | TensorFloat32 => {
                TensorValue::Float32(shaped(shape, data.to_f32()).ok_or_else(mismatch)?)
            }
            Int32 | Uint32 | TensorInt32 => {
                TensorValue::Int32(shaped(shape, data.to_i32()).ok_or_else(mismatch)?)
            }
            TensorQuant8Asymm => {
                TensorValue::Quant8(shaped(shape, data.to_u8()).ok_or_else(mismatch)?)
            }
            TensorQuant8AsymmSigned => {
                TensorValue::Quant8Signed(shaped(shape, data.to_i8()).ok_or_else(mismatch)?)
            }
            TensorQuant16Asymm => {
                TensorValue::Quant16(shaped(shape, data.to_u16()).ok_or_else(mismatch)?)
            }
            TensorQuant16Symm => {
                TensorValue::Quant16Symm(shaped(shape, data.to_i16()).ok_or_else(mismatch)?)
            }
            Bool | TensorBool8 => {
                TensorValue::Bool8(shaped(shape, data.to_bool8()).ok_or_else(mismatch)?)
            }
        };
        Ok(value)
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            TensorValue::Float32(a) => a.shape(),
            TensorValue::Int32(a) => a.shape(),
            TensorValue::Quant8(a) => a.shape(),
            TensorValue::Quant8Signed(a) => a.shape(),
            TensorValue::Quant16(a) => a.shape(),
            TensorValue::Quant16Symm(a) => a.shape(),
            TensorValue::Bool8(a) => a.shape(),
        }
    }

    /// Encodes the tensor in row-major order.
    pub fn to_buffer(&self) -> TestBuffer {
        match self {
            TensorValue::Float32(a) => TestBuffer::from_f32(&a.iter().cloned().collect::<Vec<_>>()),
            TensorValue::Int32(a) => TestBuffer::from_i32(&a.iter().cloned().collect::<Vec<_>>()),
            TensorValue::Quant8(a) => TestBuffer::from_u8(&a.iter().cloned().collect::<Vec<_>>()),
            TensorValue::Quant8Signed(a) => {
                TestBuffer::from_i8(&a.iter().cloned().collect::<Vec<_>>())
            }
            TensorValue::Quant16(a) => TestBuffer::from_u16(&a.iter().cloned().collect::<Vec<_>>()),
            TensorValue::Quant16Symm(a) => {
                TestBuffer::from_i16(&a.iter().cloned().collect::<Vec<_>>())
            }
            TensorValue::Bool8(a) => TestBuffer::from_bool8(&a.iter().cloned().collect::<Vec<_>>()),
        }
    }
}

fn shaped<A>(shape: IxDyn, values: Vec<A>) -> Option<ArrayD<A>> {
    ArrayD::from_shape_vec(shape, values).ok()
}

/// Whether every operation of `subgraph` can be evaluated.
pub fn is_supported(subgraph: &TestSubgraph) -> bool {
    subgraph.operations.iter().all(|op| match op.op_type {
        TestOperationType::Add | TestOperationType::Sub => true,
        _ => false,
    })
}

/// Runs the operations of `subgraph` in the order they are listed and returns the computed
/// outputs, encoded like the expected output buffers and in `output_indexes` order.
pub fn evaluate(subgraph: &TestSubgraph) -> Result<Vec<TestBuffer>> {
    let mut values: Vec<Option<TensorValue>> = Vec::with_capacity(subgraph.operands.len());
    for (idx, operand) in subgraph.operands.iter().enumerate() {
        let seeded = match operand.lifetime {
            TestOperandLifetime::SubgraphInput | TestOperandLifetime::ConstantCopy => {
                Some(TensorValue::from_operand(idx as u32, operand)?)
            }
            _ => None,
        };
        values.push(seeded);
    }

    for operation in &subgraph.operations {
        trace!(
            "Evaluating {:?} {:?} -> {:?}.",
            operation.op_type,
            operation.inputs,
            operation.outputs
        );
        let result = match operation.op_type {
            TestOperationType::Add => eval_elementwise(BinaryOp::Add, operation, subgraph, &values)?,
            TestOperationType::Sub => eval_elementwise(BinaryOp::Sub, operation, subgraph, &values)?,
            op_type => return Err(FixtureError::UnsupportedOperation { op_type }),
        };
        let out_index = operation.outputs[0];
        check_shape(out_index, &subgraph.operands[out_index as usize], result.shape())?;
        values[out_index as usize] = Some(result);
    }

    subgraph
        .output_indexes
        .iter()
        .map(|&index| {
            values
                .get(index as usize)
                .and_then(Option::as_ref)
                .map(TensorValue::to_buffer)
                .ok_or(FixtureError::OperandNotReady { index })
        })
        .collect()
}

fn check_shape(index: u32, operand: &TestOperand, computed: &[usize]) -> Result<()> {
    if operand.shape().as_slice() != computed {
        return Err(FixtureError::ShapeMismatch {
            index,
            declared: operand.dimensions.clone(),
            computed: computed.to_vec(),
        });
    }
    Ok(())
}

fn eval_elementwise(
    op: BinaryOp,
    operation: &TestOperation,
    subgraph: &TestSubgraph,
    values: &[Option<TensorValue>],
) -> Result<TensorValue> {
    let op_type = operation.op_type;
    if operation.inputs.len() != 3 || operation.outputs.len() != 1 {
        return Err(FixtureError::WrongArity {
            op_type,
            expected: 3,
            expected_outputs: 1,
            inputs: operation.inputs.len(),
            outputs: operation.outputs.len(),
        });
    }
    let (lhs_operand, lhs) = read(subgraph, values, operation.inputs[0])?;
    let (rhs_operand, rhs) = read(subgraph, values, operation.inputs[1])?;
    let activation = match read(subgraph, values, operation.inputs[2])? {
        (_, TensorValue::Int32(code)) if code.len() == 1 => {
            FusedActivation::from_code(code.iter().cloned().next().unwrap_or(0))?
        }
        (operand, _) => {
            return Err(FixtureError::UnsupportedOperandType {
                op_type,
                operand_type: operand.op_type,
            })
        }
    };
    let out_index = operation.outputs[0];
    let out_operand = subgraph
        .operand(out_index)
        .ok_or(FixtureError::OperandNotReady { index: out_index })?;

    let unsupported = |operand: &TestOperand| FixtureError::UnsupportedOperandType {
        op_type,
        operand_type: operand.op_type,
    };
    if lhs_operand.op_type != out_operand.op_type {
        return Err(unsupported(lhs_operand));
    }
    if rhs_operand.op_type != out_operand.op_type {
        return Err(unsupported(rhs_operand));
    }

    match (lhs, rhs) {
        (TensorValue::Float32(a), TensorValue::Float32(b)) => {
            Ok(TensorValue::Float32(float_binary(op, a, b, activation)?))
        }
        (TensorValue::Quant8(a), TensorValue::Quant8(b)) => {
            let (pa, pb, po) = params_of::<u8>(
                (operation.inputs[0], lhs_operand),
                (operation.inputs[1], rhs_operand),
                (out_index, out_operand),
            )?;
            Ok(TensorValue::Quant8(quantized_binary(
                op, a, &pa, b, &pb, &po, activation,
            )?))
        }
        (TensorValue::Quant8Signed(a), TensorValue::Quant8Signed(b)) => {
            let (pa, pb, po) = params_of::<i8>(
                (operation.inputs[0], lhs_operand),
                (operation.inputs[1], rhs_operand),
                (out_index, out_operand),
            )?;
            Ok(TensorValue::Quant8Signed(quantized_binary(
                op, a, &pa, b, &pb, &po, activation,
            )?))
        }
        _ => Err(unsupported(out_operand)),
    }
}

fn read<'a>(
    subgraph: &'a TestSubgraph,
    values: &'a [Option<TensorValue>],
    index: u32,
) -> Result<(&'a TestOperand, &'a TensorValue)> {
    let operand = subgraph
        .operand(index)
        .ok_or(FixtureError::OperandNotReady { index })?;
    let value = values
        .get(index as usize)
        .and_then(Option::as_ref)
        .ok_or(FixtureError::OperandNotReady { index })?;
    Ok((operand, value))
}

fn params_of<T: Quantized>(
    lhs: (u32, &TestOperand),
    rhs: (u32, &TestOperand),
    out: (u32, &TestOperand),
) -> Result<(
    QuantizationParams<T>,
    QuantizationParams<T>,
    QuantizationParams<T>,
)> {
    let convert = |(index, operand): (u32, &TestOperand)| {
        QuantizationParams::<T>::from_operand(operand.scale, operand.zero_point).ok_or(
            FixtureError::InvalidQuantization {
                index,
                scale: operand.scale,
                zero_point: operand.zero_point,
            },
        )
    };
    Ok((convert(lhs)?, convert(rhs)?, convert(out)?))
}

/// The outcome of checking one fixture.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    /// The reference evaluator reproduced every expected output byte.
    Passed,
    /// The model is valid but holds operations the evaluator does not implement.
    Skipped(String),
}

/// Compares computed output buffers against the expected ones, reporting the first difference.
pub fn compare_outputs(expected: &[&TestBuffer], actual: &[TestBuffer]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(FixtureError::OutputCountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    for (output, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        if e.len() != a.len() {
            return Err(FixtureError::OutputLengthMismatch {
                output,
                expected: e.len(),
                actual: a.len(),
            });
        }
        if let Some((byte, (&eb, &ab))) = e
            .as_bytes()
            .iter()
            .zip(a.as_bytes().iter())
            .enumerate()
            .find(|(_, (eb, ab))| eb != ab)
        {
            return Err(FixtureError::OutputMismatch {
                output,
                byte,
                expected: eb,
                actual: ab,
            });
        }
    }
    Ok(())
}

/// Validates `model` and, when every operation is supported, re-derives its outputs and compares
/// them with the expected buffers.
pub fn check_model(model: &TestModel) -> Result<Verdict> {
    model.validate()?;
    if !is_supported(&model.main) {
        let unsupported = model
            .operations()
            .filter(|op| *op != TestOperationType::Add && *op != TestOperationType::Sub)
            .map(|op| format!("{:?}", op))
            .collect::<Vec<String>>();
        return Ok(Verdict::Skipped(format!(
            "unsupported operations: {}",
            unsupported.join(", ")
        )));
    }
    let actual = evaluate(&model.main)?;
    compare_outputs(&model.main.expected_outputs(), &actual)?;
    Ok(Verdict::Passed)
}
