use crate::model::{TestOperandLifetime, TestOperandType, TestOperationType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixtureError {
    #[error("operation {operation} references undeclared operand {index} ({num_operands} declared)")]
    DanglingOperandIndex {
        operation: usize,
        index: u32,
        num_operands: usize,
    },
    #[error("subgraph {list} list references undeclared operand {index}")]
    DanglingIoIndex { list: &'static str, index: u32 },
    #[error("operand {index} is listed as a subgraph {list} but its lifetime is {lifetime:?}")]
    WrongIoLifetime {
        list: &'static str,
        index: u32,
        lifetime: TestOperandLifetime,
    },
    #[error("operand {index} has lifetime {lifetime:?} but is missing from the subgraph {list} list")]
    UnlistedIoOperand {
        list: &'static str,
        index: u32,
        lifetime: TestOperandLifetime,
    },
    #[error("operand {index} ({op_type:?}) holds {actual} bytes, expected {expected}")]
    BufferLengthMismatch {
        index: u32,
        op_type: TestOperandType,
        expected: usize,
        actual: usize,
    },
    #[error("scalar operand {index} ({op_type:?}) has dimensions {dimensions:?}")]
    ScalarWithDimensions {
        index: u32,
        op_type: TestOperandType,
        dimensions: Vec<u32>,
    },
    #[error("operand {index} has invalid quantization parameters: scale {scale}, zero point {zero_point}")]
    InvalidQuantization {
        index: u32,
        scale: f32,
        zero_point: i32,
    },
    #[error("operand {index} declares {declared} consumers but {actual} operation inputs reference it")]
    ConsumerCountMismatch {
        index: u32,
        declared: u32,
        actual: u32,
    },
    #[error("operation {op_type:?} is not supported by the reference evaluator")]
    UnsupportedOperation { op_type: TestOperationType },
    #[error("operation {op_type:?} does not support operand type {operand_type:?}")]
    UnsupportedOperandType {
        op_type: TestOperationType,
        operand_type: TestOperandType,
    },
    #[error("operation {op_type:?} expects {expected} inputs and {expected_outputs} outputs, got {inputs} and {outputs}")]
    WrongArity {
        op_type: TestOperationType,
        expected: usize,
        expected_outputs: usize,
        inputs: usize,
        outputs: usize,
    },
    #[error("shapes {lhs:?} and {rhs:?} cannot be broadcast together")]
    IncompatibleBroadcast { lhs: Vec<usize>, rhs: Vec<usize> },
    #[error("computed shape {computed:?} does not match the declared dimensions {declared:?} of operand {index}")]
    ShapeMismatch {
        index: u32,
        declared: Vec<u32>,
        computed: Vec<usize>,
    },
    #[error("operand {index} is read before any operation produced it")]
    OperandNotReady { index: u32 },
    #[error("unknown fused activation code {code}")]
    InvalidActivation { code: i32 },
    #[error("output {output} differs at byte {byte}: expected {expected:#04x}, got {actual:#04x}")]
    OutputMismatch {
        output: usize,
        byte: usize,
        expected: u8,
        actual: u8,
    },
    #[error("expected {expected} outputs, got {actual}")]
    OutputCountMismatch { expected: usize, actual: usize },
    #[error("output {output} holds {actual} bytes, expected {expected}")]
    OutputLengthMismatch {
        output: usize,
        expected: usize,
        actual: usize,
    },
    #[error("a different fixture is already registered as \"{name}\"")]
    DuplicateFixture { name: String },
    #[error("no fixture is registered as \"{name}\"")]
    UnknownFixture { name: String },
}

pub type Result<T> = std::result::Result<T, FixtureError>;
