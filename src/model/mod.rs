//! The in-memory representation of a conformance test model: an operand table, the operations
//! that connect the operands and the metadata that tells a harness how to run the model.
mod buffer;
#[cfg(test)]
mod test;
mod validate;

pub use self::buffer::*;

/// The element kind of an operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestOperandType {
    Float32,
    Int32,
    Uint32,
    Bool,
    TensorFloat32,
    TensorInt32,
    TensorBool8,
    TensorQuant8Asymm,
    TensorQuant8AsymmSigned,
    TensorQuant16Asymm,
    TensorQuant16Symm,
}

impl TestOperandType {
    /// The size of a single element in the operand buffer, in bytes.
    pub fn element_size(self) -> usize {
        use self::TestOperandType::*;
        match self {
            Bool | TensorBool8 | TensorQuant8Asymm | TensorQuant8AsymmSigned => 1,
            TensorQuant16Asymm | TensorQuant16Symm => 2,
            Float32 | Int32 | Uint32 | TensorFloat32 | TensorInt32 => 4,
        }
    }

    pub fn is_scalar(self) -> bool {
        use self::TestOperandType::*;
        match self {
            Float32 | Int32 | Uint32 | Bool => true,
            _ => false,
        }
    }

    pub fn is_quantized(self) -> bool {
        self.quantized_range().is_some()
    }

    /// The inclusive range of integer codes of a quantized type, `None` for other types.
    pub fn quantized_range(self) -> Option<(i32, i32)> {
        use self::TestOperandType::*;
        match self {
            TensorQuant8Asymm => Some((0, 255)),
            TensorQuant8AsymmSigned => Some((-128, 127)),
            TensorQuant16Asymm => Some((0, 65535)),
            TensorQuant16Symm => Some((-32768, 32767)),
            _ => None,
        }
    }

    /// Symmetric types have no zero point.
    pub fn is_symmetric(self) -> bool {
        self == TestOperandType::TensorQuant16Symm
    }
}

/// Where the bytes of an operand come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestOperandLifetime {
    /// Computed by an operation and consumed by another one within the same subgraph.
    TemporaryVariable,
    SubgraphInput,
    SubgraphOutput,
    /// A constant whose bytes are embedded in the model.
    ConstantCopy,
    /// An omitted optional operand.
    NoValue,
}

impl TestOperandLifetime {
    /// Whether a valid operand of this lifetime carries bytes in its buffer.
    pub fn holds_data(self) -> bool {
        match self {
            TestOperandLifetime::TemporaryVariable | TestOperandLifetime::NoValue => false,
            _ => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestOperand {
    pub op_type: TestOperandType,
    pub dimensions: Vec<u32>,
    pub number_of_consumers: u32,
    pub scale: f32,
    pub zero_point: i32,
    pub lifetime: TestOperandLifetime,
    /// Values for inputs and constants, expected values for outputs, empty for temporaries.
    pub data: TestBuffer,
}

impl TestOperand {
    /// The number of elements described by the dimensions. A scalar has one element.
    pub fn element_count(&self) -> usize {
        self.dimensions.iter().map(|&d| d as usize).product()
    }

    /// The number of bytes a buffer holding the full operand must have.
    pub fn byte_length(&self) -> usize {
        self.element_count() * self.op_type.element_size()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|&d| d as usize).collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestOperationType {
    Add,
    Sub,
    BoxWithNmsLimit,
    RoiAlign,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestOperation {
    pub op_type: TestOperationType,
    pub inputs: Vec<u32>,
    pub outputs: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestSubgraph {
    pub operands: Vec<TestOperand>,
    pub operations: Vec<TestOperation>,
    pub input_indexes: Vec<u32>,
    pub output_indexes: Vec<u32>,
}

impl TestSubgraph {
    pub fn operand(&self, index: u32) -> Option<&TestOperand> {
        self.operands.get(index as usize)
    }

    /// The expected output buffers, in `output_indexes` order.
    pub fn expected_outputs(&self) -> Vec<&TestBuffer> {
        self.output_indexes
            .iter()
            .filter_map(|&i| self.operand(i))
            .map(|operand| &operand.data)
            .collect()
    }
}

/// The earliest interface version a model may be run against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestHalVersion {
    Unknown,
    V1_0,
    V1_1,
    V1_2,
    V1_3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestModel {
    pub main: TestSubgraph,
    pub is_relaxed: bool,
    pub expected_multinomial_distribution_tolerance: f32,
    pub expect_failure: bool,
    pub min_supported_version: TestHalVersion,
}

impl TestModel {
    pub fn new(main: TestSubgraph) -> TestModel {
        TestModel {
            main,
            is_relaxed: false,
            expected_multinomial_distribution_tolerance: 0f32,
            expect_failure: false,
            min_supported_version: TestHalVersion::Unknown,
        }
    }

    pub fn with_min_supported_version(mut self, version: TestHalVersion) -> TestModel {
        self.min_supported_version = version;
        self
    }

    pub fn operations(&self) -> impl Iterator<Item = TestOperationType> + '_ {
        self.main.operations.iter().map(|op| op.op_type)
    }
}
