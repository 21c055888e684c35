use crate::math::{QuantizationParams, Quantized};
use crate::model::*;

/// The type, shape and quantization of an operand, without its lifetime or data.
#[derive(Clone, Debug, PartialEq)]
pub struct OperandSpec {
    pub op_type: TestOperandType,
    pub dimensions: Vec<u32>,
    pub scale: f32,
    pub zero_point: i32,
}

impl OperandSpec {
    pub fn tensor(op_type: TestOperandType, dimensions: &[u32]) -> OperandSpec {
        OperandSpec {
            op_type,
            dimensions: dimensions.to_vec(),
            scale: 0f32,
            zero_point: 0,
        }
    }

    pub fn scalar(op_type: TestOperandType) -> OperandSpec {
        OperandSpec::tensor(op_type, &[])
    }

    pub fn quantized<T: Quantized>(
        op_type: TestOperandType,
        dimensions: &[u32],
        params: &QuantizationParams<T>,
    ) -> OperandSpec {
        OperandSpec {
            op_type,
            dimensions: dimensions.to_vec(),
            scale: params.scale as f32,
            zero_point: params.zero_point.to_i32().unwrap_or(0),
        }
    }

    fn into_operand(self, lifetime: TestOperandLifetime, data: TestBuffer) -> TestOperand {
        TestOperand {
            op_type: self.op_type,
            dimensions: self.dimensions,
            number_of_consumers: 0,
            scale: self.scale,
            zero_point: self.zero_point,
            lifetime,
            data,
        }
    }
}

impl<'a> From<&'a TestOperand> for OperandSpec {
    fn from(operand: &'a TestOperand) -> OperandSpec {
        OperandSpec {
            op_type: operand.op_type,
            dimensions: operand.dimensions.clone(),
            scale: operand.scale,
            zero_point: operand.zero_point,
        }
    }
}

/// Incrementally assembles a subgraph. Operand indices are handed out in creation order and the
/// consumer counts are derived from the operations when the subgraph is built.
#[derive(Debug, Default)]
pub struct SubgraphBuilder {
    subgraph: TestSubgraph,
}

impl SubgraphBuilder {
    pub fn new() -> SubgraphBuilder {
        SubgraphBuilder::default()
    }

    /// Starts from an existing subgraph, e.g. to derive a variation from it.
    pub fn from_subgraph(subgraph: TestSubgraph) -> SubgraphBuilder {
        SubgraphBuilder { subgraph }
    }

    fn push(&mut self, operand: TestOperand) -> u32 {
        self.subgraph.operands.push(operand);
        (self.subgraph.operands.len() - 1) as u32
    }

    pub fn input(&mut self, spec: OperandSpec, data: TestBuffer) -> u32 {
        let index = self.push(spec.into_operand(TestOperandLifetime::SubgraphInput, data));
        self.subgraph.input_indexes.push(index);
        index
    }

    pub fn output(&mut self, spec: OperandSpec, expected: TestBuffer) -> u32 {
        let index = self.push(spec.into_operand(TestOperandLifetime::SubgraphOutput, expected));
        self.subgraph.output_indexes.push(index);
        index
    }

    pub fn constant(&mut self, spec: OperandSpec, data: TestBuffer) -> u32 {
        self.push(spec.into_operand(TestOperandLifetime::ConstantCopy, data))
    }

    pub fn temporary(&mut self, spec: OperandSpec) -> u32 {
        self.push(spec.into_operand(TestOperandLifetime::TemporaryVariable, TestBuffer::new()))
    }

    pub fn int32_scalar(&mut self, value: i32) -> u32 {
        self.constant(
            OperandSpec::scalar(TestOperandType::Int32),
            TestBuffer::from_i32(&[value]),
        )
    }

    pub fn float32_scalar(&mut self, value: f32) -> u32 {
        self.constant(
            OperandSpec::scalar(TestOperandType::Float32),
            TestBuffer::from_f32(&[value]),
        )
    }

    pub fn bool_scalar(&mut self, value: bool) -> u32 {
        self.constant(
            OperandSpec::scalar(TestOperandType::Bool),
            TestBuffer::from_bool8(&[value]),
        )
    }

    pub fn operation(&mut self, op_type: TestOperationType, inputs: &[u32], outputs: &[u32]) {
        self.subgraph.operations.push(TestOperation {
            op_type,
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
        });
    }

    /// Direct access for transformations that rewire existing operands.
    pub fn subgraph_mut(&mut self) -> &mut TestSubgraph {
        &mut self.subgraph
    }

    pub fn build(mut self) -> TestSubgraph {
        for operand in self.subgraph.operands.iter_mut() {
            operand.number_of_consumers = 0;
        }
        for operation in &self.subgraph.operations {
            for &index in &operation.inputs {
                if let Some(operand) = self.subgraph.operands.get_mut(index as usize) {
                    operand.number_of_consumers += 1;
                }
            }
        }
        self.subgraph
    }
}
