use super::*;
use crate::error::{FixtureError, Result};

impl TestModel {
    /// Checks the structural invariants of the main subgraph, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        self.main.validate()
    }
}

impl TestSubgraph {
    pub fn validate(&self) -> Result<()> {
        let num_operands = self.operands.len();

        for (idx, operand) in self.operands.iter().enumerate() {
            validate_operand(idx as u32, operand)?;
        }

        let mut consumers = vec![0u32; num_operands];
        for (op_idx, operation) in self.operations.iter().enumerate() {
            for &index in operation.inputs.iter().chain(operation.outputs.iter()) {
                if index as usize >= num_operands {
                    return Err(FixtureError::DanglingOperandIndex {
                        operation: op_idx,
                        index,
                        num_operands,
                    });
                }
            }
            for &index in &operation.inputs {
                consumers[index as usize] += 1;
            }
        }

        check_io_list(self, "input", &self.input_indexes, TestOperandLifetime::SubgraphInput)?;
        check_io_list(self, "output", &self.output_indexes, TestOperandLifetime::SubgraphOutput)?;

        for (idx, (operand, &actual)) in self.operands.iter().zip(consumers.iter()).enumerate() {
            if operand.number_of_consumers != actual {
                return Err(FixtureError::ConsumerCountMismatch {
                    index: idx as u32,
                    declared: operand.number_of_consumers,
                    actual,
                });
            }
        }
        Ok(())
    }
}

fn check_io_list(
    subgraph: &TestSubgraph,
    list: &'static str,
    indexes: &[u32],
    lifetime: TestOperandLifetime,
) -> Result<()> {
    for &index in indexes {
        let operand = subgraph
            .operand(index)
            .ok_or(FixtureError::DanglingIoIndex { list, index })?;
        if operand.lifetime != lifetime {
            return Err(FixtureError::WrongIoLifetime {
                list,
                index,
                lifetime: operand.lifetime,
            });
        }
    }
    // Every operand with an I/O lifetime must also be reachable through the list
    for (idx, operand) in subgraph.operands.iter().enumerate() {
        if operand.lifetime == lifetime && !indexes.contains(&(idx as u32)) {
            return Err(FixtureError::UnlistedIoOperand {
                list,
                index: idx as u32,
                lifetime,
            });
        }
    }
    Ok(())
}

fn validate_operand(index: u32, operand: &TestOperand) -> Result<()> {
    let op_type = operand.op_type;

    if op_type.is_scalar() && !operand.dimensions.is_empty() {
        return Err(FixtureError::ScalarWithDimensions {
            index,
            op_type,
            dimensions: operand.dimensions.clone(),
        });
    }

    let expected = if operand.lifetime.holds_data() {
        operand.byte_length()
    } else {
        0
    };
    if operand.data.len() != expected {
        return Err(FixtureError::BufferLengthMismatch {
            index,
            op_type,
            expected,
            actual: operand.data.len(),
        });
    }

    let params_valid = match op_type.quantized_range() {
        Some((min, max)) => {
            let zero_point_valid = if op_type.is_symmetric() {
                operand.zero_point == 0
            } else {
                operand.zero_point >= min && operand.zero_point <= max
            };
            operand.scale > 0f32 && operand.scale.is_finite() && zero_point_valid
        }
        None => operand.scale == 0f32 && operand.zero_point == 0,
    };
    if !params_valid {
        return Err(FixtureError::InvalidQuantization {
            index,
            scale: operand.scale,
            zero_point: operand.zero_point,
        });
    }
    Ok(())
}
