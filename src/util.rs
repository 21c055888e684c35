/*
 * Small helpers for reporting on fixtures that need not clutter the other modules.
 */
use crate::model::*;
use std::fmt::Write;
use std::time::Instant;

/// Returns the time elapsed between two instants in milliseconds.
pub fn duration_between(start: Instant, end: Instant) -> f64 {
    let duration = end.duration_since(start);
    duration.as_secs() as f64 * 1000f64 + f64::from(duration.subsec_nanos()) / 1_000_000f64
}

/// Decodes a buffer into printable values according to the element type of its operand.
pub fn format_values(op_type: TestOperandType, data: &TestBuffer) -> String {
    use crate::model::TestOperandType::*;
    match op_type {
        Float32 | TensorFloat32 => format!("{:?}", data.to_f32()),
        Int32 | Uint32 | TensorInt32 => format!("{:?}", data.to_i32()),
        Bool | TensorBool8 => format!("{:?}", data.to_bool8()),
        TensorQuant8Asymm => format!("{:?}", data.to_u8()),
        TensorQuant8AsymmSigned => format!("{:?}", data.to_i8()),
        TensorQuant16Asymm => format!("{:?}", data.to_u16()),
        TensorQuant16Symm => format!("{:?}", data.to_i16()),
    }
}

/// A human-readable listing of a model: one line per operand and per operation.
pub fn describe_model(name: &str, model: &TestModel) -> String {
    let main = &model.main;
    let mut out = String::new();
    // Writing into a String does not fail
    let _ = writeln!(
        out,
        "{} (min version {:?}, relaxed: {}, expect failure: {})",
        name, model.min_supported_version, model.is_relaxed, model.expect_failure
    );
    let _ = writeln!(
        out,
        "  inputs {:?}, outputs {:?}",
        main.input_indexes, main.output_indexes
    );
    for (idx, operand) in main.operands.iter().enumerate() {
        let _ = write!(
            out,
            "  operand {}: {:?} {:?} {:?}",
            idx, operand.lifetime, operand.op_type, operand.dimensions
        );
        if operand.op_type.is_quantized() {
            let _ = write!(out, " scale {} zero point {}", operand.scale, operand.zero_point);
        }
        let _ = write!(out, " consumers {}", operand.number_of_consumers);
        if !operand.data.is_empty() {
            let _ = write!(out, " = {}", format_values(operand.op_type, &operand.data));
        }
        out.push('\n');
    }
    for (idx, operation) in main.operations.iter().enumerate() {
        let _ = writeln!(
            out,
            "  operation {}: {:?} {:?} -> {:?}",
            idx, operation.op_type, operation.inputs, operation.outputs
        );
    }
    out
}
