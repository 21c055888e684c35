//! Fixtures for `SUB` over `TENSOR_QUANT8_ASYMM_SIGNED`: a grid over extreme input values and
//! quantization parameters, a broadcast case and a zero-sized case.
use super::builder::{OperandSpec, SubgraphBuilder};
use super::with_internal_variant;
use crate::error::Result;
use crate::math::*;
use crate::model::*;
use itertools::iproduct;

pub const FAMILY: &str = "sub_quant8_signed";

/// The values both inputs of the grid are drawn from: the low and high ends of the i8 range.
pub const EXTREME_VALUES: [i8; 12] = [
    -128, -127, -126, -125, -124, -123, 122, 123, 124, 125, 126, 127,
];

/// The parameters each operand of the grid takes in turn.
pub const SCALES_AND_ZERO_POINTS: [QuantizationParams<i8>; 4] = [
    QuantizationParams {
        scale: 1f64,
        zero_point: -128,
    },
    QuantizationParams {
        scale: 1f64,
        zero_point: -127,
    },
    QuantizationParams {
        scale: 0.01f64,
        zero_point: -8,
    },
    QuantizationParams {
        scale: 10f64,
        zero_point: -8,
    },
];

/// The parameters shared by all operands of the broadcast case.
pub const BROADCAST_PARAMS: QuantizationParams<i8> = QuantizationParams {
    scale: 1f64,
    zero_point: -128,
};

const Q8S: TestOperandType = TestOperandType::TensorQuant8AsymmSigned;
const ACTIVATION_NONE: i32 = 0;

/// One point of the parameter grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExtremesCase {
    pub input0: QuantizationParams<i8>,
    pub input1: QuantizationParams<i8>,
    pub output: QuantizationParams<i8>,
}

/// The parameter grid in generation order: input0 varies slowest, the output fastest.
pub fn extremes_cases() -> Vec<ExtremesCase> {
    iproduct!(
        SCALES_AND_ZERO_POINTS.iter(),
        SCALES_AND_ZERO_POINTS.iter(),
        SCALES_AND_ZERO_POINTS.iter()
    )
    .map(|(&input0, &input1, &output)| ExtremesCase {
        input0,
        input1,
        output,
    })
    .collect()
}

/// The inputs of the grid: every pair of extreme values, with input0 varying slowest.
pub fn extremes_inputs() -> (Vec<i8>, Vec<i8>) {
    iproduct!(EXTREME_VALUES.iter(), EXTREME_VALUES.iter())
        .map(|(&a, &b)| (a, b))
        .unzip()
}

pub fn extremes_model(case: &ExtremesCase) -> TestModel {
    let (input0_values, input1_values) = extremes_inputs();
    let expected = input0_values
        .iter()
        .zip(input1_values.iter())
        .map(|(&a, &b)| sub_quantized(a, &case.input0, b, &case.input1, &case.output))
        .collect::<Vec<i8>>();
    let size = [expected.len() as u32];

    let mut b = SubgraphBuilder::new();
    let input0 = b.input(
        OperandSpec::quantized(Q8S, &size, &case.input0),
        TestBuffer::from_i8(&input0_values),
    );
    let input1 = b.input(
        OperandSpec::quantized(Q8S, &size, &case.input1),
        TestBuffer::from_i8(&input1_values),
    );
    let activation = b.int32_scalar(ACTIVATION_NONE);
    let output0 = b.output(
        OperandSpec::quantized(Q8S, &size, &case.output),
        TestBuffer::from_i8(&expected),
    );
    b.operation(
        TestOperationType::Sub,
        &[input0, input1, activation],
        &[output0],
    );
    TestModel::new(b.build()).with_min_supported_version(TestHalVersion::V1_3)
}

/// `{1, 2} - {2, 2}`, written in the real domain and quantized with [`BROADCAST_PARAMS`].
pub fn broadcast_model() -> TestModel {
    let p = &BROADCAST_PARAMS;
    let mut b = SubgraphBuilder::new();
    let input0 = b.input(
        OperandSpec::quantized(Q8S, &[1, 2], p),
        TestBuffer::from_i8(&quantize_vec(p, &[100f64, 200f64])),
    );
    let input1 = b.input(
        OperandSpec::quantized(Q8S, &[2, 2], p),
        TestBuffer::from_i8(&quantize_vec(p, &[1f64, 2f64, 3f64, 4f64])),
    );
    let activation = b.int32_scalar(ACTIVATION_NONE);
    let output0 = b.output(
        OperandSpec::quantized(Q8S, &[2, 2], p),
        TestBuffer::from_i8(&quantize_vec(p, &[99f64, 198f64, 97f64, 196f64])),
    );
    b.operation(
        TestOperationType::Sub,
        &[input0, input1, activation],
        &[output0],
    );
    TestModel::new(b.build()).with_min_supported_version(TestHalVersion::V1_3)
}

/// `SUB` fed by a zero-batch feature map: `BOX_WITH_NMS_LIMIT` filters out every box, so
/// `ROI_ALIGN` produces a `{0, 2, 2, 2}` tensor and every graph output is empty.
pub fn zero_sized_model() -> TestModel {
    let q8s = QuantizationParams::<i8>::new(0.1, 0);
    let q16 = QuantizationParams::<u16>::new(0.125, 0);
    let q16_type = TestOperandType::TensorQuant16Asymm;
    let int32_tensor = TestOperandType::TensorInt32;

    let mut b = SubgraphBuilder::new();

    // BOX_WITH_NMS_LIMIT, with a score threshold that rejects every box
    let scores = b.constant(
        OperandSpec::quantized(Q8S, &[1, 2], &q8s),
        TestBuffer::from_i8(&quantize_vec(&q8s, &[0.9f64, 0.1f64])),
    );
    let roi = b.constant(
        OperandSpec::quantized(q16_type, &[1, 8], &q16),
        TestBuffer::from_u16(&quantize_vec(
            &q16,
            &[1f64, 1f64, 10f64, 10f64, 0f64, 0f64, 10f64, 10f64],
        )),
    );
    let batch_split = b.constant(
        OperandSpec::tensor(int32_tensor, &[1]),
        TestBuffer::from_i32(&[0]),
    );
    let score_threshold = b.float32_scalar(0.3);
    let max_num_detections = b.int32_scalar(-1);
    let nms_kernel = b.int32_scalar(0);
    let iou_threshold = b.float32_scalar(0.4);
    let sigma = b.float32_scalar(1.0);
    let nms_score_threshold = b.float32_scalar(0.3);
    let scores_out = b.output(OperandSpec::quantized(Q8S, &[0], &q8s), TestBuffer::new());
    let roi_out = b.temporary(OperandSpec::quantized(q16_type, &[0, 4], &q16));
    let classes_out = b.output(OperandSpec::tensor(int32_tensor, &[0]), TestBuffer::new());
    let batch_split_out = b.temporary(OperandSpec::tensor(int32_tensor, &[0]));
    b.operation(
        TestOperationType::BoxWithNmsLimit,
        &[
            scores,
            roi,
            batch_split,
            score_threshold,
            max_num_detections,
            nms_kernel,
            iou_threshold,
            sigma,
            nms_score_threshold,
        ],
        &[scores_out, roi_out, classes_out, batch_split_out],
    );

    // ROI_ALIGN turns the empty box list into a zero-sized feature map
    let feature_input = b.input(
        OperandSpec::quantized(Q8S, &[1, 1, 1, 2], &q8s),
        TestBuffer::from_i8(&quantize_vec(&q8s, &[1f64, 2f64])),
    );
    let output_height = b.int32_scalar(2);
    let output_width = b.int32_scalar(2);
    let height_ratio = b.float32_scalar(2.0);
    let width_ratio = b.float32_scalar(2.0);
    let height_samples = b.int32_scalar(4);
    let width_samples = b.int32_scalar(4);
    let layout_nchw = b.bool_scalar(false);
    let feature_map = b.temporary(OperandSpec::quantized(Q8S, &[0, 2, 2, 2], &q8s));
    b.operation(
        TestOperationType::RoiAlign,
        &[
            feature_input,
            roi_out,
            batch_split_out,
            output_height,
            output_width,
            height_ratio,
            width_ratio,
            height_samples,
            width_samples,
            layout_nchw,
        ],
        &[feature_map],
    );

    // SUB with numBatches = 0
    let subtrahend = b.constant(
        OperandSpec::quantized(Q8S, &[1, 2, 2, 1], &q8s),
        TestBuffer::from_i8(&quantize_vec(&q8s, &[1f64, 2f64, 3f64, 4f64])),
    );
    let activation = b.int32_scalar(ACTIVATION_NONE);
    let out = b.output(
        OperandSpec::quantized(Q8S, &[0, 2, 2, 2], &q8s),
        TestBuffer::new(),
    );
    b.operation(
        TestOperationType::Sub,
        &[feature_map, subtrahend, activation],
        &[out],
    );

    TestModel::new(b.build()).with_min_supported_version(TestHalVersion::V1_3)
}

/// Every fixture of the family, each followed by its `all_inputs_as_internal` variation.
pub fn fixtures() -> Result<Vec<(String, TestModel)>> {
    let mut fixtures = Vec::new();
    for (idx, case) in extremes_cases().iter().enumerate() {
        fixtures.extend(with_internal_variant(FAMILY, idx + 1, extremes_model(case))?);
    }
    fixtures.extend(with_internal_variant(
        &format!("{}_quant8", FAMILY),
        1,
        broadcast_model(),
    )?);
    fixtures.extend(with_internal_variant(
        &format!("{}_zero_sized_quant8_signed", FAMILY),
        1,
        zero_sized_model(),
    )?);
    Ok(fixtures)
}
