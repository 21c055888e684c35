use super::broadcast::broadcast_pair;
use super::quantize::*;
use crate::error::{FixtureError, Result};
use ndarray::{ArrayD, IxDyn};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
}

impl BinaryOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
        }
    }

    pub fn apply_f32(self, a: f32, b: f32) -> f32 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
        }
    }
}

/// The activation fused into the output of an element-wise operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FusedActivation {
    None,
    Relu,
    Relu1,
    Relu6,
}

impl FusedActivation {
    pub fn from_code(code: i32) -> Result<FusedActivation> {
        match code {
            0 => Ok(FusedActivation::None),
            1 => Ok(FusedActivation::Relu),
            2 => Ok(FusedActivation::Relu1),
            3 => Ok(FusedActivation::Relu6),
            code => Err(FixtureError::InvalidActivation { code }),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            FusedActivation::None => 0,
            FusedActivation::Relu => 1,
            FusedActivation::Relu1 => 2,
            FusedActivation::Relu6 => 3,
        }
    }

    /// The clamp bounds in the real domain.
    pub fn real_bounds(self) -> (f64, f64) {
        match self {
            FusedActivation::None => (f64::NEG_INFINITY, f64::INFINITY),
            FusedActivation::Relu => (0f64, f64::INFINITY),
            FusedActivation::Relu1 => (-1f64, 1f64),
            FusedActivation::Relu6 => (0f64, 6f64),
        }
    }

    /// The clamp bounds in the quantized domain of `params`.
    pub fn quantized_bounds<T: Quantized>(self, params: &QuantizationParams<T>) -> (T, T) {
        let (lo, hi) = self.real_bounds();
        let q_lo = if lo.is_finite() {
            lo.quantize(params)
        } else {
            T::min_value()
        };
        let q_hi = if hi.is_finite() {
            hi.quantize(params)
        } else {
            T::max_value()
        };
        (q_lo, q_hi)
    }

    pub fn clamp_f32(self, val: f32) -> f32 {
        let (lo, hi) = self.real_bounds();
        val.max(lo as f32).min(hi as f32)
    }
}

/// Evaluates `op` element-wise over two broadcast-compatible quantized tensors. Each element is
/// dequantized with its own parameters, combined in the real domain, requantized with saturation
/// into `out_params` and clamped by the fused activation.
pub fn quantized_binary<T: Quantized>(
    op: BinaryOp,
    a: &ArrayD<T>,
    a_params: &QuantizationParams<T>,
    b: &ArrayD<T>,
    b_params: &QuantizationParams<T>,
    out_params: &QuantizationParams<T>,
    activation: FusedActivation,
) -> Result<ArrayD<T>> {
    let (shape, a_view, b_view) = broadcast_pair(a, b)?;
    let (act_min, act_max) = activation.quantized_bounds(out_params);
    let values = a_view
        .iter()
        .zip(b_view.iter())
        .map(|(&x, &y)| {
            let q: T = op
                .apply(a_params.dequantize(x), b_params.dequantize(y))
                .quantize(out_params);
            q.max(act_min).min(act_max)
        })
        .collect::<Vec<T>>();
    into_array(shape, values, a, b)
}

/// Evaluates `op` element-wise over two broadcast-compatible float tensors.
pub fn float_binary(
    op: BinaryOp,
    a: &ArrayD<f32>,
    b: &ArrayD<f32>,
    activation: FusedActivation,
) -> Result<ArrayD<f32>> {
    let (shape, a_view, b_view) = broadcast_pair(a, b)?;
    let values = a_view
        .iter()
        .zip(b_view.iter())
        .map(|(&x, &y)| activation.clamp_f32(op.apply_f32(x, y)))
        .collect::<Vec<f32>>();
    into_array(shape, values, a, b)
}

fn into_array<A, B, C>(
    shape: Vec<usize>,
    values: Vec<A>,
    a: &ArrayD<B>,
    b: &ArrayD<C>,
) -> Result<ArrayD<A>> {
    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| {
        FixtureError::IncompatibleBroadcast {
            lhs: a.shape().to_vec(),
            rhs: b.shape().to_vec(),
        }
    })
}
