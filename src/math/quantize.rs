// Quantization based on https://github.com/google/gemmlowp
// Original work licensed with Apache License 2.0

use num_traits::bounds::Bounded;
use num_traits::{NumCast, PrimInt, ToPrimitive};
use std::fmt::Debug;

// A structure to hold quantization parameters 'scale' and 'zero_point'.
// The meaning of these values is as the constants in the quantization equation
//
//   real_value = scale * (quantized_value - zero_point)
//
// In other words, 'zero_point' is the quantized value that corresponds
// to the real value 0, and 'scale' is the difference of real values
// corresponding to consecutive quantized values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuantizationParams<T>
where
    T: Quantized,
{
    pub scale: f64,
    pub zero_point: T,
}

/// An integer type that stores quantized values.
pub trait Quantized: PrimInt + Bounded + NumCast + ToPrimitive + Debug {}

impl Quantized for i8 {}
impl Quantized for u8 {}
impl Quantized for i16 {}
impl Quantized for u16 {}

pub trait QuantizeInto<T>
where
    T: Quantized,
{
    fn quantize(self, params: &QuantizationParams<T>) -> T;
}

impl<T> QuantizationParams<T>
where
    T: Quantized,
{
    pub fn new(scale: f64, zero_point: T) -> QuantizationParams<T> {
        QuantizationParams { scale, zero_point }
    }

    /// Builds the parameters from the raw `(scale, zero_point)` pair stored on an operand,
    /// returning `None` if the zero point is not representable in `T` or the scale is not a
    /// positive finite number.
    pub fn from_operand(scale: f32, zero_point: i32) -> Option<QuantizationParams<T>> {
        if !(scale > 0f32 && scale.is_finite()) {
            return None;
        }
        let zero_point = <T as NumCast>::from(zero_point)?;
        Some(QuantizationParams {
            scale: widen_scale(scale),
            zero_point,
        })
    }

    pub fn zero_point_f64(&self) -> f64 {
        to_f64(self.zero_point)
    }

    /// Returns the real value represented by `q`.
    pub fn dequantize(&self, q: T) -> f64 {
        self.scale * (to_f64(q) - self.zero_point_f64())
    }
}

/// Widens an `f32` scale to the `f64` of the shortest decimal that round-trips through it, e.g.
/// `0.01f32` becomes `0.01f64` rather than `0.009999999776482582f64`.
pub fn widen_scale(scale: f32) -> f64 {
    scale
        .to_string()
        .parse::<f64>()
        .unwrap_or_else(|_| <f64 as From<f32>>::from(scale))
}

fn to_f64<T: Quantized>(q: T) -> f64 {
    // Every primitive integer of at most 32 bits has an exact f64 representation
    q.to_f64().unwrap_or(0f64)
}

/// Rounds to the nearest integer, resolving ties towards the even neighbour.
pub fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5f64 {
        2f64 * (x / 2f64).round()
    } else {
        rounded
    }
}

/// Clamps `val` into the representable range of `T` and converts. `val` must be integral.
pub fn saturate<T: Quantized>(val: f64) -> T {
    let min = to_f64(T::min_value());
    let max = to_f64(T::max_value());
    if val <= min {
        T::min_value()
    } else if val >= max {
        T::max_value()
    } else {
        <T as NumCast>::from(val).unwrap_or_else(T::zero)
    }
}

impl<T> QuantizeInto<T> for f64
where
    T: Quantized,
{
    fn quantize(self, params: &QuantizationParams<T>) -> T {
        let transformed_val = round_half_even(self / params.scale) + params.zero_point_f64();
        saturate(transformed_val)
    }
}

pub fn quantize_vec<T: Quantized>(params: &QuantizationParams<T>, src: &[f64]) -> Vec<T> {
    src.iter()
        .map(|&val| val.quantize(params))
        .collect::<Vec<T>>()
}

pub fn dequantize_vec<T: Quantized>(params: &QuantizationParams<T>, src: &[T]) -> Vec<f64> {
    src.iter()
        .map(|&q| params.dequantize(q))
        .collect::<Vec<f64>>()
}

/// `a - b` evaluated in the real domain and requantized into the output parameters.
pub fn sub_quantized<T: Quantized>(
    a: T,
    a_params: &QuantizationParams<T>,
    b: T,
    b_params: &QuantizationParams<T>,
    out_params: &QuantizationParams<T>,
) -> T {
    (a_params.dequantize(a) - b_params.dequantize(b)).quantize(out_params)
}

/// `a + b` evaluated in the real domain and requantized into the output parameters.
pub fn add_quantized<T: Quantized>(
    a: T,
    a_params: &QuantizationParams<T>,
    b: T,
    b_params: &QuantizationParams<T>,
    out_params: &QuantizationParams<T>,
) -> T {
    (a_params.dequantize(a) + b_params.dequantize(b)).quantize(out_params)
}
