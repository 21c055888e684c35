use crate::error::{FixtureError, Result};
use ndarray::{ArrayD, ArrayViewD, IxDyn};

/// Computes the NumPy-style broadcast of two shapes. Dimensions are aligned from the right and a
/// dimension of size 1 stretches to match the other side, including a zero-sized dimension.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let rank = lhs.len().max(rhs.len());
    let mut shape = vec![0; rank];
    for i in 0..rank {
        // Missing leading dimensions behave as 1
        let l = if i < rank - lhs.len() { 1 } else { lhs[i - (rank - lhs.len())] };
        let r = if i < rank - rhs.len() { 1 } else { rhs[i - (rank - rhs.len())] };
        shape[i] = match (l, r) {
            (l, r) if l == r => l,
            (1, r) => r,
            (l, 1) => l,
            _ => {
                return Err(FixtureError::IncompatibleBroadcast {
                    lhs: lhs.to_vec(),
                    rhs: rhs.to_vec(),
                })
            }
        };
    }
    Ok(shape)
}

/// Broadcasts both tensors into their common shape and returns views over them.
pub fn broadcast_pair<'a, 'b, A, B>(
    lhs: &'a ArrayD<A>,
    rhs: &'b ArrayD<B>,
) -> Result<(Vec<usize>, ArrayViewD<'a, A>, ArrayViewD<'b, B>)> {
    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    let incompatible = || FixtureError::IncompatibleBroadcast {
        lhs: lhs.shape().to_vec(),
        rhs: rhs.shape().to_vec(),
    };
    let lhs_view = lhs.broadcast(IxDyn(&shape)).ok_or_else(incompatible)?;
    let rhs_view = rhs.broadcast(IxDyn(&shape)).ok_or_else(incompatible)?;
    Ok((shape, lhs_view, rhs_view))
}
