/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

//! Supported distances

use std::convert::TryFrom;
use std::fmt::Debug;
use wide::f32x8;

/// The trait that enables a metric
pub trait Metric: 'static + Send + Sync + Debug + Clone {
    /// Dense calculation
    fn dist(x: &[f32], y: &[f32]) -> f32;
    /// The norm, dist(x,0)
    fn norm(x: &[f32]) -> f32;
}

/// L2 norm, the square root of the sum of squares
#[derive(Debug, Clone)]
pub struct L2 {}

impl Metric for L2 {
    #[inline]
    fn dist(x: &[f32], y: &[f32]) -> f32 {
        sq_l2_dense_f32(x, y).sqrt()
    }

    #[inline]
    fn norm(x: &[f32]) -> f32 {
        sq_l2_norm_f32(x).sqrt()
    }
}

/// Not a norm! Still, helpful for document clouds and the like.
/// Exposed as a distance, `1 - cos(x,y)`, so that smaller always means closer.
#[derive(Debug, Clone)]
pub struct Cosine {}

impl Metric for Cosine {
    #[inline]
    fn dist(x: &[f32], y: &[f32]) -> f32 {
        let acc = dot_dense_f32(x, y);
        let xnm = sq_l2_norm_f32(x).sqrt();
        let ynm = sq_l2_norm_f32(y).sqrt();
        if xnm == 0.0 || ynm == 0.0 {
            // A zero vector points nowhere, its similarity to anything is 0
            return 1.0;
        }
        1.0 - acc / (xnm * ynm)
    }

    fn norm(_x: &[f32]) -> f32 {
        0.0
    }
}

/// 8 lanes, the AVX2 width for f32. The tails are handled in scalar code.
#[inline]
fn simd_8(chunk: &[f32]) -> f32x8 {
    f32x8::from(<[f32; 8]>::try_from(chunk).unwrap())
}

///
#[inline]
pub fn sq_l2_dense_f32(x: &[f32], y: &[f32]) -> f32 {
    let x_chunks = x.chunks_exact(8);
    let y_chunks = y.chunks_exact(8);
    let x_rem = x_chunks.remainder();
    let y_rem = y_chunks.remainder();
    let mut d_acc_8 = f32x8::ZERO;
    for (xc, yc) in x_chunks.zip(y_chunks) {
        let diff = simd_8(xc) - simd_8(yc);
        d_acc_8 += diff * diff;
    }
    let leftover = y_rem
        .iter()
        .zip(x_rem)
        .map(|(xi, yi)| (xi - yi) * (xi - yi))
        .fold(0.0, |acc, y| acc + y);
    leftover + d_acc_8.reduce_add()
}

///
#[inline]
pub fn sq_l2_norm_f32(x: &[f32]) -> f32 {
    let chunks = x.chunks_exact(8);
    let rem = chunks.remainder();
    let mut d_acc_8 = f32x8::ZERO;
    for xc in chunks {
        let x_simd = simd_8(xc);
        d_acc_8 += x_simd * x_simd;
    }
    let leftover = rem.iter().map(|xi| xi * xi).fold(0.0, |acc, xi| acc + xi);
    leftover + d_acc_8.reduce_add()
}

///
#[inline]
pub fn dot_dense_f32(x: &[f32], y: &[f32]) -> f32 {
    let x_chunks = x.chunks_exact(8);
    let y_chunks = y.chunks_exact(8);
    let x_rem = x_chunks.remainder();
    let y_rem = y_chunks.remainder();
    let mut d_acc_8 = f32x8::ZERO;
    for (xc, yc) in x_chunks.zip(y_chunks) {
        d_acc_8 += simd_8(xc) * simd_8(yc);
    }
    let leftover = y_rem
        .iter()
        .zip(x_rem)
        .map(|(xi, yi)| xi * yi)
        .fold(0.0, |acc, y| acc + y);
    leftover + d_acc_8.reduce_add()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_l2(x: &[f32], y: &[f32]) -> f32 {
        x.iter()
            .zip(y)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }

    // Lengths that exercise the empty, tail only, exact lane, and mixed paths
    const LENS: [usize; 6] = [0, 1, 7, 8, 9, 23];

    fn ramp(len: usize, scale: f32) -> Vec<f32> {
        (0..len).map(|i| (i as f32) * scale - 2.0).collect()
    }

    #[test]
    fn l2_matches_scalar_reference() {
        for &len in &LENS {
            let x = ramp(len, 0.25);
            let y = ramp(len, -0.5);
            assert_approx_eq!(L2::dist(&x, &y), scalar_l2(&x, &y), 1e-4);
        }
    }

    #[test]
    fn l2_norm_matches_scalar_reference() {
        for &len in &LENS {
            let x = ramp(len, 0.75);
            let expected = x.iter().map(|a| a * a).sum::<f32>().sqrt();
            assert_approx_eq!(L2::norm(&x), expected, 1e-4);
        }
    }

    #[test]
    fn cosine_of_identical_vectors_is_zero() {
        let x = ramp(23, 0.3);
        assert_approx_eq!(Cosine::dist(&x, &x), 0.0, 1e-5);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_one() {
        let x = vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let y = vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_approx_eq!(Cosine::dist(&x, &y), 1.0, 1e-5);
    }

    #[test]
    fn cosine_guards_the_zero_vector() {
        let x = vec![0.0; 9];
        let y = ramp(9, 1.0);
        assert_approx_eq!(Cosine::dist(&x, &y), 1.0, 1e-5);
    }

    #[test]
    fn dot_matches_scalar_reference() {
        for &len in &LENS {
            let x = ramp(len, 0.25);
            let y = ramp(len, -0.5);
            let expected = x.iter().zip(&y).map(|(a, b)| a * b).sum::<f32>();
            assert_approx_eq!(dot_dense_f32(&x, &y), expected, 1e-3);
        }
    }
}
