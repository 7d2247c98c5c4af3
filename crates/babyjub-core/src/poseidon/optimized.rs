//! Sparse form of the Poseidon partial rounds
//!
//! The dense round `x ← M·S(x + c_r)` is rewritten so that round constants are
//! added after the S-box (`d_r = M⁻¹·c_{r+1}`). During partial rounds only
//! element 0 goes through the S-box, so the constants on the other elements
//! are pushed back through the previous mix until each partial round carries
//! a single scalar constant. The dense MDS matrix of every partial round is
//! then factored into one dense matrix applied before the partial rounds and
//! one sparse matrix per partial round:
//!
//! ```text
//! | a00  v̂ᵀ |
//! | w    I  |
//! ```
//!
//! which costs `2(t-1) + 1` multiplications instead of `t²`.

use crate::field::Fr;

pub(crate) type Matrix = Vec<Vec<Fr>>;

pub(crate) fn mat_vec(m: &Matrix, v: &[Fr]) -> Vec<Fr> {
    m.iter()
        .map(|row| {
            row.iter()
                .zip(v.iter())
                .fold(Fr::ZERO, |acc, (a, b)| acc + *a * *b)
        })
        .collect()
}

fn mat_mul(a: &Matrix, b: &Matrix) -> Matrix {
    let cols = b.first().map_or(0, |row| row.len());
    a.iter()
        .map(|row| {
            (0..cols)
                .map(|j| {
                    row.iter()
                        .zip(b.iter())
                        .fold(Fr::ZERO, |acc, (x, b_row)| acc + *x * b_row[j])
                })
                .collect()
        })
        .collect()
}

/// Gauss-Jordan inversion. `None` for singular matrices.
fn invert(m: &Matrix) -> Option<Matrix> {
    let n = m.len();
    let mut aug: Matrix = m
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.extend((0..n).map(|j| if i == j { Fr::ONE } else { Fr::ZERO }));
            r
        })
        .collect();

    for col in 0..n {
        let pivot = (col..n).find(|&r| !aug[r][col].is_zero())?;
        aug.swap(col, pivot);

        let inv = aug[col][col].inverse().ok()?;
        for x in aug[col].iter_mut() {
            *x *= inv;
        }

        let pivot_row = aug[col].clone();
        for (r, row) in aug.iter_mut().enumerate() {
            if r == col || row[col].is_zero() {
                continue;
            }
            let factor = row[col];
            for (x, p) in row.iter_mut().zip(pivot_row.iter()) {
                *x -= factor * *p;
            }
        }
    }

    Some(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}

/// One partial-round mixing matrix `[[a00, row], [col, I]]`.
#[derive(Debug, Clone)]
pub(crate) struct SparseMatrix {
    a00: Fr,
    row: Vec<Fr>,
    col: Vec<Fr>,
}

impl SparseMatrix {
    pub(crate) fn apply(&self, state: &mut [Fr]) {
        let s0 = state[0];
        let mut first = self.a00 * s0;
        for (x, r) in state[1..].iter().zip(self.row.iter()) {
            first += *x * *r;
        }
        for (x, c) in state[1..].iter_mut().zip(self.col.iter()) {
            *x += *c * s0;
        }
        state[0] = first;
    }
}

/// Precomputed constants for the optimised permutation.
#[derive(Debug, Clone)]
pub(crate) struct OptimizedConstants {
    /// Added to the input before the first round
    pub(crate) initial: Vec<Fr>,
    /// Added after the S-box of round r, for r < R - 1. During partial
    /// rounds only element 0 is non-zero.
    pub(crate) post_sbox: Vec<Vec<Fr>>,
    /// Replaces the mix of the last first-half full round
    pub(crate) pre_sparse: Matrix,
    pub(crate) sparse: Vec<SparseMatrix>,
}

/// Derive the sparse form from dense constants. `None` only if a matrix that
/// must be invertible is not, which cannot happen for a Cauchy MDS.
pub(crate) fn optimize(
    round_constants: &[Fr],
    mds: &Matrix,
    t: usize,
    rounds_f: usize,
    rounds_p: usize,
) -> Option<OptimizedConstants> {
    let half = rounds_f / 2;
    let rounds = rounds_f + rounds_p;
    let constants: Vec<&[Fr]> = round_constants.chunks(t).collect();
    let mds_inv = invert(mds)?;

    let mut post_sbox: Vec<Vec<Fr>> = (0..rounds - 1)
        .map(|r| mat_vec(&mds_inv, constants[r + 1]))
        .collect();

    // Push partial-round constants on elements 1.. back into the previous round
    for r in (half..half + rounds_p).rev() {
        let mut tail = post_sbox[r].clone();
        tail[0] = Fr::ZERO;
        let pushed = mat_vec(&mds_inv, &tail);
        for (acc, x) in post_sbox[r - 1].iter_mut().zip(pushed) {
            *acc += x;
        }
        for x in post_sbox[r].iter_mut().skip(1) {
            *x = Fr::ZERO;
        }
    }

    // Factor from the last partial round backwards
    let mut sparse = Vec::with_capacity(rounds_p);
    let mut current = mds.clone();
    for _ in 0..rounds_p {
        let a00 = current[0][0];
        let v = &current[0][1..];
        let col: Vec<Fr> = current[1..].iter().map(|row| row[0]).collect();
        let m_hat: Matrix = current[1..].iter().map(|row| row[1..].to_vec()).collect();
        let m_hat_inv = invert(&m_hat)?;

        let row: Vec<Fr> = (0..t - 1)
            .map(|j| {
                v.iter()
                    .zip(m_hat_inv.iter())
                    .fold(Fr::ZERO, |acc, (vk, inv_row)| acc + *vk * inv_row[j])
            })
            .collect();
        sparse.push(SparseMatrix { a00, row, col });

        let mut block: Matrix = vec![vec![Fr::ZERO; t]; t];
        block[0][0] = Fr::ONE;
        for (i, m_row) in m_hat.iter().enumerate() {
            block[i + 1][1..].copy_from_slice(m_row);
        }
        current = mat_mul(&block, mds);
    }
    sparse.reverse();

    Some(OptimizedConstants {
        initial: constants[0].to_vec(),
        post_sbox,
        pre_sparse: current,
        sparse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_matrix() -> Matrix {
        vec![
            vec![Fr::from(2), Fr::from(1)],
            vec![Fr::from(7), Fr::from(4)],
        ]
    }

    #[test]
    fn test_invert() {
        let m = small_matrix();
        let inv = invert(&m).unwrap();
        let id = mat_mul(&m, &inv);
        assert_eq!(id[0], vec![Fr::ONE, Fr::ZERO]);
        assert_eq!(id[1], vec![Fr::ZERO, Fr::ONE]);
    }

    #[test]
    fn test_invert_singular() {
        let m = vec![
            vec![Fr::from(1), Fr::from(2)],
            vec![Fr::from(2), Fr::from(4)],
        ];
        assert!(invert(&m).is_none());
    }

    #[test]
    fn test_mat_vec() {
        let v = mat_vec(&small_matrix(), &[Fr::from(1), Fr::from(1)]);
        assert_eq!(v, vec![Fr::from(3), Fr::from(11)]);
    }

    #[test]
    fn test_sparse_apply() {
        let sparse = SparseMatrix {
            a00: Fr::from(2),
            row: vec![Fr::from(3), Fr::from(5)],
            col: vec![Fr::from(7), Fr::from(11)],
        };
        let mut state = vec![Fr::from(1), Fr::from(10), Fr::from(100)];
        sparse.apply(&mut state);
        assert_eq!(
            state,
            vec![Fr::from(2 + 30 + 500), Fr::from(17), Fr::from(111)]
        );
    }
}
