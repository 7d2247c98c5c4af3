//! Poseidon permutation over Q₁
//!
//! Width-dependent instance: `t = inputs + 1` for 1 to 16 inputs, 8 full
//! rounds, a per-width number of partial rounds and the x⁵ S-box. State
//! element 0 carries the initial state (zero unless given), the inputs follow.
//!
//! Constants are derived per width on first use and shared for the lifetime
//! of the process. The optimised permutation (sparse partial rounds) is used
//! for hashing; the dense one is kept public for cross-checking.

pub(crate) mod grain;
mod goldilocks_constants;
mod hasher;
pub mod goldilocks;
pub mod legacy;
pub(crate) mod optimized;

pub use hasher::{hash_bytes, hash_bytes_x, sum, PoseidonHasher, DEFAULT_FRAME_SIZE};

use crate::errors::{CryptoError, Operation, Result};
use crate::field::Fr;
use num_bigint::BigUint;
use once_cell::sync::OnceCell;
use optimized::{mat_vec, Matrix, OptimizedConstants};

/// Full rounds, split evenly before and after the partial rounds
pub const N_ROUNDS_F: usize = 8;

/// Partial rounds indexed by `t - 2`
pub const N_ROUNDS_P: [usize; 16] = [
    56, 57, 56, 60, 60, 63, 64, 63, 60, 66, 60, 65, 70, 60, 64, 68,
];

/// Largest number of inputs to a single permutation
pub const MAX_INPUTS: usize = N_ROUNDS_P.len();

/// Constants for one width
#[derive(Debug)]
pub(crate) struct PoseidonParams {
    t: usize,
    rounds_p: usize,
    round_constants: Vec<Fr>,
    mds: Matrix,
    optimized: Option<OptimizedConstants>,
}

impl PoseidonParams {
    fn generate(t: usize) -> Self {
        let rounds_p = N_ROUNDS_P[t - 2];
        let (round_constants, mds) = grain::bn254_parameters(t, N_ROUNDS_F, rounds_p);
        let optimized = optimized::optimize(&round_constants, &mds, t, N_ROUNDS_F, rounds_p);
        crate::trace!(
            "poseidon t={}: {} round constants, sparse form {}",
            t,
            round_constants.len(),
            if optimized.is_some() { "ready" } else { "unavailable" }
        );
        PoseidonParams {
            t,
            rounds_p,
            round_constants,
            mds,
            optimized,
        }
    }

    fn is_full_round(&self, r: usize) -> bool {
        let half = N_ROUNDS_F / 2;
        r < half || r >= half + self.rounds_p
    }

    fn rounds(&self) -> usize {
        N_ROUNDS_F + self.rounds_p
    }
}

static PARAMS: [OnceCell<PoseidonParams>; MAX_INPUTS] = [const { OnceCell::new() }; MAX_INPUTS];

fn params(t: usize) -> &'static PoseidonParams {
    PARAMS[t - 2].get_or_init(|| PoseidonParams::generate(t))
}

fn check_width(state: &[Fr]) -> Result<()> {
    if state.len() < 2 || state.len() > MAX_INPUTS + 1 {
        return Err(CryptoError::Arity {
            op: Operation::Poseidon,
            min: 2,
            max: MAX_INPUTS + 1,
            actual: state.len(),
        });
    }
    Ok(())
}

#[inline]
fn sbox(x: Fr) -> Fr {
    let x2 = x.square();
    x2.square() * x
}

fn mix(m: &Matrix, state: &mut [Fr]) {
    let out = mat_vec(m, state);
    state.copy_from_slice(&out);
}

/// Textbook permutation: add constants, S-box, dense MDS in every round.
pub fn permute_dense(state: &mut [Fr]) -> Result<()> {
    check_width(state)?;
    permute_dense_with(params(state.len()), state);
    Ok(())
}

fn permute_dense_with(p: &PoseidonParams, state: &mut [Fr]) {
    for r in 0..p.rounds() {
        let constants = &p.round_constants[r * p.t..(r + 1) * p.t];
        for (x, c) in state.iter_mut().zip(constants) {
            *x += *c;
        }
        if p.is_full_round(r) {
            for x in state.iter_mut() {
                *x = sbox(*x);
            }
        } else {
            state[0] = sbox(state[0]);
        }
        mix(&p.mds, state);
    }
}

/// Permutation with sparse partial rounds. Same output as [`permute_dense`].
pub fn permute(state: &mut [Fr]) -> Result<()> {
    check_width(state)?;
    let p = params(state.len());
    match &p.optimized {
        Some(opt) => permute_optimized(p, opt, state),
        None => permute_dense_with(p, state),
    }
    Ok(())
}

fn permute_optimized(p: &PoseidonParams, opt: &OptimizedConstants, state: &mut [Fr]) {
    let half = N_ROUNDS_F / 2;
    let rounds = p.rounds();

    for (x, c) in state.iter_mut().zip(opt.initial.iter()) {
        *x += *c;
    }

    for r in 0..rounds {
        let full = p.is_full_round(r);
        if full {
            for x in state.iter_mut() {
                *x = sbox(*x);
            }
        } else {
            state[0] = sbox(state[0]);
        }

        if r < rounds - 1 {
            let constants = &opt.post_sbox[r];
            if full {
                for (x, c) in state.iter_mut().zip(constants.iter()) {
                    *x += *c;
                }
            } else {
                state[0] += constants[0];
            }
        }

        if r + 1 == half {
            mix(&opt.pre_sparse, state);
        } else if full {
            mix(&p.mds, state);
        } else {
            opt.sparse[r - half].apply(state);
        }
    }
}

fn check_inputs(len: usize) -> Result<()> {
    if len == 0 || len > MAX_INPUTS {
        return Err(CryptoError::Arity {
            op: Operation::Poseidon,
            min: 1,
            max: MAX_INPUTS,
            actual: len,
        });
    }
    Ok(())
}

fn check_outputs(n_outs: usize, t: usize) -> Result<()> {
    if n_outs == 0 || n_outs > t {
        return Err(CryptoError::Arity {
            op: Operation::PoseidonOutputs,
            min: 1,
            max: t,
            actual: n_outs,
        });
    }
    Ok(())
}

/// Hash field elements with an explicit initial state, returning the first
/// `n_outs` state elements.
pub fn hash_fields_ex(inputs: &[Fr], init_state: Fr, n_outs: usize) -> Result<Vec<Fr>> {
    check_inputs(inputs.len())?;
    let t = inputs.len() + 1;
    check_outputs(n_outs, t)?;

    let mut state = Vec::with_capacity(t);
    state.push(init_state);
    state.extend_from_slice(inputs);
    permute(&mut state)?;
    state.truncate(n_outs);
    Ok(state)
}

/// Single-output hash of field elements.
pub fn hash_fields(inputs: &[Fr]) -> Result<Fr> {
    let out = hash_fields_ex(inputs, Fr::ZERO, 1)?;
    Ok(out[0])
}

fn to_fields(inputs: &[BigUint]) -> Result<Vec<Fr>> {
    inputs
        .iter()
        .map(|x| Fr::from_biguint(x).map_err(|_| CryptoError::range_q1(Operation::Poseidon)))
        .collect()
}

/// Hash 1 to 16 integers below Q₁.
///
/// ```
/// use babyjub_core::poseidon;
/// use num_bigint::BigUint;
///
/// let h = poseidon::hash(&[BigUint::from(1u8), BigUint::from(2u8)]).unwrap();
/// assert_eq!(
///     h.to_string(),
///     "7853200120776062878684798364095072458815029376092732009249414926327459813530"
/// );
/// ```
pub fn hash(inputs: &[BigUint]) -> Result<BigUint> {
    hash_with_state(inputs, &BigUint::default())
}

/// Hash returning the first `n_outs` (1..=t) state elements.
pub fn hash_ex(inputs: &[BigUint], n_outs: usize) -> Result<Vec<BigUint>> {
    hash_with_state_ex(inputs, &BigUint::default(), n_outs)
}

/// Hash with `init_state` in state element 0 instead of zero.
pub fn hash_with_state(inputs: &[BigUint], init_state: &BigUint) -> Result<BigUint> {
    let mut out = hash_with_state_ex(inputs, init_state, 1)?;
    Ok(out.swap_remove(0))
}

pub fn hash_with_state_ex(
    inputs: &[BigUint],
    init_state: &BigUint,
    n_outs: usize,
) -> Result<Vec<BigUint>> {
    check_inputs(inputs.len())?;
    check_outputs(n_outs, inputs.len() + 1)?;
    let init = Fr::from_biguint(init_state)
        .map_err(|_| CryptoError::range_q1(Operation::PoseidonInitialState))?;
    let fields = to_fields(inputs)?;

    let out = hash_fields_ex(&fields, init, n_outs)?;
    Ok(out.iter().map(Fr::to_biguint).collect())
}
