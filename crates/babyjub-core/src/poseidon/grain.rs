//! Grain LFSR used to derive the Q₁ Poseidon round constants and MDS matrices
//!
//! The 80-bit register is seeded with the permutation parameters
//! (field type, S-box type, field size, width, round counts) followed by
//! thirty ones, clocked 160 times, and then read through a self-shrinking
//! filter: of every pair of output bits the second is kept only when the
//! first is set.

use crate::field::Fr;

const STATE_BITS: u32 = 80;
const WARMUP_CLOCKS: usize = 160;

/// Field type flag for prime fields
const FIELD_PRIME: u64 = 1;
/// S-box flag for x^alpha
const SBOX_POWER: u64 = 0;

pub(crate) struct Grain {
    /// Bit i is the i-th oldest register bit
    state: u128,
}

impl Grain {
    pub(crate) fn new(field_bits: u64, t: usize, rounds_f: usize, rounds_p: usize) -> Self {
        let fields: [(u64, u32); 6] = [
            (FIELD_PRIME, 2),
            (SBOX_POWER, 4),
            (field_bits, 12),
            (t as u64, 12),
            (rounds_f as u64, 10),
            (rounds_p as u64, 10),
        ];

        let mut state = 0u128;
        let mut pos = 0u32;
        for (value, width) in fields {
            for i in (0..width).rev() {
                state |= (((value >> i) & 1) as u128) << pos;
                pos += 1;
            }
        }
        while pos < STATE_BITS {
            state |= 1u128 << pos;
            pos += 1;
        }

        let mut grain = Grain { state };
        for _ in 0..WARMUP_CLOCKS {
            grain.clock();
        }
        grain
    }

    fn clock(&mut self) -> bool {
        let s = self.state;
        let bit = ((s >> 62) ^ (s >> 51) ^ (s >> 38) ^ (s >> 23) ^ (s >> 13) ^ s) & 1;
        self.state = (s >> 1) | (bit << (STATE_BITS - 1));
        bit == 1
    }

    fn next_bit(&mut self) -> bool {
        loop {
            let keep = self.clock();
            let bit = self.clock();
            if keep {
                return bit;
            }
        }
    }

    /// Read `bits` filtered bits (at most 256) as a big-endian integer.
    fn next_limbs(&mut self, bits: usize) -> [u64; 4] {
        let mut limbs = [0u64; 4];
        for j in (0..bits).rev() {
            if self.next_bit() {
                limbs[j / 64] |= 1u64 << (j % 64);
            }
        }
        limbs
    }

    /// Rejection-sample an element of Q₁ from 254-bit draws.
    fn next_fr(&mut self) -> Fr {
        loop {
            let limbs = self.next_limbs(254);
            if Fr::limbs_in_range(&limbs) {
                return Fr::from_limbs_unchecked(limbs);
            }
        }
    }

    /// A 254-bit draw reduced mod Q₁.
    fn next_fr_reduced(&mut self) -> Fr {
        Fr::from_limbs_reduced(self.next_limbs(254))
    }
}

/// Round constants (`(rounds_f + rounds_p) · t` of them, round-major) and the
/// Cauchy MDS matrix for the Q₁ permutation of width `t`.
pub(crate) fn bn254_parameters(t: usize, rounds_f: usize, rounds_p: usize) -> (Vec<Fr>, Vec<Vec<Fr>>) {
    let mut grain = Grain::new(254, t, rounds_f, rounds_p);

    let round_constants = (0..(rounds_f + rounds_p) * t)
        .map(|_| grain.next_fr())
        .collect();

    let mds = loop {
        let mut samples: Vec<Fr> = (0..2 * t).map(|_| grain.next_fr_reduced()).collect();
        while !all_distinct(&samples) {
            samples = (0..2 * t).map(|_| grain.next_fr_reduced()).collect();
        }
        let (xs, ys) = samples.split_at(t);
        if let Some(mds) = cauchy_matrix(xs, ys) {
            break mds;
        }
        crate::trace!("poseidon t={}: degenerate cauchy sample, resampling", t);
    };

    (round_constants, mds)
}

fn all_distinct(values: &[Fr]) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, a)| values[i + 1..].iter().all(|b| a != b))
}

/// M[i][j] = 1 / (x_i + y_j), or `None` when some sum is zero.
fn cauchy_matrix(xs: &[Fr], ys: &[Fr]) -> Option<Vec<Vec<Fr>>> {
    xs.iter()
        .map(|x| {
            ys.iter()
                .map(|y| (*x + *y).inverse().ok())
                .collect::<Option<Vec<Fr>>>()
        })
        .collect()
}
