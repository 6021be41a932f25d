//! Keccak256 as used by Ethereum.
//!
//! This is the original Keccak submission with multi-rate padding byte
//! `0x01`, not NIST SHA3-256 (padding byte `0x06`). Every hash in the
//! signing pipeline — connection ids, EIP-712 domain/struct/signing hashes,
//! address derivation — goes through this function.

use alloy_primitives::B256;

/// Sponge rate in bytes for a 256-bit capacity (1600 - 2*256 bits).
const RATE: usize = 136;

const ROUNDS: usize = 24;

const RC: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Rotation offsets for the rho step, in the lane order visited by pi.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62,
    18, 39, 61, 20, 44,
];

/// Lane permutation for the pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20,
    14, 22, 9, 6, 1,
];

/// The keccak-f[1600] permutation over 25 64-bit lanes.
fn keccak_f(state: &mut [u64; 25]) {
    for &rc in RC.iter() {
        // theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x]
                ^ state[x + 5]
                ^ state[x + 10]
                ^ state[x + 15]
                ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // rho and pi
        let mut last = state[1];
        for i in 0..24 {
            let t = state[PI[i]];
            state[PI[i]] = last.rotate_left(RHO[i]);
            last = t;
        }

        // chi
        for y in 0..5 {
            let row = [
                state[5 * y],
                state[5 * y + 1],
                state[5 * y + 2],
                state[5 * y + 3],
                state[5 * y + 4],
            ];
            for x in 0..5 {
                state[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // iota
        state[0] ^= rc;
    }
}

/// Compute the Keccak256 digest of `data`. Empty input is valid.
pub fn keccak256(data: &[u8]) -> B256 {
    let mut state = [0u64; 25];
    let mut block = [0u8; RATE];

    let mut chunks = data.chunks_exact(RATE);
    for chunk in &mut chunks {
        absorb(&mut state, chunk);
        keccak_f(&mut state);
    }

    // Final block with Keccak multi-rate padding: 0x01 after the message,
    // 0x80 ORed into the last byte of the rate (a single 0x81 when the
    // remainder fills all but one byte).
    let rem = chunks.remainder();
    block[..rem.len()].copy_from_slice(rem);
    block[rem.len()] = 0x01;
    block[RATE - 1] |= 0x80;
    absorb(&mut state, &block);
    keccak_f(&mut state);

    let mut out = [0u8; 32];
    for (i, chunk) in out.chunks_exact_mut(8).enumerate() {
        chunk.copy_from_slice(&state[i].to_le_bytes());
    }
    B256::from(out)
}

/// XOR a full rate-sized block into the state, little-endian lanes.
fn absorb(state: &mut [u64; 25], block: &[u8]) {
    debug_assert_eq!(block.len(), RATE);
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(word);
    }
}
