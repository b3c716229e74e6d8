// silences warnings about helpers that only some test binaries use
#![allow(dead_code)]

// named mod.rs so that cargo doesn't treat it as its own test binary
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

pub fn rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

pub fn random_bytes(rng: &mut Xoshiro256PlusPlus, len: usize) -> Vec<u8> {
    let mut out = vec![0_u8; len];
    rng.fill(&mut out[..]);
    out
}

pub fn random_values<T>(rng: &mut Xoshiro256PlusPlus, len: usize) -> Vec<T>
where
    rand::distr::StandardUniform: rand::distr::Distribution<T>,
{
    (0..len).map(|_| rng.random()).collect()
}
