//! MurmurHash3, used to hash group-by keys.
//!
//! Both variants reproduce the public reference implementation
//! (`MurmurHash3_x86_32` and `MurmurHash3_x64_128` from SMHasher) bit for
//! bit. Other systems hash the same keys, so this is an interoperability
//! contract: don't "improve" the mixing.
//!
//! Blocks are always read as little-endian words, which is what the reference
//! does on the little-endian machines it targets.

#[inline(always)]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[inline(always)]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

#[inline(always)]
fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut word = [0_u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(word)
}

/// 32-bit MurmurHash3 (`MurmurHash3_x86_32`)
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    let mut h1 = seed;

    let mut blocks = key.chunks_exact(4);
    for block in &mut blocks {
        let mut k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);

        h1 ^= k1;
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0_u32;
        for (i, byte) in tail.iter().enumerate() {
            k1 ^= (*byte as u32) << (8 * i);
        }
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    // the reference takes the length as an int
    h1 ^= key.len() as u32;
    fmix32(h1)
}

/// 128-bit MurmurHash3 (`MurmurHash3_x64_128`)
///
/// The returned words are in the order the reference writes them to memory.
pub fn murmur3_128(key: &[u8], seed: u32) -> [u64; 2] {
    const C1: u64 = 0x87c3_7b91_1142_53d5;
    const C2: u64 = 0x4cf5_ad43_2745_937f;

    let mut h1 = seed as u64;
    let mut h2 = seed as u64;

    let mut blocks = key.chunks_exact(16);
    for block in &mut blocks {
        let mut k1 = read_u64_le(&block[..8]);
        let mut k2 = read_u64_le(&block[8..]);

        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;

        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;

        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    let tail = blocks.remainder();
    if tail.len() > 8 {
        let mut k2 = 0_u64;
        for (i, byte) in tail[8..].iter().enumerate() {
            k2 ^= (*byte as u64) << (8 * i);
        }
        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;
    }
    if !tail.is_empty() {
        let mut k1 = 0_u64;
        for (i, byte) in tail.iter().take(8).enumerate() {
            k1 ^= (*byte as u64) << (8 * i);
        }
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    let len = key.len() as u64;
    h1 ^= len;
    h2 ^= len;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    [h1, h2]
}

/// Selects a digest width for [`murmur3_sum`].
pub struct Bits<const N: u32>;

/// Digest widths supported by [`murmur3_sum`].
pub trait HashWidth {
    type Output: Copy;
    fn digest(key: &[u8], seed: u32) -> Self::Output;
}

impl HashWidth for Bits<32> {
    type Output = u32;

    #[inline(always)]
    fn digest(key: &[u8], seed: u32) -> u32 {
        murmur3_32(key, seed)
    }
}

impl HashWidth for Bits<64> {
    type Output = u64;

    #[inline(always)]
    fn digest(key: &[u8], seed: u32) -> u64 {
        murmur3_128(key, seed)[0]
    }
}

/// Hash `key` into a digest of `N` bits.
///
/// `N = 32` uses the 32-bit variant. `N = 64` truncates the 128-bit variant
/// to its first word.
#[inline(always)]
pub fn murmur3_sum<const N: u32>(key: &[u8], seed: u32) -> <Bits<N> as HashWidth>::Output
where
    Bits<N>: HashWidth,
{
    <Bits<N> as HashWidth>::digest(key, seed)
}
