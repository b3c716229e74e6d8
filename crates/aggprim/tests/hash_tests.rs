use aggprim::{murmur3_32, murmur3_128, murmur3_sum};

mod common;

// the verification procedure from SMHasher: hash keys of every length from 0
// to 255 (with a length-dependent seed), then hash the concatenated digests
fn verification_value(hash_bytes: usize, hash: impl Fn(&[u8], u32, &mut Vec<u8>)) -> u32 {
    let key: Vec<u8> = (0..=255).collect();
    let mut digests = Vec::with_capacity(256 * hash_bytes);
    for i in 0..256 {
        hash(&key[..i], 256 - i as u32, &mut digests);
    }
    let mut last = Vec::with_capacity(hash_bytes);
    hash(&digests, 0, &mut last);
    u32::from_le_bytes([last[0], last[1], last[2], last[3]])
}

#[test]
fn smhasher_verification_32() {
    let value = verification_value(4, |key, seed, out| {
        out.extend_from_slice(&murmur3_32(key, seed).to_le_bytes())
    });
    assert_eq!(value, 0xb0f5_7ee3);
}

#[test]
fn smhasher_verification_128() {
    let value = verification_value(16, |key, seed, out| {
        let [h1, h2] = murmur3_128(key, seed);
        out.extend_from_slice(&h1.to_le_bytes());
        out.extend_from_slice(&h2.to_le_bytes());
    });
    assert_eq!(value, 0x6384_ba69);
}

#[test]
fn known_digests_32() {
    let seed = 0x9747_b28c;
    assert_eq!(murmur3_32(b"", 0xffff_ffff), 0x81f1_6f39);
    assert_eq!(murmur3_32(&[0, 0, 0, 0], 0), 0x2362_f9de);
    assert_eq!(murmur3_32(b"aaaa", seed), 0x5a97_808a);
    assert_eq!(murmur3_32(b"abc", seed), 0xc84a_62dd);
    assert_eq!(murmur3_32(b"Hello, world!", seed), 0x2488_4cba);
    assert_eq!(murmur3_32(&[0; 16], 0), 0x8134_cdf8);
}

#[test]
fn known_digests_128() {
    assert_eq!(
        murmur3_128(b"The quick brown fox jumps over the lazy dog", 0),
        [0xe34b_bc7b_bc07_1b6c, 0x7a43_3ca9_c49a_9347]
    );
    assert_eq!(
        murmur3_128(b"hello", 0),
        [0xcbd8_a7b3_41bd_9b02, 0x5b1e_906a_48ae_1d19]
    );
    assert_eq!(
        murmur3_128(b"hello", 42),
        [0xc4b8_b3c9_60af_6f08, 0x2334_b875_b0ef_bc7a]
    );
    let bytes: Vec<u8> = (0..16).collect();
    assert_eq!(murmur3_sum::<64>(&bytes, 0), 0x4449_24b5_9190_3f30);
}

#[test]
fn group_key_digests() {
    assert_eq!(murmur3_sum::<64>(&7_i32.to_le_bytes(), 0), 0x7f27_69b6_7e46_1dfb);
    assert_eq!(murmur3_sum::<64>(&(-1_i32).to_le_bytes(), 0), 0x43da_45eb_3466_4641);
}

#[test]
fn sum_matches_underlying_variant() {
    let mut rng = common::rng(1729);
    for len in 0..64 {
        let key = common::random_bytes(&mut rng, len);
        let seed = len as u32 * 31;
        assert_eq!(murmur3_sum::<32>(&key, seed), murmur3_32(&key, seed));
        assert_eq!(murmur3_sum::<64>(&key, seed), murmur3_128(&key, seed)[0]);
    }
}

#[test]
fn deterministic_and_seed_sensitive() {
    let mut rng = common::rng(42);
    let key = common::random_bytes(&mut rng, 37);
    assert_eq!(murmur3_128(&key, 9), murmur3_128(&key, 9));
    assert_ne!(murmur3_128(&key, 9), murmur3_128(&key, 10));
    assert_ne!(murmur3_32(&key, 9), murmur3_32(&key, 10));
}
