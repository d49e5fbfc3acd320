use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Name of the stream the grid builder samples tile attributes from.
pub const ATTRIBUTE_STREAM: &str = "attributes";

/// Generator for the stream `name` under the run seed `seed`.
///
/// The stream seed depends only on `(seed, name)`, never on which other
/// streams were opened before it.
pub fn stream_rng(seed: u64, name: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(seed, name))
}

fn derive_seed(seed: u64, name: &str) -> u64 {
    // FNV-1a over the stream name, then a splitmix64 finalizer over the mix.
    let mut name_hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.bytes() {
        name_hash ^= u64::from(byte);
        name_hash = name_hash.wrapping_mul(0x0000_0100_0000_01b3);
    }

    let mut z = seed ^ name_hash.rotate_left(32);
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
