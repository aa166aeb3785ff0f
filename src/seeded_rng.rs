use blake2::{Blake2b512, Digest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// ChaCha8 generator for one table of a run.
///
/// `id` names the table (e.g. "drug_exposure"). Each table gets
/// its own stream, so a new table added under the same seed
/// leaves existing tables' rows unchanged. The seed bytes are
/// the first 32 bytes of Blake2b-512 over "{id}{global_seed}".
pub fn make_rng(global_seed: u64, id: &str) -> ChaCha8Rng {
    let message = format!("{id}{global_seed}");
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[0..32]);
    ChaCha8Rng::from_seed(seed)
}
