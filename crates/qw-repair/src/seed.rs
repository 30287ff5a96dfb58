//! Reproducible generator seeds.
//!
//! Seeds are FNV-1a hashes of the lesson id plus the phase coordinates, so a
//! re-run over the same state asks the generator for the same permutations.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[must_use]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// Seed for replacement round `round` of the `slot`-th replaced question.
#[must_use]
pub fn round_seed(lesson_id: &str, slot: usize, round: usize) -> u64 {
    fnv1a(format!("{lesson_id}:replace:{slot}:{round}").as_bytes())
}

/// Seed for fill iteration `iteration`.
#[must_use]
pub fn fill_seed(lesson_id: &str, iteration: usize) -> u64 {
    fnv1a(format!("{lesson_id}:fill:{iteration}").as_bytes())
}

/// Seed for the audit's one-shot capacity projection.
#[must_use]
pub fn capacity_seed(lesson_id: &str) -> u64 {
    fnv1a(format!("{lesson_id}:capacity").as_bytes())
}
