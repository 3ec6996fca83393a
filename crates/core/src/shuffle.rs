use rand::Rng;
use rand::seq::SliceRandom;

/// Return a uniformly random permutation of `items`, leaving the input alone.
#[must_use]
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
