//! Uniform random choice over a slice.

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot pick from an empty list")]
pub struct EmptyInputError;

/// Pick one element of `items` with a uniformly drawn index.
///
/// Fails before touching `rng` when `items` is empty.
pub fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> Result<&'a T, EmptyInputError>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(&items[rng.random_range(0..items.len())])
}

/// [`pick`] using the thread-local generator.
#[cfg(not(target_arch = "wasm32"))]
pub fn pick_random<T>(items: &[T]) -> Result<&T, EmptyInputError> {
    pick(items, &mut rand::rng())
}
