//! Individual field generators.
//!
//! Each function draws one field value from its domain using the caller's RNG.

pub mod codes;
pub mod payload;
pub mod uuid;

use rand::Rng;

/// Pick one value uniformly from a non-empty list.
pub fn one_of<R: Rng, T: Copy>(rng: &mut R, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_one_of_covers_all_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let values = ["TYPEX", "TYPEY", "TYPEZ"];

        let seen: HashSet<&str> = (0..200).map(|_| one_of(&mut rng, &values)).collect();

        assert_eq!(seen.len(), values.len());
    }
}
