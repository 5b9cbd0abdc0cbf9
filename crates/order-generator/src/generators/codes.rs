//! Formatted identifier codes.

use rand::Rng;

/// `ORD-#####`, value in 1..=99999. Collisions are expected.
pub fn generate_order_key<R: Rng>(rng: &mut R) -> String {
    format!("ORD-{:05}", rng.gen_range(1..=99_999))
}

/// `D###`, value in 1..=999.
pub fn generate_dealer_code<R: Rng>(rng: &mut R) -> String {
    format!("D{:03}", rng.gen_range(1..=999))
}

/// `SRC###`, value in 100..=999.
pub fn generate_source_id<R: Rng>(rng: &mut R) -> String {
    format!("SRC{}", rng.gen_range(100..=999))
}

/// `MGMT##`, value in 0..=99.
pub fn generate_management_code<R: Rng>(rng: &mut R) -> String {
    format!("MGMT{:02}", rng.gen_range(0..=99))
}

/// Revision counter `"1"`..`"5"`.
pub fn generate_revision<R: Rng>(rng: &mut R) -> String {
    rng.gen_range(1..=5).to_string()
}
