//! Main generator producing order records.

use crate::generators::codes::{
    generate_dealer_code, generate_management_code, generate_order_key, generate_revision,
    generate_source_id,
};
use crate::generators::payload::generate_payload;
use crate::generators::uuid::generate_correlation_id;
use crate::generators::one_of;
use crate::record::{
    privileged, Branch, OrderRecord, ACTION_CODES, HOLD_FLAGS, TARGET_TYPES, TRANSACTION_TYPES,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default share of records that carry the privileged filter constants.
pub const DEFAULT_PRIVILEGED_RATIO: f64 = 0.90;

/// Record synthesizer.
///
/// Each call draws `p` uniform in `[0, 1)`; when `p > 1 - privileged_ratio`
/// the record takes the privileged branch, otherwise the generic branch. With
/// the default ratio this is `p > 0.10`. A seeded generator replays the same
/// sequence of records.
pub struct OrderGenerator {
    rng: StdRng,
    privileged_ratio: f64,
    index: u64,
}

impl OrderGenerator {
    /// Create a generator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            privileged_ratio: DEFAULT_PRIVILEGED_RATIO,
            index: 0,
        }
    }

    /// Set the probability of the privileged branch. Clamped to `[0, 1]`.
    pub fn with_privileged_ratio(mut self, ratio: f64) -> Self {
        self.privileged_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn privileged_ratio(&self) -> f64 {
        self.privileged_ratio
    }

    /// Number of records generated so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> OrderRecord {
        self.next_tagged_record().1
    }

    /// Generate the next record along with the branch that produced it.
    pub fn next_tagged_record(&mut self) -> (Branch, OrderRecord) {
        let branch = if self.rng.gen::<f64>() > 1.0 - self.privileged_ratio {
            Branch::Privileged
        } else {
            Branch::Generic
        };

        let rng = &mut self.rng;
        let order_key = generate_order_key(rng);
        let correlation_id = generate_correlation_id(rng);
        let on_hold_flag = one_of(rng, &HOLD_FLAGS).to_string();
        let transaction_type = one_of(rng, &TRANSACTION_TYPES).to_string();
        let target_type = one_of(rng, &TARGET_TYPES).to_string();

        let (revision, dealer_code, source_id, management_code, action_code) = match branch {
            Branch::Privileged => (
                privileged::REVISION.to_string(),
                privileged::DEALER_CODE.to_string(),
                privileged::SOURCE_ID.to_string(),
                privileged::MANAGEMENT_CODE.to_string(),
                privileged::ACTION_CODE.to_string(),
            ),
            Branch::Generic => (
                generate_revision(rng),
                generate_dealer_code(rng),
                generate_source_id(rng),
                generate_management_code(rng),
                one_of(rng, &ACTION_CODES).to_string(),
            ),
        };

        let message_payload = generate_payload(rng).to_json();

        self.index += 1;

        let record = OrderRecord {
            order_key,
            correlation_id,
            on_hold_flag,
            revision,
            transaction_type,
            dealer_code,
            source_id,
            target_type,
            management_code,
            action_code,
            message_payload,
        };
        (branch, record)
    }

    /// Generate multiple records lazily.
    pub fn records(&mut self, count: u64) -> OrderRecordIterator<'_> {
        OrderRecordIterator {
            generator: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates records.
pub struct OrderRecordIterator<'a> {
    generator: &'a mut OrderGenerator,
    remaining: u64,
}

impl Iterator for OrderRecordIterator<'_> {
    type Item = OrderRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OrderRecordIterator<'_> {}
