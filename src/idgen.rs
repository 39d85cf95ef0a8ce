// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Identifier generation.
//!
//! Two schemes live here:
//! - screen ids come from a per-template monotonic sequence and never collide;
//! - string-table keys are short random strings (`s_` + 8 base-36 chars). The key space is
//!   36^8 (about 2.8e12), so two keys drawn for the same template collide with probability
//!   around n^2 / 5.6e12. Callers that hold the live table redraw on a hit (see
//!   [`KeyGenerator::mint_unused`]).

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{ScreenId, StringKey};

const KEY_PREFIX: &str = "s_";
const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const KEY_RANDOM_LEN: usize = 8;

/// Random string-table key source.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    rng: StdRng,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic generator; used by tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn mint(&mut self) -> StringKey {
        let mut raw = String::with_capacity(KEY_PREFIX.len() + KEY_RANDOM_LEN);
        raw.push_str(KEY_PREFIX);
        for _ in 0..KEY_RANDOM_LEN {
            let idx = self.rng.gen_range(0..KEY_ALPHABET.len());
            raw.push(char::from(KEY_ALPHABET[idx]));
        }
        StringKey::new(raw).unwrap_or_else(|_| unreachable!("generated keys use a safe alphabet"))
    }

    /// Mints a key for which `taken` returns false.
    pub fn mint_unused(&mut self, mut taken: impl FnMut(&StringKey) -> bool) -> StringKey {
        loop {
            let key = self.mint();
            if !taken(&key) {
                return key;
            }
        }
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen id source scoped to one template.
///
/// Counts upward from one past the largest id seen. Once the counter runs past `u64::MAX`
/// it falls back to the smallest id not yet seen or handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenIdSequence {
    next: Option<u64>,
    taken: BTreeSet<u64>,
}

impl ScreenIdSequence {
    pub fn new() -> Self {
        Self {
            next: Some(1),
            taken: BTreeSet::new(),
        }
    }

    /// Sequence that continues above every id in `existing`.
    pub fn after(existing: impl IntoIterator<Item = ScreenId>) -> Self {
        let mut sequence = Self::new();
        for id in existing {
            sequence.observe(id);
        }
        sequence
    }

    /// Makes sure `id` is never handed out.
    pub fn observe(&mut self, id: ScreenId) {
        let value = id.get();
        self.taken.insert(value);
        if let Some(next) = self.next {
            if value >= next {
                self.next = value.checked_add(1);
            }
        }
    }

    pub fn next_id(&mut self) -> ScreenId {
        let value = match self.next {
            Some(value) => {
                self.next = value.checked_add(1);
                value
            }
            None => self.lowest_free(),
        };
        self.taken.insert(value);
        ScreenId::new(value)
    }

    fn lowest_free(&self) -> u64 {
        let mut candidate = 1u64;
        for &value in self.taken.range(1..) {
            if value != candidate {
                break;
            }
            candidate = value.saturating_add(1);
        }
        candidate
    }
}

impl Default for ScreenIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{KeyGenerator, ScreenIdSequence};
    use crate::model::ScreenId;

    #[test]
    fn minted_keys_have_prefix_and_base36_body() {
        let mut keys = KeyGenerator::from_seed(7);
        for _ in 0..64 {
            let key = keys.mint();
            let body = key.as_str().strip_prefix("s_").expect("prefix");
            assert_eq!(body.len(), 8);
            assert!(body.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let mut a = KeyGenerator::from_seed(42);
        let mut b = KeyGenerator::from_seed(42);
        for _ in 0..8 {
            assert_eq!(a.mint(), b.mint());
        }
    }

    #[test]
    fn mint_unused_skips_taken_keys() {
        let mut twin = KeyGenerator::from_seed(3);
        let first = twin.mint();

        let mut keys = KeyGenerator::from_seed(3);
        let key = keys.mint_unused(|candidate| candidate == &first);
        assert_ne!(key, first);
    }

    #[test]
    fn sequence_continues_above_existing_ids() {
        let existing = [ScreenId::new(5), ScreenId::new(2), ScreenId::new(9)];
        let mut sequence = ScreenIdSequence::after(existing);
        assert_eq!(sequence.next_id(), ScreenId::new(10));
        assert_eq!(sequence.next_id(), ScreenId::new(11));
    }

    #[test]
    fn sequence_never_repeats() {
        let mut sequence = ScreenIdSequence::new();
        let ids = (0..100).map(|_| sequence.next_id()).collect::<BTreeSet<_>>();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn sequence_skips_ids_in_use_after_reaching_the_maximum() {
        let existing = [ScreenId::new(u64::MAX), ScreenId::new(1), ScreenId::new(3)];
        let mut sequence = ScreenIdSequence::after(existing);

        assert_eq!(sequence.next_id(), ScreenId::new(2));
        assert_eq!(sequence.next_id(), ScreenId::new(4));
        assert_eq!(sequence.next_id(), ScreenId::new(5));
    }

    #[test]
    fn sequence_hands_out_the_maximum_once() {
        let mut sequence = ScreenIdSequence::after([ScreenId::new(u64::MAX - 1)]);

        assert_eq!(sequence.next_id(), ScreenId::new(u64::MAX));
        assert_eq!(sequence.next_id(), ScreenId::new(1));
    }
}
