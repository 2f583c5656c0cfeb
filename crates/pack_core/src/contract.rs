//! Declarative schema contract for generated content packs.
//!
//! Ranges and cardinalities live in a plain data structure so the same
//! contract can check backend output inside the generator loop and any
//! hand-authored pack fed to the validator. Literal-set membership for
//! `platform`, `event_type`, and `language` is enforced earlier, by typed
//! deserialization.

use crate::models::{ContentPack, Platform};

/// Inclusive item-count bounds for a collection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenBounds {
    pub min: usize,
    pub max: usize,
}

impl LenBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

/// The pack shape contract: field cardinalities and numeric ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackContract {
    pub titles: LenBounds,
    pub captions: LenBounds,
    pub hashtags: LenBounds,
    pub key_moments: LenBounds,
    pub minute_max: u8,
}

impl Default for PackContract {
    fn default() -> Self {
        Self {
            titles: LenBounds::new(2, 3),
            captions: LenBounds::new(3, 3),
            hashtags: LenBounds::new(0, 12),
            key_moments: LenBounds::new(0, 5),
            minute_max: 130,
        }
    }
}

impl PackContract {
    /// Check a parsed pack against the contract.
    ///
    /// All violations are collected into one message; the generator feeds it
    /// back as corrective instructions.
    pub fn check(&self, pack: &ContentPack) -> Result<(), String> {
        let mut violations: Vec<String> = Vec::new();

        if !self.titles.contains(pack.titles.len()) {
            violations.push(format!(
                "titles: expected {}-{} items, got {}",
                self.titles.min,
                self.titles.max,
                pack.titles.len()
            ));
        }

        if !self.captions.contains(pack.captions.len()) {
            violations.push(format!(
                "captions: expected exactly {} items, got {}",
                self.captions.max,
                pack.captions.len()
            ));
        }
        for platform in Platform::ALL {
            let count = pack
                .captions
                .iter()
                .filter(|c| c.platform == platform)
                .count();
            if count != 1 {
                violations.push(format!(
                    "captions: platform {platform} must appear exactly once, got {count}"
                ));
            }
        }

        if !self.hashtags.contains(pack.hashtags.len()) {
            violations.push(format!(
                "hashtags: expected at most {} items, got {}",
                self.hashtags.max,
                pack.hashtags.len()
            ));
        }

        if !self.key_moments.contains(pack.key_moments.len()) {
            violations.push(format!(
                "key_moments: expected at most {} items, got {}",
                self.key_moments.max,
                pack.key_moments.len()
            ));
        }
        for (i, moment) in pack.key_moments.iter().enumerate() {
            if moment.minute > self.minute_max {
                violations.push(format!(
                    "key_moments[{i}].minute: {} out of range 0-{}",
                    moment.minute, self.minute_max
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}
