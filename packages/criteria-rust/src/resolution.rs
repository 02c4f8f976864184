//! Named resolution buckets and their pixel bounds.
//!
//! Bounds apply to the shorter side of the frame, so portrait and landscape
//! media of the same quality land in the same bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modifier::CriterionModifier;

/// Closed set of resolution buckets understood by the query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionBucket {
    VeryLow,
    Low,
    R360p,
    Standard,
    WebHd,
    StandardHd,
    FullHd,
    QuadHd,
    VrHd,
    FourK,
    FiveK,
    SixK,
    EightK,
}

impl ResolutionBucket {
    /// Every bucket, smallest first.
    pub const ALL: [ResolutionBucket; 13] = [
        Self::VeryLow,
        Self::Low,
        Self::R360p,
        Self::Standard,
        Self::WebHd,
        Self::StandardHd,
        Self::FullHd,
        Self::QuadHd,
        Self::VrHd,
        Self::FourK,
        Self::FiveK,
        Self::SixK,
        Self::EightK,
    ];

    /// Wire name of the bucket.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "VERY_LOW",
            Self::Low => "LOW",
            Self::R360p => "R360P",
            Self::Standard => "STANDARD",
            Self::WebHd => "WEB_HD",
            Self::StandardHd => "STANDARD_HD",
            Self::FullHd => "FULL_HD",
            Self::QuadHd => "QUAD_HD",
            Self::VrHd => "VR_HD",
            Self::FourK => "FOUR_K",
            Self::FiveK => "FIVE_K",
            Self::SixK => "SIX_K",
            Self::EightK => "EIGHT_K",
        }
    }

    /// Short display label (`720p`, `4k`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "144p",
            Self::Low => "240p",
            Self::R360p => "360p",
            Self::Standard => "480p",
            Self::WebHd => "540p",
            Self::StandardHd => "720p",
            Self::FullHd => "1080p",
            Self::QuadHd => "1440p",
            Self::VrHd => "1920p",
            Self::FourK => "4k",
            Self::FiveK => "5k",
            Self::SixK => "6k",
            Self::EightK => "8k",
        }
    }

    /// Looks up a bucket by wire name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str().eq_ignore_ascii_case(name))
    }

    /// Inclusive lower pixel bound of the bucket.
    #[must_use]
    pub fn min_height(self) -> u32 {
        match self {
            Self::VeryLow => 144,
            Self::Low => 240,
            Self::R360p => 360,
            Self::Standard => 480,
            Self::WebHd => 540,
            Self::StandardHd => 720,
            Self::FullHd => 1080,
            Self::QuadHd => 1440,
            Self::VrHd => 1920,
            Self::FourK => 2160,
            Self::FiveK => 2880,
            Self::SixK => 3384,
            Self::EightK => 4320,
        }
    }

    /// Exclusive upper pixel bound, i.e. the next bucket's lower bound.
    /// `None` for the largest bucket.
    #[must_use]
    pub fn max_height(self) -> Option<u32> {
        self.next().map(Self::min_height)
    }

    fn next(self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|b| *b == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Maps this bucket under `modifier` to a comparison on pixel height.
    ///
    /// Returns `None` for modifiers that are not legal on resolution fields.
    #[must_use]
    pub fn height_predicate(self, modifier: CriterionModifier) -> Option<HeightPredicate> {
        let min = self.min_height();
        let max = self.max_height();
        match modifier {
            CriterionModifier::Equals => Some(HeightPredicate::Within { min, max }),
            CriterionModifier::NotEquals => Some(HeightPredicate::Outside { min, max }),
            CriterionModifier::GreaterThan => Some(match max {
                Some(next) => HeightPredicate::AtLeast(next),
                None => HeightPredicate::Nothing,
            }),
            CriterionModifier::LessThan => Some(HeightPredicate::Below(min)),
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pixel-height comparison a resolution criterion stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightPredicate {
    /// `min <= h` and, when bounded, `h < max`.
    Within { min: u32, max: Option<u32> },
    /// Negation of [`HeightPredicate::Within`].
    Outside { min: u32, max: Option<u32> },
    /// `h >= bound`.
    AtLeast(u32),
    /// `h < bound`.
    Below(u32),
    /// Matches nothing: there is no bucket above the largest one.
    Nothing,
}

impl HeightPredicate {
    /// Evaluates the predicate against a concrete pixel height.
    #[must_use]
    pub fn matches(self, height: u32) -> bool {
        let within = |min: u32, max: Option<u32>| height >= min && max.map_or(true, |m| height < m);
        match self {
            Self::Within { min, max } => within(min, max),
            Self::Outside { min, max } => !within(min, max),
            Self::AtLeast(bound) => height >= bound,
            Self::Below(bound) => height < bound,
            Self::Nothing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_contiguous() {
        for pair in ResolutionBucket::ALL.windows(2) {
            assert_eq!(pair[0].max_height(), Some(pair[1].min_height()));
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(ResolutionBucket::EightK.max_height(), None);
    }

    #[test]
    fn wire_names_match_serde() {
        for bucket in ResolutionBucket::ALL {
            let json = serde_json::to_string(&bucket).unwrap();
            assert_eq!(json, format!("\"{}\"", bucket.as_str()));
            assert_eq!(ResolutionBucket::from_name(bucket.as_str()), Some(bucket));
        }
        assert_eq!(ResolutionBucket::from_name("full_hd"), Some(ResolutionBucket::FullHd));
        assert_eq!(ResolutionBucket::from_name("1080p"), None);
    }

    #[test]
    fn equals_selects_bucket_range() {
        let p = ResolutionBucket::StandardHd
            .height_predicate(CriterionModifier::Equals)
            .unwrap();
        assert_eq!(p, HeightPredicate::Within { min: 720, max: Some(1080) });
        assert!(p.matches(720));
        assert!(p.matches(1079));
        assert!(!p.matches(1080));
        assert!(!p.matches(719));
    }

    #[test]
    fn not_equals_is_complement() {
        let p = ResolutionBucket::FullHd
            .height_predicate(CriterionModifier::NotEquals)
            .unwrap();
        assert!(p.matches(720));
        assert!(!p.matches(1080));
        assert!(p.matches(1440));
    }

    #[test]
    fn greater_than_starts_at_next_bucket() {
        let p = ResolutionBucket::FullHd
            .height_predicate(CriterionModifier::GreaterThan)
            .unwrap();
        assert_eq!(p, HeightPredicate::AtLeast(1440));
        assert!(!p.matches(1080));

        let top = ResolutionBucket::EightK
            .height_predicate(CriterionModifier::GreaterThan)
            .unwrap();
        assert!(!top.matches(10_000));
    }

    #[test]
    fn less_than_stops_below_bucket() {
        let p = ResolutionBucket::Standard
            .height_predicate(CriterionModifier::LessThan)
            .unwrap();
        assert_eq!(p, HeightPredicate::Below(480));
        assert!(p.matches(360));
        assert!(!p.matches(480));
    }

    #[test]
    fn range_modifiers_have_no_height_predicate() {
        assert!(ResolutionBucket::Low
            .height_predicate(CriterionModifier::Between)
            .is_none());
    }
}
