//! Mined maneuver events.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::detectors::Span;
use crate::error::Result;
use crate::maneuver::{ActorRole, ManeuverType};
use crate::sample::ObjectId;
use crate::sampler::sample_negatives;

/// Half-open range of scene frame indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameRange {
    pub start: usize,
    pub end: usize,
}

impl FrameRange {
    /// Range covering the first through the last of `frames`.
    ///
    /// `frames` must be ascending. Empty input gives `None`.
    #[must_use]
    pub fn covering(frames: &[usize]) -> Option<Self> {
        let (&first, &last) = (frames.first()?, frames.last()?);
        Some(Self {
            start: first,
            end: last + 1,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[must_use]
    pub const fn contains(&self, frame: usize) -> bool {
        frame >= self.start && frame < self.end
    }
}

/// Who the event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Participants {
    /// The actor performing the maneuver.
    pub primary: ObjectId,
    /// The participant the maneuver is expressed against.
    pub secondary: Option<ObjectId>,
}

impl Participants {
    #[must_use]
    pub const fn solo(primary: ObjectId) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    #[must_use]
    pub const fn pair(primary: ObjectId, secondary: ObjectId) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

/// One detected maneuver with its labels.
///
/// `negatives` is the full refined negative list in confusability order;
/// consumers pick the final distractors with [`ManeuverEvent::sample_distractors`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManeuverEvent {
    pub scene_id: String,
    pub maneuver: ManeuverType,
    pub role: ActorRole,
    /// Index span into the (synchronised) detector input.
    pub span: Span,
    /// Scene frame of every sample in the span.
    pub frames: Vec<usize>,
    pub frame_range: FrameRange,
    pub participants: Participants,
    pub positive: ManeuverType,
    pub negatives: Vec<ManeuverType>,
}

impl ManeuverEvent {
    /// Draw `k` rank-weighted distractors from the negative list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MiningError::InsufficientNegatives`] when fewer than
    /// `k` negatives are recorded.
    pub fn sample_distractors<R: Rng + ?Sized>(
        &self,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<ManeuverType>> {
        sample_negatives(self.positive, &self.negatives, k, rng)
    }

    /// Positive label followed by the negatives.
    #[must_use]
    pub fn labels(&self) -> Vec<ManeuverType> {
        std::iter::once(self.positive).chain(self.negatives.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn event() -> ManeuverEvent {
        ManeuverEvent {
            scene_id: "scene-0061".into(),
            maneuver: ManeuverType::Stop,
            role: ActorRole::Ego,
            span: Span { start: 2, end: 8 },
            frames: (12..18).collect(),
            frame_range: FrameRange { start: 12, end: 18 },
            participants: Participants::solo(ObjectId::Ego),
            positive: ManeuverType::Stop,
            negatives: crate::compat::negatives(ManeuverType::Stop).to_vec(),
        }
    }

    #[test]
    fn test_frame_range_covering() {
        let r = FrameRange::covering(&[3, 4, 6, 9]).unwrap();
        assert_eq!(r, FrameRange { start: 3, end: 10 });
        assert_eq!(r.len(), 7);
        assert!(r.contains(9));
        assert!(!r.contains(10));
        assert_eq!(FrameRange::covering(&[]), None);
    }

    #[test]
    fn test_sample_distractors() {
        let e = event();
        let mut rng = StdRng::seed_from_u64(5);
        let picked = e.sample_distractors(4, &mut rng).unwrap();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|m| e.negatives.contains(m)));
        assert!(e.sample_distractors(e.negatives.len() + 1, &mut rng).is_err());
    }

    #[test]
    fn test_labels() {
        let e = event();
        let labels = e.labels();
        assert_eq!(labels[0], ManeuverType::Stop);
        assert_eq!(labels.len(), e.negatives.len() + 1);
    }
}
