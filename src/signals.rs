//! Columnar signal extraction and pairing.
//!
//! Detectors work on [`Signals`]: one column per quantity (position, yaw,
//! speed, map membership) over an object's samples. Two objects are paired
//! by keeping only the samples whose timestamps appear in both tracks.

use nalgebra::{UnitQuaternion, Vector3};

use crate::error::{MiningError, Result};
use crate::math::frame::{heading_gap_deg, to_body_frame};
use crate::sample::{ActorKind, KinematicSample, MapMembership, Track};

/// Per-object signal columns, all of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    kind: ActorKind,
    frames: Vec<usize>,
    timestamps: Vec<i64>,
    positions: Vec<Vector3<f64>>,
    orientations: Vec<UnitQuaternion<f64>>,
    yaw: Vec<f64>,
    speed: Vec<f64>,
    map: Vec<MapMembership>,
}

impl Signals {
    /// Extract columns from samples of one object.
    pub fn from_samples<'a, I>(kind: ActorKind, samples: I) -> Self
    where
        I: IntoIterator<Item = &'a KinematicSample>,
    {
        let iter = samples.into_iter();
        let cap = iter.size_hint().0;
        let mut signals = Self {
            kind,
            frames: Vec::with_capacity(cap),
            timestamps: Vec::with_capacity(cap),
            positions: Vec::with_capacity(cap),
            orientations: Vec::with_capacity(cap),
            yaw: Vec::with_capacity(cap),
            speed: Vec::with_capacity(cap),
            map: Vec::with_capacity(cap),
        };
        for s in iter {
            signals.frames.push(s.frame);
            signals.timestamps.push(s.timestamp);
            signals.positions.push(s.translation());
            signals.orientations.push(s.orientation);
            signals.yaw.push(s.yaw);
            signals.speed.push(s.speed);
            signals.map.push(s.map);
        }
        signals
    }

    /// Extract columns over a whole track.
    #[must_use]
    pub fn from_track(track: &Track) -> Self {
        Self::from_samples(track.kind(), track.samples())
    }

    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Scene frame index of each sample.
    #[must_use]
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    #[must_use]
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    #[must_use]
    pub fn orientations(&self) -> &[UnitQuaternion<f64>] {
        &self.orientations
    }

    #[must_use]
    pub fn yaw(&self) -> &[f64] {
        &self.yaw
    }

    #[must_use]
    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    #[must_use]
    pub fn map(&self) -> &[MapMembership] {
        &self.map
    }

    /// Planar positions.
    #[must_use]
    pub fn xy(&self) -> Vec<[f64; 2]> {
        self.positions.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Positions of this object in the body frame of `reference`, per index.
    #[must_use]
    pub fn positions_in(&self, reference: &Self) -> Vec<Vector3<f64>> {
        self.positions
            .iter()
            .zip(&reference.positions)
            .zip(&reference.orientations)
            .map(|((p, origin), q)| to_body_frame(p, origin, q))
            .collect()
    }

    /// Planar distance to `other`, per index.
    #[must_use]
    pub fn distances_to(&self, other: &Self) -> Vec<f64> {
        self.positions
            .iter()
            .zip(&other.positions)
            .map(|(a, b)| (a.x - b.x).hypot(a.y - b.y))
            .collect()
    }

    /// Absolute wrapped heading difference to `other` in degrees, per index.
    #[must_use]
    pub fn heading_gaps_deg(&self, other: &Self) -> Vec<f64> {
        self.yaw
            .iter()
            .zip(&other.yaw)
            .map(|(&a, &b)| heading_gap_deg(a, b))
            .collect()
    }
}

/// Two series restricted to their shared timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedPair {
    pub primary: Signals,
    pub secondary: Signals,
}

impl SyncedPair {
    /// Keep the samples of `primary` and `secondary` whose timestamps match exactly.
    ///
    /// Tracks without overlap produce an empty pair.
    #[must_use]
    pub fn new(primary: &Track, secondary: &Track) -> Self {
        let (a, b) = intersect_by_timestamp(primary.samples(), secondary.samples());
        Self {
            primary: Signals::from_samples(primary.kind(), a),
            secondary: Signals::from_samples(secondary.kind(), b),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Primary against secondary.
    #[must_use]
    pub const fn forward(&self) -> DetectorInput<'_> {
        DetectorInput {
            subject: &self.primary,
            other: Some(&self.secondary),
        }
    }

    /// Secondary against primary.
    #[must_use]
    pub const fn reversed(&self) -> DetectorInput<'_> {
        DetectorInput {
            subject: &self.secondary,
            other: Some(&self.primary),
        }
    }
}

/// Samples of `a` and `b` sharing a timestamp, in timestamp order.
///
/// Both inputs must be sorted by strictly increasing timestamp, which
/// [`Track`] guarantees.
#[must_use]
pub fn intersect_by_timestamp<'a, 'b>(
    a: &'a [KinematicSample],
    b: &'b [KinematicSample],
) -> (Vec<&'a KinematicSample>, Vec<&'b KinematicSample>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].timestamp.cmp(&b[j].timestamp) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                left.push(&a[i]);
                right.push(&b[j]);
                i += 1;
                j += 1;
            }
        }
    }
    (left, right)
}

/// Input to a detector: a subject series and an optional second series.
///
/// The second series is the other participant for pairwise detectors and
/// the distance reference for solo pedestrian detectors. When present it is
/// index-aligned with the subject.
#[derive(Debug, Clone, Copy)]
pub struct DetectorInput<'a> {
    subject: &'a Signals,
    other: Option<&'a Signals>,
}

impl<'a> DetectorInput<'a> {
    /// Single-series input.
    #[must_use]
    pub const fn solo(subject: &'a Signals) -> Self {
        Self {
            subject,
            other: None,
        }
    }

    /// Two-series input.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::LengthMismatch`] for series of different
    /// lengths and [`MiningError::UnsynchronizedPair`] at the first index
    /// whose timestamps differ.
    pub fn paired(subject: &'a Signals, other: &'a Signals) -> Result<Self> {
        if subject.len() != other.len() {
            return Err(MiningError::length_mismatch(subject.len(), other.len()));
        }
        if let Some(index) = subject
            .timestamps
            .iter()
            .zip(&other.timestamps)
            .position(|(a, b)| a != b)
        {
            return Err(MiningError::UnsynchronizedPair { index });
        }
        Ok(Self {
            subject,
            other: Some(other),
        })
    }

    #[must_use]
    pub const fn subject(&self) -> &'a Signals {
        self.subject
    }

    #[must_use]
    pub const fn other(&self) -> Option<&'a Signals> {
        self.other
    }
}
