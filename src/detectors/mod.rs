//! Windowed maneuver detectors.
//!
//! Every detector evaluates a predicate on each window `[i, i + W)` of its
//! input, reduces the resulting anchor mask to one anchor per island and
//! yields `(anchor, anchor + W)` spans in ascending order.
//!
//! Unmet preconditions (wrong actor kind, series shorter than `W`) yield an
//! empty [`Detections`], never an error.
//!
//! Families:
//! - [`longitudinal`]: accelerate, decelerate, stop
//! - [`lateral`]: lane change, turns, U-turn, reverse
//! - [`interaction`]: overtake, pass, follow, lead, wait for crossing pedestrian
//! - [`pedestrian`]: cross, jaywalk, run, walk, stand, walk alongside / opposite
//! - [`relative_position`]: stationary / moving placement next to another vehicle

pub mod interaction;
pub mod lateral;
pub mod longitudinal;
pub mod pedestrian;
pub mod relative_position;

use std::iter::FusedIterator;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::MiningConfig;
use crate::error::{MiningError, Result};
use crate::islands::island_anchors;
use crate::maneuver::{ActorRole, ManeuverType};
use crate::sample::ActorKind;
use crate::signals::{DetectorInput, Signals};

pub use relative_position::{Motion, Placement};

/// Half-open index span `[start, end)` into a detector's input series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Lazy sequence of detected spans, ascending by start.
///
/// Consuming it is one-shot; every span has length equal to the window.
#[derive(Debug, Clone)]
pub struct Detections {
    anchors: std::vec::IntoIter<usize>,
    width: usize,
}

impl Detections {
    /// No detections.
    #[must_use]
    pub fn empty(width: usize) -> Self {
        Self {
            anchors: Vec::new().into_iter(),
            width,
        }
    }

    /// Reduce a per-anchor mask and wrap its island anchors.
    #[must_use]
    pub fn from_mask(mask: &[bool], width: usize) -> Self {
        Self {
            anchors: island_anchors(mask).into_iter(),
            width,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

impl Iterator for Detections {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        self.anchors.next().map(|start| Span {
            start,
            end: start + self.width,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.anchors.size_hint()
    }
}

impl ExactSizeIterator for Detections {}
impl FusedIterator for Detections {}

/// Detector selection. `*_AGENT` and `*_EGO` variants of a maneuver share a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detector {
    Accelerate,
    Decelerate,
    Stop,
    LaneChange,
    LeftTurn,
    RightTurn,
    UTurn,
    Reverse,
    Overtake,
    Pass,
    Follow,
    Lead,
    WaitPedCross,
    Cross,
    Jaywalk,
    Run,
    Walk,
    Stand,
    WalkAlongside,
    WalkOpposite,
    RelativePosition(Placement, Motion),
}

impl Detector {
    /// Detector for a maneuver type.
    #[must_use]
    pub const fn for_maneuver(maneuver: ManeuverType) -> Self {
        use ManeuverType as M;
        match maneuver {
            M::Accelerate => Self::Accelerate,
            M::Decelerate => Self::Decelerate,
            M::Stop => Self::Stop,
            M::LaneChange => Self::LaneChange,
            M::LeftTurn => Self::LeftTurn,
            M::RightTurn => Self::RightTurn,
            M::UTurn => Self::UTurn,
            M::Reverse => Self::Reverse,
            M::OvertakeAgent | M::OvertakeEgo => Self::Overtake,
            M::PassAgent | M::PassEgo => Self::Pass,
            M::FollowAgent | M::FollowEgo => Self::Follow,
            M::LeadAgent | M::LeadEgo => Self::Lead,
            M::WaitPedCross => Self::WaitPedCross,
            M::Cross => Self::Cross,
            M::Jaywalk => Self::Jaywalk,
            M::Run => Self::Run,
            M::Walk => Self::Walk,
            M::Stand => Self::Stand,
            M::WalkAlongside => Self::WalkAlongside,
            M::WalkOpposite => Self::WalkOpposite,
            M::StationaryBehindAgent | M::StationaryBehindEgo => {
                Self::RelativePosition(Placement::Behind, Motion::Stationary)
            }
            M::StationaryInFrontOfAgent | M::StationaryInFrontOfEgo => {
                Self::RelativePosition(Placement::InFront, Motion::Stationary)
            }
            M::StationaryLeftOfAgent | M::StationaryLeftOfEgo => {
                Self::RelativePosition(Placement::LeftOf, Motion::Stationary)
            }
            M::StationaryRightOfAgent | M::StationaryRightOfEgo => {
                Self::RelativePosition(Placement::RightOf, Motion::Stationary)
            }
            M::MovingLeftOfAgent | M::MovingLeftOfEgo => {
                Self::RelativePosition(Placement::LeftOf, Motion::Moving)
            }
            M::MovingRightOfAgent | M::MovingRightOfEgo => {
                Self::RelativePosition(Placement::RightOf, Motion::Moving)
            }
        }
    }

    /// Detector for a maneuver mined in `role`.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::UnsupportedCombination`] when the role has no
    /// detector for the maneuver.
    pub fn resolve(maneuver: ManeuverType, role: ActorRole) -> Result<Self> {
        role.ensure_hosts(maneuver)?;
        Ok(Self::for_maneuver(maneuver))
    }

    /// Whether the detector needs a second participant.
    #[must_use]
    pub const fn is_pairwise(self) -> bool {
        matches!(
            self,
            Self::Overtake
                | Self::Pass
                | Self::Follow
                | Self::Lead
                | Self::WaitPedCross
                | Self::WalkAlongside
                | Self::WalkOpposite
                | Self::RelativePosition(..)
        )
    }

    /// Whether the detector applies to these actor kinds.
    #[must_use]
    pub fn accepts(self, subject: ActorKind, other: Option<ActorKind>) -> bool {
        let other_is = |f: fn(ActorKind) -> bool| other.is_some_and(f);
        match self {
            Self::Accelerate
            | Self::Decelerate
            | Self::Stop
            | Self::LaneChange
            | Self::LeftTurn
            | Self::RightTurn
            | Self::UTurn
            | Self::Reverse => subject.is_vehicle(),
            Self::Cross | Self::Jaywalk | Self::Run | Self::Walk | Self::Stand => {
                subject.is_human()
            }
            Self::Overtake | Self::Pass => other == Some(subject),
            Self::Follow | Self::Lead | Self::RelativePosition(..) => {
                subject.is_vehicle() && other_is(ActorKind::is_vehicle)
            }
            Self::WaitPedCross => subject.is_vehicle() && other_is(ActorKind::is_human),
            Self::WalkAlongside | Self::WalkOpposite => {
                subject.is_human() && other_is(ActorKind::is_human)
            }
        }
    }

    /// Run the detector.
    ///
    /// For solo pedestrian detectors the second series, if any, is the
    /// distance reference.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::InvalidInput`] when a pairwise detector gets a
    /// single series.
    pub fn detect(self, input: &DetectorInput<'_>, config: &MiningConfig) -> Result<Detections> {
        let width = config.window;
        let subject = input.subject();
        let other = input.other();

        if self.is_pairwise() && other.is_none() {
            return Err(MiningError::invalid_input(format!(
                "{self:?} detector requires a second participant"
            )));
        }
        if !self.accepts(subject.kind(), other.map(Signals::kind)) {
            trace!(detector = ?self, kind = ?subject.kind(), "actor kind precondition not met");
            return Ok(Detections::empty(width));
        }
        if subject.len() < width {
            trace!(detector = ?self, len = subject.len(), width, "series shorter than window");
            return Ok(Detections::empty(width));
        }

        let mask = self.mask(subject, other, config);
        Ok(Detections::from_mask(&mask, width))
    }

    fn mask(self, subject: &Signals, other: Option<&Signals>, config: &MiningConfig) -> Vec<bool> {
        let w = config.window;
        let Some(o) = other else {
            return self.solo_mask(subject, None, config);
        };
        let passing = config.interaction_for(subject.kind().is_human());
        match self {
            Self::Overtake => interaction::overtake(subject, o, passing, w),
            Self::Pass => interaction::pass(subject, o, passing, w),
            Self::Follow => interaction::follow(subject, o, &config.follow, w),
            Self::Lead => interaction::lead(subject, o, &config.follow, w),
            Self::WaitPedCross => interaction::wait_ped_cross(subject, o, &config.wait, w),
            Self::WalkAlongside => pedestrian::walk_alongside(subject, o, &config.group_walk, w),
            Self::WalkOpposite => pedestrian::walk_opposite(subject, o, &config.group_walk, w),
            Self::RelativePosition(placement, motion) => relative_position::placement(
                subject,
                o,
                placement,
                motion,
                &config.relative_position,
                w,
            ),
            _ => self.solo_mask(subject, Some(o), config),
        }
    }

    fn solo_mask(
        self,
        subject: &Signals,
        reference: Option<&Signals>,
        config: &MiningConfig,
    ) -> Vec<bool> {
        let w = config.window;
        match self {
            Self::Accelerate => longitudinal::accelerate(subject, &config.longitudinal, w),
            Self::Decelerate => longitudinal::decelerate(subject, &config.longitudinal, w),
            Self::Stop => longitudinal::stop(subject, &config.longitudinal, w),
            Self::LaneChange => lateral::lane_change(subject, w),
            Self::LeftTurn => lateral::left_turn(subject, &config.turn, w),
            Self::RightTurn => lateral::right_turn(subject, &config.turn, w),
            Self::UTurn => lateral::u_turn(subject, &config.turn, w),
            Self::Reverse => lateral::reverse(subject, &config.reverse, w),
            Self::Cross => pedestrian::cross(subject, reference, &config.pedestrian, w),
            Self::Jaywalk => pedestrian::jaywalk(subject, reference, &config.pedestrian, w),
            Self::Run => pedestrian::run(subject, reference, &config.pedestrian, w),
            Self::Walk => pedestrian::walk(subject, &config.pedestrian, w),
            Self::Stand => pedestrian::stand(subject, &config.pedestrian, w),
            // Pairwise detectors never reach here without a second series.
            _ => Vec::new(),
        }
    }
}
