//! Trajectory data model.
//!
//! A [`Scene`] owns one ego [`Track`] and any number of agent tracks. Each
//! track owns an ordered series of immutable [`KinematicSample`]s addressed
//! by scene frame index, so events can refer to samples by
//! `(ObjectId, frame)` without holding references into the scene.

use std::collections::HashSet;
use std::fmt;

use nalgebra::{UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MiningError, Result};
use crate::math::frame::quaternion_yaw;

/// Kind of traffic participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActorKind {
    Vehicle,
    Human,
}

impl ActorKind {
    #[must_use]
    pub const fn is_vehicle(self) -> bool {
        matches!(self, Self::Vehicle)
    }

    #[must_use]
    pub const fn is_human(self) -> bool {
        matches!(self, Self::Human)
    }
}

/// Map-region membership of one sample.
///
/// Each field holds the id of the region the object is on, or
/// [`MapMembership::NONE`] (`-1`) when it is on no region of that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapMembership {
    pub lane: i64,
    pub ped_crossing: i64,
    pub drivable_area: i64,
    pub walkway: i64,
}

impl MapMembership {
    /// Sentinel for "not on a region of this type".
    pub const NONE: i64 = -1;

    /// Membership with no regions at all.
    pub const EMPTY: Self = Self {
        lane: Self::NONE,
        ped_crossing: Self::NONE,
        drivable_area: Self::NONE,
        walkway: Self::NONE,
    };

    const fn resolve(id: i64) -> Option<i64> {
        if id == Self::NONE {
            None
        } else {
            Some(id)
        }
    }

    #[must_use]
    pub const fn lane_id(&self) -> Option<i64> {
        Self::resolve(self.lane)
    }

    #[must_use]
    pub const fn on_ped_crossing(&self) -> bool {
        self.ped_crossing != Self::NONE
    }

    #[must_use]
    pub const fn on_drivable_area(&self) -> bool {
        self.drivable_area != Self::NONE
    }

    #[must_use]
    pub const fn on_walkway(&self) -> bool {
        self.walkway != Self::NONE
    }

    #[must_use]
    pub const fn with_lane(mut self, id: i64) -> Self {
        self.lane = id;
        self
    }

    #[must_use]
    pub const fn with_ped_crossing(mut self, id: i64) -> Self {
        self.ped_crossing = id;
        self
    }

    #[must_use]
    pub const fn with_drivable_area(mut self, id: i64) -> Self {
        self.drivable_area = id;
        self
    }

    #[must_use]
    pub const fn with_walkway(mut self, id: i64) -> Self {
        self.walkway = id;
        self
    }
}

impl Default for MapMembership {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One frame's observation of one object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KinematicSample {
    /// Scene frame index this sample belongs to.
    pub frame: usize,

    /// Monotonic timestamp (microseconds in the reference dataset).
    pub timestamp: i64,

    /// Global position [x, y, z] in meters.
    pub position: [f64; 3],

    /// Global orientation.
    pub orientation: UnitQuaternion<f64>,

    /// Yaw projected onto the ground plane, radians in (-π, π].
    pub yaw: f64,

    /// Scalar speed in m/s.
    pub speed: f64,

    pub kind: ActorKind,

    pub map: MapMembership,
}

impl KinematicSample {
    /// Create a sample, deriving yaw from the orientation.
    #[must_use]
    pub fn new(
        frame: usize,
        timestamp: i64,
        position: [f64; 3],
        orientation: UnitQuaternion<f64>,
        speed: f64,
        kind: ActorKind,
    ) -> Self {
        Self {
            frame,
            timestamp,
            position,
            yaw: quaternion_yaw(&orientation),
            orientation,
            speed,
            kind,
            map: MapMembership::EMPTY,
        }
    }

    /// Create a planar sample from (x, y) and a heading.
    ///
    /// The orientation is a pure rotation about +z by `yaw`.
    #[must_use]
    pub fn planar(
        frame: usize,
        timestamp: i64,
        xy: [f64; 2],
        yaw: f64,
        speed: f64,
        kind: ActorKind,
    ) -> Self {
        let orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw);
        Self::new(frame, timestamp, [xy[0], xy[1], 0.0], orientation, speed, kind)
    }

    /// Create a sample from raw `(qw, qx, qy, qz)` quaternion components.
    ///
    /// # Errors
    ///
    /// Returns an error if the quaternion has (near) zero norm.
    pub fn from_wxyz(
        frame: usize,
        timestamp: i64,
        position: [f64; 3],
        wxyz: [f64; 4],
        speed: f64,
        kind: ActorKind,
    ) -> Result<Self> {
        let q = nalgebra::Quaternion::new(wxyz[0], wxyz[1], wxyz[2], wxyz[3]);
        let orientation = UnitQuaternion::try_new(q, 1e-9).ok_or_else(|| {
            MiningError::invalid_input(format!("degenerate orientation at frame {frame}"))
        })?;
        Ok(Self::new(frame, timestamp, position, orientation, speed, kind))
    }

    /// Replace the map-region membership.
    #[must_use]
    pub const fn with_map(mut self, map: MapMembership) -> Self {
        self.map = map;
        self
    }

    /// Override the derived yaw with a provider-supplied value.
    #[must_use]
    pub const fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Replace the speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub const fn xy(&self) -> [f64; 2] {
        [self.position[0], self.position[1]]
    }

    #[must_use]
    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.position[0], self.position[1], self.position[2])
    }

    /// Planar distance to another sample.
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.position[0] - other.position[0]).hypot(self.position[1] - other.position[1])
    }
}

/// Identity of a participant within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectId {
    Ego,
    Agent(u32),
}

impl ObjectId {
    #[must_use]
    pub const fn is_ego(self) -> bool {
        matches!(self, Self::Ego)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ego => f.write_str("ego"),
            Self::Agent(id) => write!(f, "agent#{id}"),
        }
    }
}

/// Ordered samples of one persistent participant.
///
/// Immutable once constructed; timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTrack"))]
pub struct Track {
    id: ObjectId,
    kind: ActorKind,
    samples: Vec<KinematicSample>,
}

/// Unchecked wire form of a [`Track`]; deserialization goes through [`Track::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTrack {
    id: ObjectId,
    kind: ActorKind,
    samples: Vec<KinematicSample>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTrack> for Track {
    type Error = MiningError;

    fn try_from(raw: RawTrack) -> Result<Self> {
        Self::new(raw.id, raw.kind, raw.samples)
    }
}

impl Track {
    /// Create a validated track.
    ///
    /// # Errors
    ///
    /// Returns an error if timestamps are not strictly increasing, if a
    /// sample's kind disagrees with the track kind, or if an ego track is
    /// not a vehicle.
    pub fn new(id: ObjectId, kind: ActorKind, samples: Vec<KinematicSample>) -> Result<Self> {
        if id.is_ego() && !kind.is_vehicle() {
            return Err(MiningError::invalid_input("ego track must be a vehicle"));
        }
        if let Some(i) = samples.iter().position(|s| s.kind != kind) {
            return Err(MiningError::invalid_input(format!(
                "sample {i} of {id} has kind {:?}, track kind is {kind:?}",
                samples[i].kind
            )));
        }
        if let Some(i) = samples
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(MiningError::non_monotonic(i + 1));
        }
        if let Some(i) = samples.windows(2).position(|w| w[1].frame <= w[0].frame) {
            return Err(MiningError::invalid_input(format!(
                "frame indices of {id} must increase, violated at sample {}",
                i + 1
            )));
        }
        Ok(Self { id, kind, samples })
    }

    /// Create the ego track.
    ///
    /// # Errors
    ///
    /// See [`Track::new`].
    pub fn ego(samples: Vec<KinematicSample>) -> Result<Self> {
        Self::new(ObjectId::Ego, ActorKind::Vehicle, samples)
    }

    /// Create an agent track.
    ///
    /// # Errors
    ///
    /// See [`Track::new`].
    pub fn agent(id: u32, kind: ActorKind, samples: Vec<KinematicSample>) -> Result<Self> {
        Self::new(ObjectId::Agent(id), kind, samples)
    }

    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        self.kind
    }

    #[must_use]
    pub fn samples(&self) -> &[KinematicSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample recorded at a scene frame, if any.
    #[must_use]
    pub fn at_frame(&self, frame: usize) -> Option<&KinematicSample> {
        self.samples
            .binary_search_by_key(&frame, |s| s.frame)
            .ok()
            .map(|i| &self.samples[i])
    }
}

/// A driving scene: the ego track plus every tracked agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawScene"))]
pub struct Scene {
    id: String,
    ego: Track,
    agents: Vec<Track>,
}

/// Unchecked wire form of a [`Scene`]; deserialization goes through [`Scene::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawScene {
    id: String,
    ego: Track,
    agents: Vec<Track>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawScene> for Scene {
    type Error = MiningError;

    fn try_from(raw: RawScene) -> Result<Self> {
        Self::new(raw.id, raw.ego, raw.agents)
    }
}

impl Scene {
    /// Create a validated scene.
    ///
    /// # Errors
    ///
    /// Returns an error if `ego` is not the ego track, or if agent ids are
    /// duplicated or claim to be the ego.
    pub fn new(id: impl Into<String>, ego: Track, agents: Vec<Track>) -> Result<Self> {
        if !ego.id().is_ego() {
            return Err(MiningError::invalid_input("scene ego track has an agent id"));
        }
        let mut seen = HashSet::with_capacity(agents.len());
        for track in &agents {
            if track.id().is_ego() || !seen.insert(track.id()) {
                return Err(MiningError::invalid_input(format!(
                    "duplicate or invalid agent id {}",
                    track.id()
                )));
            }
        }
        Ok(Self {
            id: id.into(),
            ego,
            agents,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn ego(&self) -> &Track {
        &self.ego
    }

    #[must_use]
    pub fn agents(&self) -> &[Track] {
        &self.agents
    }

    /// Look up any participant track.
    #[must_use]
    pub fn track(&self, id: ObjectId) -> Option<&Track> {
        match id {
            ObjectId::Ego => Some(&self.ego),
            ObjectId::Agent(_) => self.agents.iter().find(|t| t.id() == id),
        }
    }
}
