//! Configuration for maneuver mining.
//!
//! This module provides the [`MiningConfig`] struct which centralizes every
//! detector threshold, the detection window, the distractor count and the
//! maneuver list mined per actor role.
//!
//! # Example
//!
//! ```
//! use maneuver_mining::MiningConfig;
//!
//! // nuScenes keyframes: 2 Hz, 6-frame window
//! let config = MiningConfig::nuscenes();
//! assert_eq!(config.window, 6);
//!
//! // Same 3 s window at 10 Hz
//! let dense = MiningConfig::for_sample_rate(10.0).unwrap();
//! assert_eq!(dense.window, 30);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MiningError, Result};
use crate::maneuver::{ActorRole, ManeuverType};

/// Default detection window in frames.
pub const DEFAULT_WINDOW: usize = 6;

/// Default number of distractors each event must be able to offer.
pub const DEFAULT_DISTRACTOR_COUNT: usize = 4;

/// Detection window duration in seconds used by [`MiningConfig::for_sample_rate`].
pub const WINDOW_SECONDS: f64 = 3.0;

/// Accelerate / Decelerate / Stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LongitudinalThresholds {
    /// Every frame-to-frame speed step must exceed this (m/s), signed by direction.
    pub min_step: f64,
    /// End-to-start speed change over the window (m/s).
    pub min_speed_change: f64,
    /// Decelerate: end speed stays above this (still driving).
    pub min_cruise_speed: f64,
    /// Stop: end speed below this.
    pub max_stop_speed: f64,
}

impl Default for LongitudinalThresholds {
    fn default() -> Self {
        Self {
            min_step: 0.1,
            min_speed_change: 3.0,
            min_cruise_speed: 1.5,
            max_stop_speed: 0.55,
        }
    }
}

/// Left / right turn and U-turn, as wrapped yaw change across the window (rad).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnThresholds {
    pub turn_yaw: f64,
    pub u_turn_yaw: f64,
}

impl Default for TurnThresholds {
    fn default() -> Self {
        Self {
            turn_yaw: 0.8,
            u_turn_yaw: 1.7,
        }
    }
}

/// Reverse driving.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReverseThresholds {
    /// Reported yaw vs. direction of travel (rad).
    pub heading_mismatch: f64,
    /// Mean speed over the window (m/s).
    pub min_mean_speed: f64,
}

impl Default for ReverseThresholds {
    fn default() -> Self {
        Self {
            heading_mismatch: 1.0,
            min_mean_speed: 1.5,
        }
    }
}

/// Overtake / pass. One instance per actor kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractionThresholds {
    /// Overtake: planar distance bound at every frame (m).
    pub max_overtake_distance: f64,
    /// Pass: maximum planar distance over the window (m).
    pub max_pass_distance: f64,
    /// Moving floor; for pass, the other's ceiling (m/s).
    pub min_speed: f64,
    /// Heading alignment (degrees).
    pub max_heading_gap_deg: f64,
}

impl InteractionThresholds {
    /// Thresholds for vehicle pairs.
    #[must_use]
    pub const fn vehicle() -> Self {
        Self {
            max_overtake_distance: 5.0,
            max_pass_distance: 10.0,
            min_speed: 2.0,
            max_heading_gap_deg: 20.0,
        }
    }

    /// Thresholds for pedestrian pairs.
    #[must_use]
    pub const fn pedestrian() -> Self {
        Self {
            max_overtake_distance: 1.5,
            max_pass_distance: 2.0,
            min_speed: 0.5,
            max_heading_gap_deg: 20.0,
        }
    }
}

/// Follow / lead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowThresholds {
    pub max_lateral_offset: f64,
    pub max_distance: f64,
    pub max_speed_gap: f64,
    pub min_speed: f64,
}

impl Default for FollowThresholds {
    fn default() -> Self {
        Self {
            max_lateral_offset: 2.0,
            max_distance: 20.0,
            max_speed_gap: 3.0,
            min_speed: 2.0,
        }
    }
}

/// Vehicle waiting for a crossing pedestrian.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaitThresholds {
    pub max_mean_speed: f64,
    pub max_distance: f64,
}

impl Default for WaitThresholds {
    fn default() -> Self {
        Self {
            max_mean_speed: 0.55,
            max_distance: 10.0,
        }
    }
}

/// Solo pedestrian behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PedestrianThresholds {
    /// Cross / jaywalk: walking rather than standing.
    pub min_crossing_speed: f64,
    /// Cross / jaywalk / run: distance to the reference vehicle.
    pub max_reference_distance: f64,
    pub min_run_speed: f64,
    pub min_walk_speed: f64,
    pub max_walk_speed: f64,
    pub max_stand_speed: f64,
}

impl Default for PedestrianThresholds {
    fn default() -> Self {
        Self {
            min_crossing_speed: 0.5,
            max_reference_distance: 40.0,
            min_run_speed: 2.5,
            min_walk_speed: 1.1,
            max_walk_speed: 1.6,
            max_stand_speed: 0.1,
        }
    }
}

/// Pedestrians walking together or towards each other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupWalkThresholds {
    pub max_alongside_distance: f64,
    pub max_opposite_distance: f64,
    pub min_speed: f64,
    pub max_alongside_heading_deg: f64,
    pub min_opposite_heading_deg: f64,
}

impl Default for GroupWalkThresholds {
    fn default() -> Self {
        Self {
            max_alongside_distance: 1.0,
            max_opposite_distance: 5.0,
            min_speed: 1.1,
            max_alongside_heading_deg: 10.0,
            min_opposite_heading_deg: 150.0,
        }
    }
}

/// Stationary / moving relative placement between two vehicles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelativePositionThresholds {
    /// In front / behind: |lateral offset| bound (m).
    pub max_lateral_offset: f64,
    /// Left / right: |longitudinal offset| bound (m).
    pub max_longitudinal_offset: f64,
    /// Offset along the selecting axis must exceed this (m).
    pub min_axis_offset: f64,
    pub max_distance: f64,
    pub max_stationary_speed: f64,
    pub min_moving_speed: f64,
    pub max_heading_gap_deg: f64,
}

impl Default for RelativePositionThresholds {
    fn default() -> Self {
        Self {
            max_lateral_offset: 2.0,
            max_longitudinal_offset: 1.0,
            min_axis_offset: 1.0,
            max_distance: 5.0,
            max_stationary_speed: 0.3,
            min_moving_speed: 1.5,
            max_heading_gap_deg: 15.0,
        }
    }
}

/// Median-speed bands used to prune RUN / WALK / STAND distractors.
///
/// Above `run_speed` RUN is dropped, below `stand_speed` STAND is dropped,
/// in between WALK is dropped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefinementThresholds {
    pub run_speed: f64,
    pub stand_speed: f64,
}

impl Default for RefinementThresholds {
    fn default() -> Self {
        Self {
            run_speed: 1.66,
            stand_speed: 0.5,
        }
    }
}

/// Maneuvers mined for each actor role, in mining order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleManeuvers {
    pub ego: Vec<ManeuverType>,
    pub ego_agent: Vec<ManeuverType>,
    pub agent: Vec<ManeuverType>,
    pub agent_agent: Vec<ManeuverType>,
    pub agent_ego: Vec<ManeuverType>,
}

impl RoleManeuvers {
    /// Maneuvers configured for `role`.
    #[must_use]
    pub fn for_role(&self, role: ActorRole) -> &[ManeuverType] {
        match role {
            ActorRole::Ego => &self.ego,
            ActorRole::EgoAgent => &self.ego_agent,
            ActorRole::Agent => &self.agent,
            ActorRole::AgentAgent => &self.agent_agent,
            ActorRole::AgentEgo => &self.agent_ego,
        }
    }

    /// Every maneuver each role can host.
    #[must_use]
    pub fn exhaustive() -> Self {
        let hosted = |role: ActorRole| {
            ManeuverType::ALL
                .iter()
                .copied()
                .filter(|&m| role.hosts(m))
                .collect()
        };
        Self {
            ego: hosted(ActorRole::Ego),
            ego_agent: hosted(ActorRole::EgoAgent),
            agent: hosted(ActorRole::Agent),
            agent_agent: hosted(ActorRole::AgentAgent),
            agent_ego: hosted(ActorRole::AgentEgo),
        }
    }
}

impl Default for RoleManeuvers {
    fn default() -> Self {
        use ManeuverType as M;
        Self {
            ego: vec![
                M::Accelerate,
                M::Decelerate,
                M::Stop,
                M::LeftTurn,
                M::RightTurn,
                M::UTurn,
                M::Reverse,
                M::LaneChange,
            ],
            ego_agent: vec![
                M::OvertakeAgent,
                M::WaitPedCross,
                M::FollowAgent,
                M::LeadAgent,
                M::PassAgent,
                M::StationaryBehindAgent,
                M::StationaryInFrontOfAgent,
                M::StationaryLeftOfAgent,
                M::StationaryRightOfAgent,
                M::MovingRightOfAgent,
                M::MovingLeftOfAgent,
            ],
            agent: vec![
                M::Accelerate,
                M::Stop,
                M::LeftTurn,
                M::RightTurn,
                M::UTurn,
                M::Reverse,
                M::LaneChange,
                M::Cross,
                M::Jaywalk,
                M::Run,
                M::Stand,
                M::Walk,
            ],
            agent_agent: vec![
                M::OvertakeAgent,
                M::WaitPedCross,
                M::FollowAgent,
                M::LeadAgent,
                M::WalkAlongside,
                M::WalkOpposite,
                M::PassAgent,
                M::StationaryBehindAgent,
                M::StationaryInFrontOfAgent,
                M::StationaryLeftOfAgent,
                M::StationaryRightOfAgent,
                M::MovingRightOfAgent,
                M::MovingLeftOfAgent,
            ],
            agent_ego: vec![
                M::OvertakeEgo,
                M::PassEgo,
                M::FollowEgo,
                M::LeadEgo,
                M::StationaryBehindEgo,
                M::StationaryInFrontOfEgo,
                M::StationaryLeftOfEgo,
                M::StationaryRightOfEgo,
                M::MovingRightOfEgo,
                M::MovingLeftOfEgo,
            ],
        }
    }
}

/// Configuration for maneuver mining.
///
/// Defaults reproduce the reference thresholds at the 2 Hz keyframe rate.
/// Speeds are m/s, distances meters, yaw thresholds radians unless the
/// field name ends in `_deg`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MiningConfig {
    /// Detection window in frames. Every detection spans exactly this many samples.
    pub window: usize,

    /// Minimum negative-set size required before an event is emitted.
    pub distractor_count: usize,

    pub longitudinal: LongitudinalThresholds,
    pub turn: TurnThresholds,
    pub reverse: ReverseThresholds,
    pub vehicle_interaction: InteractionThresholds,
    pub pedestrian_interaction: InteractionThresholds,
    pub follow: FollowThresholds,
    pub wait: WaitThresholds,
    pub pedestrian: PedestrianThresholds,
    pub group_walk: GroupWalkThresholds,
    pub relative_position: RelativePositionThresholds,
    pub refinement: RefinementThresholds,

    /// Maneuvers mined per actor role.
    pub roles: RoleManeuvers,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            distractor_count: DEFAULT_DISTRACTOR_COUNT,
            longitudinal: LongitudinalThresholds::default(),
            turn: TurnThresholds::default(),
            reverse: ReverseThresholds::default(),
            vehicle_interaction: InteractionThresholds::vehicle(),
            pedestrian_interaction: InteractionThresholds::pedestrian(),
            follow: FollowThresholds::default(),
            wait: WaitThresholds::default(),
            pedestrian: PedestrianThresholds::default(),
            group_walk: GroupWalkThresholds::default(),
            relative_position: RelativePositionThresholds::default(),
            refinement: RefinementThresholds::default(),
            roles: RoleManeuvers::default(),
        }
    }
}

impl MiningConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range or a role
    /// lists a maneuver it cannot host.
    pub fn validate(&self) -> Result<()> {
        if self.window < 2 {
            return Err(MiningError::invalid_config("window must be at least 2 frames"));
        }
        if self.distractor_count == 0 {
            return Err(MiningError::invalid_config("distractor_count must be at least 1"));
        }

        let non_negative = [
            ("longitudinal.min_step", self.longitudinal.min_step),
            ("longitudinal.min_speed_change", self.longitudinal.min_speed_change),
            ("longitudinal.min_cruise_speed", self.longitudinal.min_cruise_speed),
            ("longitudinal.max_stop_speed", self.longitudinal.max_stop_speed),
            ("turn.turn_yaw", self.turn.turn_yaw),
            ("turn.u_turn_yaw", self.turn.u_turn_yaw),
            ("reverse.heading_mismatch", self.reverse.heading_mismatch),
            ("reverse.min_mean_speed", self.reverse.min_mean_speed),
            ("vehicle_interaction.min_speed", self.vehicle_interaction.min_speed),
            ("pedestrian_interaction.min_speed", self.pedestrian_interaction.min_speed),
            ("follow.min_speed", self.follow.min_speed),
            ("wait.max_mean_speed", self.wait.max_mean_speed),
            ("pedestrian.min_crossing_speed", self.pedestrian.min_crossing_speed),
            ("pedestrian.min_run_speed", self.pedestrian.min_run_speed),
            ("pedestrian.min_walk_speed", self.pedestrian.min_walk_speed),
            ("pedestrian.max_stand_speed", self.pedestrian.max_stand_speed),
            ("group_walk.min_speed", self.group_walk.min_speed),
            ("relative_position.max_stationary_speed", self.relative_position.max_stationary_speed),
            ("relative_position.min_moving_speed", self.relative_position.min_moving_speed),
            ("refinement.stand_speed", self.refinement.stand_speed),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(MiningError::invalid_config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.pedestrian.min_walk_speed >= self.pedestrian.max_walk_speed {
            return Err(MiningError::invalid_config(
                "pedestrian walk band is empty: min_walk_speed must be below max_walk_speed",
            ));
        }
        if self.refinement.stand_speed >= self.refinement.run_speed {
            return Err(MiningError::invalid_config(
                "refinement.stand_speed must be below refinement.run_speed",
            ));
        }
        if self.group_walk.max_alongside_heading_deg >= self.group_walk.min_opposite_heading_deg {
            return Err(MiningError::invalid_config(
                "group walk heading bands overlap",
            ));
        }

        for role in ActorRole::ALL {
            for &maneuver in self.roles.for_role(role) {
                if !role.hosts(maneuver) {
                    return Err(MiningError::invalid_config(format!(
                        "role {role} cannot host {maneuver}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Preset for nuScenes keyframes (2 Hz, 6-frame window).
    #[must_use]
    pub fn nuscenes() -> Self {
        Self::default()
    }

    /// Preset keeping a 3 s window at an arbitrary sample rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `hz` is not a positive finite number.
    pub fn for_sample_rate(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(MiningError::invalid_config(format!(
                "sample rate must be positive, got {hz}"
            )));
        }
        let window = ((WINDOW_SECONDS * hz).round() as usize).max(2);
        Ok(Self {
            window,
            ..Self::default()
        })
    }

    /// Set the detection window.
    #[must_use]
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the required distractor count.
    #[must_use]
    pub const fn with_distractor_count(mut self, count: usize) -> Self {
        self.distractor_count = count;
        self
    }

    /// Replace the per-role maneuver lists.
    #[must_use]
    pub fn with_roles(mut self, roles: RoleManeuvers) -> Self {
        self.roles = roles;
        self
    }

    /// Overtake / pass thresholds for a pair of the given kind.
    #[must_use]
    pub const fn interaction_for(&self, human: bool) -> &InteractionThresholds {
        if human {
            &self.pedestrian_interaction
        } else {
            &self.vehicle_interaction
        }
    }
}
