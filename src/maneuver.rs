//! Maneuver taxonomy and actor roles.
//!
//! [`ManeuverType`] ids are part of the downstream contract and match the
//! integer encoding used by the labeling store. [`ActorRole`] is the closed
//! set of participant combinations a maneuver can be mined for.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MiningError, Result};

/// Labeled maneuver types.
///
/// Ids are grouped: `0..=7` single-vehicle motion, `20..=40` interactions
/// between two participants, `50..=56` pedestrian behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[repr(u8)]
pub enum ManeuverType {
    Accelerate = 0,
    Decelerate = 1,
    LaneChange = 2,
    LeftTurn = 3,
    RightTurn = 4,
    UTurn = 5,
    Reverse = 6,
    Stop = 7,

    OvertakeEgo = 20,
    FollowEgo = 21,
    LeadEgo = 22,
    OvertakeAgent = 23,
    WaitPedCross = 24,
    FollowAgent = 25,
    LeadAgent = 26,
    PassAgent = 27,
    PassEgo = 28,
    StationaryBehindAgent = 29,
    StationaryInFrontOfAgent = 30,
    StationaryBehindEgo = 31,
    StationaryInFrontOfEgo = 32,
    StationaryRightOfAgent = 33,
    StationaryLeftOfAgent = 34,
    StationaryRightOfEgo = 35,
    StationaryLeftOfEgo = 36,
    MovingRightOfAgent = 37,
    MovingLeftOfAgent = 38,
    MovingRightOfEgo = 39,
    MovingLeftOfEgo = 40,

    Cross = 50,
    Jaywalk = 51,
    Run = 52,
    Walk = 53,
    Stand = 54,
    WalkAlongside = 55,
    WalkOpposite = 56,
}

impl ManeuverType {
    /// Every maneuver type, in id order.
    pub const ALL: [Self; 36] = [
        Self::Accelerate,
        Self::Decelerate,
        Self::LaneChange,
        Self::LeftTurn,
        Self::RightTurn,
        Self::UTurn,
        Self::Reverse,
        Self::Stop,
        Self::OvertakeEgo,
        Self::FollowEgo,
        Self::LeadEgo,
        Self::OvertakeAgent,
        Self::WaitPedCross,
        Self::FollowAgent,
        Self::LeadAgent,
        Self::PassAgent,
        Self::PassEgo,
        Self::StationaryBehindAgent,
        Self::StationaryInFrontOfAgent,
        Self::StationaryBehindEgo,
        Self::StationaryInFrontOfEgo,
        Self::StationaryRightOfAgent,
        Self::StationaryLeftOfAgent,
        Self::StationaryRightOfEgo,
        Self::StationaryLeftOfEgo,
        Self::MovingRightOfAgent,
        Self::MovingLeftOfAgent,
        Self::MovingRightOfEgo,
        Self::MovingLeftOfEgo,
        Self::Cross,
        Self::Jaywalk,
        Self::Run,
        Self::Walk,
        Self::Stand,
        Self::WalkAlongside,
        Self::WalkOpposite,
    ];

    /// Stable integer id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a maneuver by its stable id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.id() == id)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accelerate => "ACCELERATE",
            Self::Decelerate => "DECELERATE",
            Self::LaneChange => "LANE_CHANGE",
            Self::LeftTurn => "LEFT_TURN",
            Self::RightTurn => "RIGHT_TURN",
            Self::UTurn => "U_TURN",
            Self::Reverse => "REVERSE",
            Self::Stop => "STOP",
            Self::OvertakeEgo => "OVERTAKE_EGO",
            Self::FollowEgo => "FOLLOW_EGO",
            Self::LeadEgo => "LEAD_EGO",
            Self::OvertakeAgent => "OVERTAKE_AGENT",
            Self::WaitPedCross => "WAIT_PED_CROSS",
            Self::FollowAgent => "FOLLOW_AGENT",
            Self::LeadAgent => "LEAD_AGENT",
            Self::PassAgent => "PASS_AGENT",
            Self::PassEgo => "PASS_EGO",
            Self::StationaryBehindAgent => "STATIONARY_BEHIND_AGENT",
            Self::StationaryInFrontOfAgent => "STATIONARY_IN_FRONT_OF_AGENT",
            Self::StationaryBehindEgo => "STATIONARY_BEHIND_EGO",
            Self::StationaryInFrontOfEgo => "STATIONARY_IN_FRONT_OF_EGO",
            Self::StationaryRightOfAgent => "STATIONARY_RIGHT_OF_AGENT",
            Self::StationaryLeftOfAgent => "STATIONARY_LEFT_OF_AGENT",
            Self::StationaryRightOfEgo => "STATIONARY_RIGHT_OF_EGO",
            Self::StationaryLeftOfEgo => "STATIONARY_LEFT_OF_EGO",
            Self::MovingRightOfAgent => "MOVING_RIGHT_OF_AGENT",
            Self::MovingLeftOfAgent => "MOVING_LEFT_OF_AGENT",
            Self::MovingRightOfEgo => "MOVING_RIGHT_OF_EGO",
            Self::MovingLeftOfEgo => "MOVING_LEFT_OF_EGO",
            Self::Cross => "CROSS",
            Self::Jaywalk => "JAYWALK",
            Self::Run => "RUN",
            Self::Walk => "WALK",
            Self::Stand => "STAND",
            Self::WalkAlongside => "WALK_ALONGSIDE",
            Self::WalkOpposite => "WALK_OPPOSITE",
        }
    }

    /// Whether the maneuver involves a second participant.
    #[must_use]
    pub const fn is_pairwise(self) -> bool {
        matches!(self.id(), 20..=40 | 55 | 56)
    }

    /// Whether the second participant of a pairwise maneuver is the ego vehicle.
    #[must_use]
    pub const fn targets_ego(self) -> bool {
        matches!(
            self,
            Self::OvertakeEgo
                | Self::FollowEgo
                | Self::LeadEgo
                | Self::PassEgo
                | Self::StationaryBehindEgo
                | Self::StationaryInFrontOfEgo
                | Self::StationaryRightOfEgo
                | Self::StationaryLeftOfEgo
                | Self::MovingRightOfEgo
                | Self::MovingLeftOfEgo
        )
    }

    /// Whether the maneuver describes pedestrian behavior.
    #[must_use]
    pub const fn is_pedestrian(self) -> bool {
        self.id() >= 50
    }
}

impl fmt::Display for ManeuverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManeuverType {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MiningError::invalid_input(format!("unknown maneuver type '{s}'")))
    }
}

/// Which participants a maneuver event describes.
///
/// The first named participant is the primary actor; the second (if any)
/// is the reference the maneuver is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActorRole {
    /// Ego vehicle alone.
    Ego,
    /// Ego vehicle relative to an agent.
    EgoAgent,
    /// One agent alone.
    Agent,
    /// One agent relative to another agent.
    AgentAgent,
    /// One agent relative to the ego vehicle.
    AgentEgo,
}

impl ActorRole {
    /// All roles in mining order.
    pub const ALL: [Self; 5] = [
        Self::Ego,
        Self::EgoAgent,
        Self::Agent,
        Self::AgentAgent,
        Self::AgentEgo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ego => "ego",
            Self::EgoAgent => "ego_agent",
            Self::Agent => "agent",
            Self::AgentAgent => "agent_agent",
            Self::AgentEgo => "agent_ego",
        }
    }

    /// Whether the primary participant is the ego vehicle.
    #[must_use]
    pub const fn primary_is_ego(self) -> bool {
        matches!(self, Self::Ego | Self::EgoAgent)
    }

    /// Whether the role involves a second participant.
    #[must_use]
    pub const fn is_pairwise(self) -> bool {
        matches!(self, Self::EgoAgent | Self::AgentAgent | Self::AgentEgo)
    }

    /// Whether a detector exists for `maneuver` in this role.
    #[must_use]
    pub const fn hosts(self, maneuver: ManeuverType) -> bool {
        use ManeuverType as M;
        match self {
            Self::Ego => matches!(maneuver.id(), 0..=7),
            Self::Agent => matches!(maneuver.id(), 0..=7 | 50..=54),
            Self::EgoAgent => matches!(
                maneuver,
                M::OvertakeAgent
                    | M::PassAgent
                    | M::FollowAgent
                    | M::LeadAgent
                    | M::WaitPedCross
                    | M::StationaryBehindAgent
                    | M::StationaryInFrontOfAgent
                    | M::StationaryRightOfAgent
                    | M::StationaryLeftOfAgent
                    | M::MovingRightOfAgent
                    | M::MovingLeftOfAgent
            ),
            Self::AgentAgent => matches!(
                maneuver,
                M::OvertakeAgent
                    | M::PassAgent
                    | M::FollowAgent
                    | M::LeadAgent
                    | M::WaitPedCross
                    | M::WalkAlongside
                    | M::WalkOpposite
                    | M::StationaryBehindAgent
                    | M::StationaryInFrontOfAgent
                    | M::StationaryRightOfAgent
                    | M::StationaryLeftOfAgent
                    | M::MovingRightOfAgent
                    | M::MovingLeftOfAgent
            ),
            Self::AgentEgo => maneuver.targets_ego(),
        }
    }

    /// Fail with [`MiningError::UnsupportedCombination`] unless this role hosts `maneuver`.
    ///
    /// # Errors
    ///
    /// Returns an error when no detector exists for the combination.
    pub fn ensure_hosts(self, maneuver: ManeuverType) -> Result<()> {
        if self.hosts(maneuver) {
            Ok(())
        } else {
            Err(MiningError::unsupported(maneuver, self))
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
