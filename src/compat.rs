//! Maneuver compatibility graph.
//!
//! For every maneuver type, an ordered list of types that are plausible but
//! observably wrong answers when the maneuver is the ground truth. Earlier
//! entries are closer confusers and are favored by the rank-weighted
//! sampler. Lists never contain their own key.
//!
//! Overtake / pass between two pedestrians use a separate table: their
//! standard negatives include the very pedestrian behaviors (walking,
//! running) an overtaking pedestrian also exhibits.

use crate::maneuver::ManeuverType::{
    self, Accelerate, Cross, Decelerate, FollowAgent, FollowEgo, Jaywalk, LaneChange, LeadAgent,
    LeadEgo, LeftTurn, MovingLeftOfAgent, MovingLeftOfEgo, MovingRightOfAgent, MovingRightOfEgo,
    OvertakeAgent, OvertakeEgo, PassAgent, PassEgo, Reverse, RightTurn, Run, Stand,
    StationaryBehindAgent, StationaryBehindEgo, StationaryInFrontOfAgent, StationaryInFrontOfEgo,
    StationaryLeftOfAgent, StationaryLeftOfEgo, StationaryRightOfAgent, StationaryRightOfEgo,
    Stop, UTurn, WaitPedCross, Walk, WalkAlongside, WalkOpposite,
};

/// Full negative list for `maneuver`.
#[must_use]
pub const fn negatives(maneuver: ManeuverType) -> &'static [ManeuverType] {
    match maneuver {
        Accelerate => &[LaneChange, LeftTurn, RightTurn, UTurn, Decelerate, Reverse, Stop],
        Decelerate => &[Stop, LeftTurn, RightTurn, UTurn, LaneChange, Reverse, Accelerate],
        Stop => &[Decelerate, LeftTurn, RightTurn, UTurn, LaneChange, Reverse, Accelerate],
        LaneChange => &[Decelerate, LeftTurn, RightTurn, UTurn, Stop, Reverse, Accelerate],
        LeftTurn => &[Decelerate, LaneChange, RightTurn, UTurn, Stop, Reverse, Accelerate],
        RightTurn => &[Decelerate, LaneChange, LeftTurn, UTurn, Stop, Reverse, Accelerate],
        UTurn => &[Decelerate, LaneChange, LeftTurn, RightTurn, Stop, Reverse, Accelerate],
        Reverse => &[Decelerate, LaneChange, LeftTurn, RightTurn, Stop, UTurn, Accelerate],

        WaitPedCross => &[
            PassAgent, OvertakeAgent, OvertakeEgo, FollowAgent, LeadAgent, FollowEgo, LeadEgo,
            Decelerate, LeftTurn, RightTurn, Stop, Reverse, UTurn,
        ],

        LeadEgo => &[
            StationaryInFrontOfEgo, FollowEgo, StationaryBehindEgo, PassEgo, OvertakeEgo,
            StationaryLeftOfEgo, StationaryRightOfEgo, MovingLeftOfEgo, MovingRightOfEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        FollowEgo => &[
            StationaryBehindEgo, LeadEgo, StationaryInFrontOfEgo, PassEgo, OvertakeEgo,
            StationaryLeftOfEgo, StationaryRightOfEgo, MovingLeftOfEgo, MovingRightOfEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        OvertakeEgo => &[
            PassEgo, MovingLeftOfEgo, MovingRightOfEgo, StationaryLeftOfEgo, StationaryRightOfEgo,
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, StationaryBehindEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        PassEgo => &[
            OvertakeEgo, MovingLeftOfEgo, MovingRightOfEgo, StationaryLeftOfEgo,
            StationaryRightOfEgo,
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, StationaryBehindEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        StationaryBehindEgo => &[
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, PassEgo, OvertakeEgo,
            StationaryLeftOfEgo, StationaryRightOfEgo, MovingLeftOfEgo, MovingRightOfEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        StationaryInFrontOfEgo => &[
            LeadEgo, FollowEgo, StationaryBehindEgo, PassEgo, OvertakeEgo,
            StationaryLeftOfEgo, StationaryRightOfEgo, MovingLeftOfEgo, MovingRightOfEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        StationaryRightOfEgo => &[
            OvertakeEgo, PassEgo, MovingRightOfEgo, MovingLeftOfEgo, StationaryLeftOfEgo,
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, StationaryBehindEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        StationaryLeftOfEgo => &[
            OvertakeEgo, PassEgo, MovingLeftOfEgo, MovingRightOfEgo, StationaryRightOfEgo,
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, StationaryBehindEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        MovingRightOfEgo => &[
            OvertakeEgo, PassEgo, StationaryRightOfEgo, MovingLeftOfEgo, StationaryLeftOfEgo,
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, StationaryBehindEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],
        MovingLeftOfEgo => &[
            OvertakeEgo, PassEgo, StationaryLeftOfEgo, MovingRightOfEgo, StationaryRightOfEgo,
            FollowEgo, LeadEgo, StationaryInFrontOfEgo, StationaryBehindEgo,
            Accelerate, Decelerate, LaneChange, LeftTurn, RightTurn, UTurn, Reverse, Stop,
        ],

        OvertakeAgent => &[
            PassAgent, MovingLeftOfAgent, MovingRightOfAgent, StationaryLeftOfAgent,
            StationaryRightOfAgent, LeadAgent, FollowAgent, StationaryInFrontOfAgent,
            StationaryBehindAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        PassAgent => &[
            OvertakeAgent, MovingLeftOfAgent, MovingRightOfAgent, StationaryLeftOfAgent,
            StationaryRightOfAgent, LeadAgent, FollowAgent, StationaryInFrontOfAgent,
            StationaryBehindAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        FollowAgent => &[
            StationaryBehindAgent, LeadAgent, StationaryInFrontOfAgent, PassAgent, OvertakeAgent,
            MovingLeftOfAgent, MovingRightOfAgent, StationaryLeftOfAgent, StationaryRightOfAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        LeadAgent => &[
            StationaryInFrontOfAgent, FollowAgent, StationaryBehindAgent, PassAgent, OvertakeAgent,
            MovingLeftOfAgent, MovingRightOfAgent, StationaryLeftOfAgent, StationaryRightOfAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        StationaryBehindAgent => &[
            FollowAgent, LeadAgent, StationaryInFrontOfAgent, PassAgent, OvertakeAgent,
            MovingLeftOfAgent, MovingRightOfAgent, StationaryLeftOfAgent, StationaryRightOfAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        StationaryInFrontOfAgent => &[
            LeadAgent, FollowAgent, StationaryBehindAgent, PassAgent, OvertakeAgent,
            MovingLeftOfAgent, MovingRightOfAgent, StationaryLeftOfAgent, StationaryRightOfAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        StationaryRightOfAgent => &[
            PassAgent, OvertakeAgent, MovingRightOfAgent, MovingLeftOfAgent, StationaryLeftOfAgent,
            LeadAgent, FollowAgent, StationaryInFrontOfAgent, StationaryBehindAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        StationaryLeftOfAgent => &[
            PassAgent, OvertakeAgent, MovingLeftOfAgent, MovingRightOfAgent, StationaryRightOfAgent,
            LeadAgent, FollowAgent, StationaryInFrontOfAgent, StationaryBehindAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        MovingRightOfAgent => &[
            PassAgent, OvertakeAgent, StationaryRightOfAgent, MovingLeftOfAgent,
            StationaryLeftOfAgent,
            LeadAgent, FollowAgent, StationaryInFrontOfAgent, StationaryBehindAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],
        MovingLeftOfAgent => &[
            PassAgent, OvertakeAgent, StationaryLeftOfAgent, MovingRightOfAgent,
            StationaryRightOfAgent,
            LeadAgent, FollowAgent, StationaryInFrontOfAgent, StationaryBehindAgent,
            WaitPedCross, Accelerate, Decelerate, Stop, LaneChange, UTurn, Reverse, LeftTurn,
            RightTurn,
        ],

        Cross => &[Jaywalk, Run, Walk, Stand, Accelerate, Decelerate, Stop],
        Jaywalk => &[Cross, Run, Walk, Stand, Accelerate, Decelerate, Stop],
        Run => &[Cross, Jaywalk, Walk, Stand, Accelerate, Decelerate, Stop],
        Stand => &[Cross, Jaywalk, Walk, Run, Accelerate, Decelerate, Stop],
        Walk => &[Cross, Jaywalk, Stand, Run, Accelerate, Decelerate, Stop],
        WalkAlongside => &[WalkOpposite, OvertakeAgent, PassAgent, Run, Stand, Cross, Jaywalk],
        WalkOpposite => &[WalkAlongside, OvertakeAgent, PassAgent, Run, Stand, Cross, Jaywalk],
    }
}

/// Negatives for overtake / pass between two pedestrians, if overridden.
#[must_use]
pub const fn pedestrian_negatives(maneuver: ManeuverType) -> Option<&'static [ManeuverType]> {
    match maneuver {
        OvertakeAgent => Some(&[
            WalkAlongside, WalkOpposite, PassAgent, Walk, Run, Stand, Cross, Jaywalk,
        ]),
        PassAgent => Some(&[
            WalkAlongside, WalkOpposite, OvertakeAgent, Walk, Run, Stand, Cross, Jaywalk,
        ]),
        _ => None,
    }
}

/// Negative list for an event, substituting the pedestrian table for
/// pedestrian pairs where one exists.
#[must_use]
pub const fn negatives_for(
    maneuver: ManeuverType,
    pedestrian_pair: bool,
) -> &'static [ManeuverType] {
    if pedestrian_pair {
        if let Some(list) = pedestrian_negatives(maneuver) {
            return list;
        }
    }
    negatives(maneuver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_self_negatives() {
        for m in ManeuverType::ALL {
            assert!(!negatives(m).contains(&m), "{m} lists itself");
            if let Some(list) = pedestrian_negatives(m) {
                assert!(!list.contains(&m), "{m} lists itself in pedestrian table");
            }
        }
    }

    #[test]
    fn test_no_duplicates() {
        for m in ManeuverType::ALL {
            let list = negatives(m);
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len(), "{m} has duplicate negatives");
        }
    }

    #[test]
    fn test_every_type_has_enough_negatives() {
        for m in ManeuverType::ALL {
            assert!(negatives(m).len() >= 7, "{m}");
        }
    }

    #[test]
    fn test_ego_and_agent_families_stay_apart() {
        for m in ManeuverType::ALL.into_iter().filter(|m| m.targets_ego()) {
            assert!(
                negatives(m).iter().all(|n| !n.is_pairwise() || n.targets_ego()),
                "{m} mixes agent-relative negatives"
            );
        }
    }

    #[test]
    fn test_pedestrian_override() {
        assert_eq!(negatives_for(OvertakeAgent, true)[0], WalkAlongside);
        assert_eq!(negatives_for(OvertakeAgent, false)[0], PassAgent);
        assert_eq!(negatives_for(Run, true), negatives(Run));
        assert!(negatives_for(PassAgent, true).contains(&Walk));
    }

    #[test]
    fn test_accelerate_excludes_pedestrian_behavior() {
        assert!(negatives(Accelerate).iter().all(|n| !n.is_pedestrian()));
    }
}
