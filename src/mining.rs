//! Scene-level mining orchestrator.
//!
//! For each scene the [`Miner`] runs, in order:
//! 1. ego-only maneuvers over the full ego track,
//! 2. ego-vs-agent maneuvers against every agent,
//! 3. per agent: agent-only maneuvers, agent-vs-agent against every other
//!    agent, then agent-vs-ego.
//!
//! Pairs are synchronised on exact timestamp equality. Agent-only passes
//! use the agent's samples shared with the ego, which is the distance
//! reference for cross / jaywalk / run. Every detected span becomes one
//! [`ManeuverEvent`] delivered to an [`EventSink`].
//!
//! # Example
//!
//! ```
//! use maneuver_mining::{ActorKind, KinematicSample, Miner, MiningConfig, Scene, Track};
//!
//! let ego: Vec<KinematicSample> = (0..8)
//!     .map(|i| {
//!         let v = i as f64;
//!         let xy = [0.25 * v * v, 0.0];
//!         KinematicSample::planar(i, i as i64 * 500_000, xy, 0.0, v, ActorKind::Vehicle)
//!     })
//!     .collect();
//! let scene = Scene::new("scene-0001", Track::ego(ego).unwrap(), vec![]).unwrap();
//!
//! let miner = Miner::new(MiningConfig::nuscenes()).unwrap();
//! let events = miner.collect_scene(&scene).unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].maneuver.as_str(), "ACCELERATE");
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::compat;
use crate::config::MiningConfig;
use crate::detectors::{Detector, Span};
use crate::error::{MiningError, Result};
use crate::event::{FrameRange, ManeuverEvent, Participants};
use crate::maneuver::{ActorRole, ManeuverType};
use crate::math::stats::median;
use crate::sample::{ObjectId, Scene};
use crate::sampler::refine_pedestrian_negatives;
use crate::signals::{DetectorInput, Signals, SyncedPair};

/// Destination for mined events.
pub trait EventSink {
    fn emit(&mut self, event: ManeuverEvent);
}

impl EventSink for Vec<ManeuverEvent> {
    fn emit(&mut self, event: ManeuverEvent) {
        self.push(event);
    }
}

/// Event counts for one or more mined scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MiningSummary {
    pub scenes: usize,
    pub emitted: usize,
    pub aborted: usize,
    /// Emitted events per maneuver type.
    pub by_maneuver: BTreeMap<ManeuverType, usize>,
}

impl MiningSummary {
    fn scene() -> Self {
        Self {
            scenes: 1,
            ..Self::default()
        }
    }

    fn record_emitted(&mut self, maneuver: ManeuverType) {
        self.emitted += 1;
        *self.by_maneuver.entry(maneuver).or_insert(0) += 1;
    }

    /// Add another summary's counts to this one.
    pub fn merge(&mut self, other: &Self) {
        self.scenes += other.scenes;
        self.emitted += other.emitted;
        self.aborted += other.aborted;
        for (&maneuver, &count) in &other.by_maneuver {
            *self.by_maneuver.entry(maneuver).or_insert(0) += count;
        }
    }

    /// Emitted events of one maneuver type.
    #[must_use]
    pub fn count(&self, maneuver: ManeuverType) -> usize {
        self.by_maneuver.get(&maneuver).copied().unwrap_or(0)
    }
}

/// Runs every configured detector over scenes and emits labeled events.
#[derive(Debug, Clone)]
pub struct Miner {
    config: MiningConfig,
}

impl Miner {
    /// Create a miner with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: MiningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Mine one scene into `sink`.
    ///
    /// Events that cannot be labeled (too few negatives, unsupported role)
    /// are skipped with a warning and counted as aborted.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed detector input.
    pub fn mine_scene<S: EventSink + ?Sized>(
        &self,
        scene: &Scene,
        sink: &mut S,
    ) -> Result<MiningSummary> {
        let mut run = SceneRun {
            config: &self.config,
            scene_id: scene.id(),
            sink,
            summary: MiningSummary::scene(),
        };
        let ego = scene.ego();

        let ego_signals = Signals::from_track(ego);
        run.mine(
            ActorRole::Ego,
            DetectorInput::solo(&ego_signals),
            Participants::solo(ObjectId::Ego),
        )?;

        for agent in scene.agents() {
            let pair = SyncedPair::new(ego, agent);
            let participants = Participants::pair(ObjectId::Ego, agent.id());
            run.mine_pair(ActorRole::EgoAgent, &pair, participants)?;
        }

        for agent in scene.agents() {
            let with_ego = SyncedPair::new(agent, ego);
            run.mine_pair(ActorRole::Agent, &with_ego, Participants::solo(agent.id()))?;

            for other in scene.agents().iter().filter(|o| o.id() != agent.id()) {
                let pair = SyncedPair::new(agent, other);
                let participants = Participants::pair(agent.id(), other.id());
                run.mine_pair(ActorRole::AgentAgent, &pair, participants)?;
            }

            let participants = Participants::pair(agent.id(), ObjectId::Ego);
            run.mine_pair(ActorRole::AgentEgo, &with_ego, participants)?;
        }

        let summary = run.summary;
        info!(
            scene = scene.id(),
            emitted = summary.emitted,
            aborted = summary.aborted,
            "scene mined"
        );
        Ok(summary)
    }

    /// Mine several scenes into one sink.
    ///
    /// # Errors
    ///
    /// Stops at the first scene that fails.
    pub fn mine_scenes<'a, I, S>(&self, scenes: I, sink: &mut S) -> Result<MiningSummary>
    where
        I: IntoIterator<Item = &'a Scene>,
        S: EventSink + ?Sized,
    {
        let mut total = MiningSummary::default();
        for scene in scenes {
            total.merge(&self.mine_scene(scene, sink)?);
        }
        info!(
            scenes = total.scenes,
            emitted = total.emitted,
            aborted = total.aborted,
            "mining finished"
        );
        Ok(total)
    }

    /// Mine one scene and collect its events.
    ///
    /// # Errors
    ///
    /// See [`Miner::mine_scene`].
    pub fn collect_scene(&self, scene: &Scene) -> Result<Vec<ManeuverEvent>> {
        let mut events = Vec::new();
        self.mine_scene(scene, &mut events)?;
        Ok(events)
    }
}

struct SceneRun<'a, S: ?Sized> {
    config: &'a MiningConfig,
    scene_id: &'a str,
    sink: &'a mut S,
    summary: MiningSummary,
}

impl<S: EventSink + ?Sized> SceneRun<'_, S> {
    fn mine_pair(
        &mut self,
        role: ActorRole,
        pair: &SyncedPair,
        participants: Participants,
    ) -> Result<()> {
        if pair.is_empty() {
            trace!(scene = self.scene_id, role = %role, ?participants, "no shared timestamps");
            return Ok(());
        }
        self.mine(role, pair.forward(), participants)
    }

    fn mine(
        &mut self,
        role: ActorRole,
        input: DetectorInput<'_>,
        participants: Participants,
    ) -> Result<()> {
        let config = self.config;
        for &maneuver in config.roles.for_role(role) {
            let detector = match Detector::resolve(maneuver, role) {
                Ok(detector) => detector,
                Err(err) => {
                    self.abort(&err);
                    continue;
                }
            };
            for span in detector.detect(&input, config)? {
                match self.event(maneuver, role, span, &input, participants) {
                    Ok(event) => {
                        debug!(
                            scene = self.scene_id,
                            maneuver = %maneuver,
                            role = %role,
                            start = event.frame_range.start,
                            end = event.frame_range.end,
                            ?participants,
                            "event emitted"
                        );
                        self.summary.record_emitted(maneuver);
                        self.sink.emit(event);
                    }
                    Err(err) if err.is_event_scoped() => self.abort(&err),
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(())
    }

    fn abort(&mut self, err: &MiningError) {
        warn!(scene = self.scene_id, error = %err, "event aborted");
        self.summary.aborted += 1;
    }

    fn event(
        &self,
        maneuver: ManeuverType,
        role: ActorRole,
        span: Span,
        input: &DetectorInput<'_>,
        participants: Participants,
    ) -> Result<ManeuverEvent> {
        let subject = input.subject();
        let human_pair = role == ActorRole::AgentAgent
            && subject.kind().is_human()
            && input.other().is_some_and(|o| o.kind().is_human());

        let mut negatives = compat::negatives_for(maneuver, human_pair).to_vec();
        if !role.primary_is_ego() && subject.kind().is_human() {
            if let Some(speed) = median(&subject.speed()[span.range()]) {
                if let Some(removed) =
                    refine_pedestrian_negatives(&mut negatives, speed, &self.config.refinement)
                {
                    trace!(maneuver = %maneuver, removed = %removed, speed, "negative refined");
                }
            }
        }
        if negatives.len() < self.config.distractor_count {
            return Err(MiningError::insufficient_negatives(
                maneuver,
                self.config.distractor_count,
                negatives.len(),
            ));
        }

        let frames = subject.frames()[span.range()].to_vec();
        let frame_range = FrameRange::covering(&frames)
            .ok_or_else(|| MiningError::invalid_input("empty detection span"))?;

        Ok(ManeuverEvent {
            scene_id: self.scene_id.to_owned(),
            maneuver,
            role,
            span,
            frames,
            frame_range,
            participants,
            positive: maneuver,
            negatives,
        })
    }
}
