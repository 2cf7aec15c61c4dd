//! Maneuver Mining Library
//!
//! Windowed kinematic maneuver detection over multi-object driving scenes.
//!
//! This library scans ego and agent trajectories with fixed-width sliding
//! windows, reduces each run of matching windows to a single event and
//! labels every event with a positive maneuver type and an ordered list of
//! plausible-but-wrong negatives, ready for multiple-choice question
//! generation.
//!
//! # Features
//!
//! - **Windowed detectors**: longitudinal, lateral, interaction, pedestrian
//!   and relative-position families over a common [`Signals`] view
//! - **Island reduction**: one event per contiguous run of matching windows
//! - **Relative frames**: positions expressed in another object's body frame
//! - **Compatibility graph**: static negative lists with a pedestrian-pair override
//! - **Rank-weighted sampling**: distractors drawn without replacement
//!
//! # Quick Start
//!
//! ```
//! use maneuver_mining::{ActorKind, KinematicSample, Miner, MiningConfig, Scene, Track};
//!
//! // Ego vehicle speeding up by 1 m/s per 0.5 s keyframe.
//! let mut x = 0.0;
//! let samples: Vec<KinematicSample> = (0..8u32)
//!     .map(|i| {
//!         let v = f64::from(i);
//!         let t = i64::from(i) * 500_000;
//!         let s = KinematicSample::planar(i as usize, t, [x, 0.0], 0.0, v, ActorKind::Vehicle);
//!         x += 0.5 * v;
//!         s
//!     })
//!     .collect();
//!
//! let scene = Scene::new("scene-0001", Track::ego(samples)?, Vec::new())?;
//! let miner = Miner::new(MiningConfig::nuscenes())?;
//! let events = miner.collect_scene(&scene)?;
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].maneuver.as_str(), "ACCELERATE");
//! assert!(!events[0].negatives.contains(&events[0].positive));
//! # Ok::<(), maneuver_mining::MiningError>(())
//! ```
//!
//! # Running a single detector
//!
//! ```
//! use maneuver_mining::{
//!     ActorKind, Detector, DetectorInput, KinematicSample, MiningConfig, Signals,
//! };
//!
//! let samples: Vec<KinematicSample> = (0..7u32)
//!     .map(|i| {
//!         let v = f64::from(i);
//!         let t = i64::from(i) * 500_000;
//!         KinematicSample::planar(i as usize, t, [v, 0.0], 0.0, v, ActorKind::Vehicle)
//!     })
//!     .collect();
//! let signals = Signals::from_samples(ActorKind::Vehicle, &samples);
//!
//! let spans: Vec<_> = Detector::Accelerate
//!     .detect(&DetectorInput::solo(&signals), &MiningConfig::default())?
//!     .collect();
//! assert_eq!((spans[0].start, spans[0].end), (0, 6));
//! # Ok::<(), maneuver_mining::MiningError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod compat;
pub mod config;
pub mod detectors;
pub mod error;
pub mod event;
pub mod islands;
pub mod maneuver;
pub mod math;
pub mod mining;
pub mod sample;
pub mod sampler;
pub mod signals;
pub mod window;

// Re-exports for convenient access
pub use config::{MiningConfig, RoleManeuvers, DEFAULT_DISTRACTOR_COUNT, DEFAULT_WINDOW};
pub use detectors::{Detections, Detector, Motion, Placement, Span};
pub use error::{MiningError, Result};
pub use event::{FrameRange, ManeuverEvent, Participants};
pub use islands::{island_anchors, reduce_islands};
pub use maneuver::{ActorRole, ManeuverType};
pub use mining::{EventSink, Miner, MiningSummary};
pub use sample::{ActorKind, KinematicSample, MapMembership, ObjectId, Scene, Track};
pub use sampler::{refine_pedestrian_negatives, sample_negatives};
pub use signals::{DetectorInput, Signals, SyncedPair};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
