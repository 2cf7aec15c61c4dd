//! Numeric primitives for maneuver mining.
//!
//! This module provides:
//! - [`frame`]: relative frame transforms and angle wrapping
//! - [`polyfit`]: least-squares polynomial fit and tail extrapolation
//! - [`kinematics`]: speed and heading derived from positions
//! - [`stats`]: min/max/mean/median reductions

pub mod frame;
pub mod kinematics;
pub mod polyfit;
pub mod stats;

pub use frame::{heading_gap_deg, position_in_frame, quaternion_yaw, wrap_angle, yaw_in_frame};
pub use kinematics::{apply_derived_speeds, derive_speeds, estimate_headings};
pub use polyfit::{extrapolate_next, polyfit, polyval};
