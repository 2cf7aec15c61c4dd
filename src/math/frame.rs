//! Relative frame transforms.
//!
//! Express one object's pose in another object's body frame: translate by
//! the reference position, then rotate by the inverse of the reference
//! orientation. Body frames follow the x-forward, y-left, z-up convention,
//! so a positive x means "ahead of" and a positive y means "left of".
//!
//! Callers must pair samples from the same frame; nothing here checks it.

use nalgebra::{UnitQuaternion, Vector3};

use crate::sample::KinematicSample;

/// Yaw of an orientation projected onto the ground plane.
///
/// Rotates the body x-axis into the global frame and measures its heading
/// with `atan2`, so roll and pitch do not leak into the result.
#[must_use]
pub fn quaternion_yaw(q: &UnitQuaternion<f64>) -> f64 {
    let forward = q * Vector3::x();
    forward.y.atan2(forward.x)
}

/// Wrap an angle in radians to `(-π, π]`.
#[must_use]
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Signed wrapped difference `to - from` in radians.
#[must_use]
#[inline]
pub fn angle_delta(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

/// Absolute wrapped heading difference in degrees, in `[0, 180]`.
#[must_use]
#[inline]
pub fn heading_gap_deg(a: f64, b: f64) -> f64 {
    angle_delta(a, b).abs().to_degrees()
}

/// Express a global point in the body frame at `origin` / `orientation`.
#[must_use]
pub fn to_body_frame(
    point: &Vector3<f64>,
    origin: &Vector3<f64>,
    orientation: &UnitQuaternion<f64>,
) -> Vector3<f64> {
    orientation.inverse_transform_vector(&(point - origin))
}

/// Position of `sample` expressed in the body frame of `reference`.
#[must_use]
pub fn position_in_frame(sample: &KinematicSample, reference: &KinematicSample) -> Vector3<f64> {
    to_body_frame(
        &sample.translation(),
        &reference.translation(),
        &reference.orientation,
    )
}

/// Yaw of `orientation` after rotating it into the `reference` frame.
#[must_use]
pub fn yaw_in_frame(orientation: &UnitQuaternion<f64>, reference: &UnitQuaternion<f64>) -> f64 {
    quaternion_yaw(&(reference.inverse() * orientation))
}
