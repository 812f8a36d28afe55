use crate::geom::{Curve3, FrameError, Point3, Vec3, transport_frame_at};

/// World-space pose of the moving body, derived every tick from the smoothed
/// progress value. Not a source of truth: always recomputable from progress,
/// curve, and frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyState {
    pub position: Point3,
    /// Accumulated Euler rotation in radians (XYZ order).
    pub rotation: Vec3,
}

/// Places and orients the body along the curve from the smoothed progress
/// signal.
///
/// The smoothed value is used directly as the curve parameter; there is no
/// arc-length re-parametrization, so travel speed varies with local
/// curvature, matching the original scene. The spin is a cosmetic proxy
/// scaled from the progress delta, not contact-point kinematics.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTransporter {
    body_radius: f64,
    tube_inner_radius: f64,
    roll_speed: f64,
    rotation: Vec3,
}

impl BodyTransporter {
    /// `body_radius` is the rolling body's radius, `tube_inner_radius` the
    /// tube profile's inner radius it rests against.
    #[must_use]
    pub fn new(body_radius: f64, tube_inner_radius: f64, roll_speed: f64) -> Self {
        Self {
            body_radius,
            tube_inner_radius,
            roll_speed,
            rotation: Vec3::ZERO,
        }
    }

    /// Advances the body to parameter `smoothed` and spins it by
    /// `delta * roll_speed`.
    ///
    /// The offset along the frame's up axis seats the body's surface against
    /// the tube's lower inside wall; using the same frame solver as the tube
    /// builder is what keeps the two in contact.
    pub fn update<C: Curve3>(
        &mut self,
        curve: &C,
        smoothed: f64,
        delta: f64,
    ) -> Result<BodyState, FrameError> {
        let frame = transport_frame_at(curve, smoothed)?;

        let offset = self.body_radius - self.tube_inner_radius;
        let position = frame.origin.add_vec(frame.up.mul_scalar(offset));

        let spin = delta * self.roll_speed;
        self.rotation = Vec3::new(
            self.rotation.x + spin,
            self.rotation.y,
            self.rotation.z + spin * 0.5,
        );

        Ok(BodyState {
            position,
            rotation: self.rotation,
        })
    }

    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }
}
