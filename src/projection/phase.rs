//! Placement of phased points on the 360° machine-cycle dial.
//!
//! Angle 0 is at 12 o'clock and angles grow clockwise. The operator drags a
//! simulated cycle position around the dial; points whose phase angle is close
//! to it are flagged so timing collisions between mechanisms can be reviewed at
//! the desk. Nothing here talks to a machine controller.

use crate::models::Point;
use crate::projection::SurfacePoint;

/// Points closer than this (in degrees) to the simulated angle are "near".
pub const NEAR_THRESHOLD_DEG: f64 = 10.0;

/// Upper end of the simulated angle input. 360 is its own value, not 0.
pub const SIMULATED_ANGLE_MAX: f64 = 360.0;

/// Maps an angle in degrees to a position on a circle in screen coordinates.
///
/// `center + radius * (sin θ, -cos θ)`: 0° is straight up, 90° is to the right.
#[must_use]
pub fn angle_to_position(angle_deg: f64, center: SurfacePoint, radius: f64) -> SurfacePoint {
    let theta = angle_deg.to_radians();
    SurfacePoint::new(
        radius.mul_add(theta.sin(), center.x),
        (-radius).mul_add(theta.cos(), center.y),
    )
}

/// Whether a point at `phase_angle` is near the simulated cycle position.
///
/// Plain linear difference with no wrap-around: 355° is not near 2°.
#[must_use]
pub fn is_near(simulated: f64, phase_angle: f64) -> bool {
    (simulated - phase_angle).abs() < NEAR_THRESHOLD_DEG
}

/// Operator-controlled cycle position in [0, 360].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SimulatedAngle(f64);

impl SimulatedAngle {
    /// Clamps `degrees` into [0, 360]; NaN becomes 0.
    #[must_use]
    pub fn new(degrees: f64) -> Self {
        if degrees.is_nan() {
            return Self(0.0);
        }
        Self(degrees.clamp(0.0, SIMULATED_ANGLE_MAX))
    }

    /// The angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

/// Geometry of the dial on a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    /// Centre of the dial
    pub center: SurfacePoint,
    /// Radius at which markers sit
    pub radius: f64,
}

impl Dial {
    /// A dial centred in a square of side `size`, markers at `radius`.
    #[must_use]
    pub fn centered(size: f64, radius: f64) -> Self {
        Self {
            center: SurfacePoint::new(size / 2.0, size / 2.0),
            radius,
        }
    }

    /// Position of an angle on the marker ring.
    #[must_use]
    pub fn position(&self, angle_deg: f64) -> SurfacePoint {
        angle_to_position(angle_deg, self.center, self.radius)
    }
}

/// A phased point placed on the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialMarker<'a> {
    /// The projected record
    pub point: &'a Point,
    /// Its phase angle
    pub angle: f64,
    /// Marker centre on the dial
    pub position: SurfacePoint,
    /// Whether it is near the simulated angle
    pub near: bool,
}

/// Projects the phased points of a collection onto a dial.
#[derive(Debug, Clone, Copy)]
pub struct PhaseProjector<'a> {
    points: &'a [Point],
    simulated: SimulatedAngle,
}

impl<'a> PhaseProjector<'a> {
    /// Creates a projector with the simulated angle at `simulated`.
    #[must_use]
    pub const fn new(points: &'a [Point], simulated: SimulatedAngle) -> Self {
        Self { points, simulated }
    }

    /// The simulated cycle position.
    #[must_use]
    pub const fn simulated(&self) -> SimulatedAngle {
        self.simulated
    }

    /// One marker per point with a phase angle, in storage order.
    #[must_use]
    pub fn markers(&self, dial: Dial) -> Vec<DialMarker<'a>> {
        let simulated = self.simulated.degrees();
        self.points
            .iter()
            .filter_map(|point| {
                let angle = point.phase_angle?;
                Some(DialMarker {
                    point,
                    angle,
                    position: dial.position(angle),
                    near: is_near(simulated, angle),
                })
            })
            .collect()
    }

    /// Points near the simulated angle, closest first.
    #[must_use]
    pub fn near_points(&self) -> Vec<&'a Point> {
        let simulated = self.simulated.degrees();
        let mut near: Vec<&'a Point> = self
            .points
            .iter()
            .filter(|p| p.phase_angle.is_some_and(|a| is_near(simulated, a)))
            .collect();
        near.sort_by(|a, b| {
            let da = (simulated - a.phase_angle.unwrap_or_default()).abs();
            let db = (simulated - b.phase_angle.unwrap_or_default()).abs();
            da.total_cmp(&db)
        });
        near
    }
}
