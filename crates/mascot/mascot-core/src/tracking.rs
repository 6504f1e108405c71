//! Pointer tracking helpers: normalization against the canvas rect, a
//! frame-rate throttle, and projection of the pointer into the 3D scene.

use serde::{Deserialize, Serialize};

use crate::math::{add3, normalize3, scale3, Vec3};
use crate::rig::CameraSpec;

/// Minimum spacing between accepted pointer samples (~60 fps).
pub const THROTTLE_MS: f64 = 16.0;

/// Client-space rectangle of the canvas the mascot is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// One pointer position relative to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    /// Canvas-local position in pixels.
    pub x: f32,
    pub y: f32,
    /// [-1, 1] across the canvas, y pointing up, center at 0.
    pub normalized_x: f32,
    pub normalized_y: f32,
    /// Pixels from the canvas center.
    pub distance: f32,
}

impl PointerSample {
    /// A pointer that is nowhere near the canvas.
    pub const AWAY: PointerSample = PointerSample {
        x: 0.0,
        y: 0.0,
        normalized_x: 0.0,
        normalized_y: 0.0,
        distance: f32::INFINITY,
    };

    pub fn from_client(client_x: f32, client_y: f32, rect: Rect) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let (normalized_x, normalized_y) = if rect.width > 0.0 && rect.height > 0.0 {
            ((x / rect.width) * 2.0 - 1.0, -(y / rect.height) * 2.0 + 1.0)
        } else {
            (0.0, 0.0)
        };
        let distance = (x - rect.width / 2.0).hypot(y - rect.height / 2.0);
        Self {
            x,
            y,
            normalized_x,
            normalized_y,
            distance,
        }
    }

    #[inline]
    pub fn is_within(&self, radius: f32) -> bool {
        self.distance < radius
    }
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::AWAY
    }
}

/// Accepts at most one sample per [`THROTTLE_MS`]. Samples arriving inside the
/// window are held (latest wins) and released by [`PointerTracker::poll`].
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    last_accepted_ms: Option<f64>,
    pending: Option<PointerSample>,
    latest: PointerSample,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a sample at `now_ms`. Returns it when accepted immediately.
    pub fn offer(&mut self, sample: PointerSample, now_ms: f64) -> Option<PointerSample> {
        if self.window_open(now_ms) {
            self.accept(sample, now_ms);
            Some(sample)
        } else {
            self.pending = Some(sample);
            None
        }
    }

    /// Release the held sample once the throttle window has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<PointerSample> {
        if !self.window_open(now_ms) {
            return None;
        }
        let sample = self.pending.take()?;
        self.accept(sample, now_ms);
        Some(sample)
    }

    /// Most recently accepted sample ([`PointerSample::AWAY`] before any).
    #[inline]
    pub fn latest(&self) -> PointerSample {
        self.latest
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_open(&self, now_ms: f64) -> bool {
        self.last_accepted_ms
            .map_or(true, |last| now_ms - last >= THROTTLE_MS)
    }

    fn accept(&mut self, sample: PointerSample, now_ms: f64) {
        self.last_accepted_ms = Some(now_ms);
        self.pending = None;
        self.latest = sample;
    }
}

/// Unproject normalized pointer coordinates through `camera` (looking down
/// -Z) and return the point `distance` units from the camera along that ray.
pub fn world_point(camera: &CameraSpec, aspect: f32, ndc: [f32; 2], distance: f32) -> Vec3 {
    let half_h = (camera.fov_deg.to_radians() * 0.5).tan();
    let half_w = half_h * aspect;
    let dir = normalize3([ndc[0] * half_w, ndc[1] * half_h, -1.0]).unwrap_or([0.0, 0.0, -1.0]);
    add3(camera.position, scale3(dir, distance))
}

/// Key light position following the pointer, kept above the robot.
pub fn light_position(normalized_x: f32, normalized_y: f32) -> Vec3 {
    [
        normalized_x * 10.0,
        (-normalized_y * 5.0 + 8.0).max(3.0),
        5.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "left={a} right={b}");
    }

    #[test]
    fn sample_normalizes_with_y_up() {
        let rect = Rect::new(100.0, 50.0, 400.0, 200.0);
        let s = PointerSample::from_client(100.0, 50.0, rect);
        approx(s.normalized_x, -1.0);
        approx(s.normalized_y, 1.0);
        let c = PointerSample::from_client(300.0, 150.0, rect);
        approx(c.normalized_x, 0.0);
        approx(c.normalized_y, 0.0);
        approx(c.distance, 0.0);
        approx(s.distance, (200.0f32).hypot(100.0));
    }

    #[test]
    fn zero_sized_rect_does_not_divide_by_zero() {
        let s = PointerSample::from_client(5.0, 5.0, Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(s.normalized_x, 0.0);
        assert!(s.distance.is_finite());
    }

    #[test]
    fn throttle_keeps_latest_pending() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut t = PointerTracker::new();
        assert!(t.offer(PointerSample::from_client(10.0, 10.0, rect), 0.0).is_some());
        assert!(t.offer(PointerSample::from_client(20.0, 20.0, rect), 5.0).is_none());
        assert!(t.offer(PointerSample::from_client(30.0, 30.0, rect), 10.0).is_none());
        assert!(t.poll(12.0).is_none());
        let released = t.poll(16.0).unwrap();
        approx(released.x, 30.0);
        assert!(!t.has_pending());
        approx(t.latest().x, 30.0);
    }

    #[test]
    fn center_ray_points_down_negative_z() {
        let cam = CameraSpec::default();
        let p = world_point(&cam, 1.0, [0.0, 0.0], 2.5);
        approx(p[0], 0.0);
        approx(p[1], 0.0);
        approx(p[2], 0.0);
        let edge = world_point(&cam, 1.0, [0.0, 1.0], 1.0);
        // top edge of a 75 degree frustum
        approx(edge[1] / (2.5 - edge[2]), (37.5f32).to_radians().tan());
    }

    #[test]
    fn light_stays_above_robot() {
        assert_eq!(light_position(0.0, 0.0), [0.0, 8.0, 5.0]);
        assert_eq!(light_position(1.0, 1.0), [10.0, 3.0, 5.0]);
        assert_eq!(light_position(-1.0, -1.0), [-10.0, 13.0, 5.0]);
    }
}
