use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// Right-handed perspective camera looking at `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera-to-world transform; used to place camera-attached lights.
    pub fn world_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }
}

/// Orbit around a target with auto-rotation; zoom and pan are not supported.
///
/// Angles follow the usual spherical convention: `theta` is the azimuth around
/// +Y measured from +Z, `phi` is the polar angle from +Y.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pending_theta: f32,
    pending_phi: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            radius: CAMERA_DISTANCE,
            theta: 0.0,
            phi: PI / 2.0,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pending_theta: 0.0,
            pending_phi: 0.0,
        }
    }
}

impl OrbitControls {
    pub fn with_auto_rotate(mut self, enabled: bool) -> Self {
        self.auto_rotate = enabled;
        self
    }

    /// Queue a pointer drag (CSS pixels) against a surface `height` pixels tall.
    pub fn drag(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.pending_theta -= TAU * dx / h * self.rotate_speed;
        self.pending_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Radians per second of auto-rotation.
    #[inline]
    pub fn auto_rotation_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// Apply queued drag and auto-rotation, then return the new eye position.
    pub fn update(&mut self, dt: Duration) -> Vec3 {
        if self.auto_rotate {
            self.pending_theta -= self.auto_rotation_rate() * dt.as_secs_f32();
        }
        self.theta = (self.theta + self.pending_theta).rem_euclid(TAU);
        self.phi = (self.phi + self.pending_phi).clamp(ORBIT_POLAR_EPS, PI - ORBIT_POLAR_EPS);
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.eye()
    }

    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }

    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }
}

/// Parameters of the full-screen noise pass that depend on frame state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseParams {
    pub time: f32,
    pub effect: f32,
    pub aspect_ratio: f32,
}

/// Host viewport in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.css_height <= 0.0 {
            return 1.0;
        }
        (self.css_width / self.css_height) as f32
    }

    /// Backing-store size of the output surface, at least 1x1.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.css_width * self.pixel_ratio) as u32;
        let h = (self.css_height * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }

    /// Push this size into the camera projection and the noise pass. Idempotent.
    pub fn apply(&self, camera: &mut PerspectiveCamera, noise: &mut NoiseParams) {
        let aspect = self.aspect();
        camera.aspect = aspect;
        noise.aspect_ratio = aspect;
    }
}

/// Directional light expressed in world space for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Lights attached to the camera; directional lights aim at the world origin.
#[derive(Clone, Debug)]
pub struct LightRig {
    pub ambient: Vec3,
    pub directional: [(Vec3, f32); 3],
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: hex_to_linear(AMBIENT_COLOR),
            directional: [
                (Vec3::from(KEY_LIGHT.0), KEY_LIGHT.1),
                (Vec3::from(FILL_LIGHT.0), FILL_LIGHT.1),
                (Vec3::from(BACK_LIGHT.0), BACK_LIGHT.1),
            ],
        }
    }
}

impl LightRig {
    pub fn world_lights(&self, camera: &PerspectiveCamera) -> [DirectionalLight; 3] {
        let cam_to_world = camera.world_matrix();
        self.directional.map(|(local, intensity)| {
            let world = cam_to_world.transform_point3(local);
            DirectionalLight {
                direction: world.normalize_or_zero(),
                color: Vec3::ONE,
                intensity,
            }
        })
    }
}

/// Transform of the model: the scroll group spins around Y, the load group
/// inside it holds the vertical entrance offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelRig {
    pub scroll_rotation: f32,
    pub load_offset_y: f32,
}

impl Default for ModelRig {
    fn default() -> Self {
        Self {
            scroll_rotation: 0.0,
            load_offset_y: LOAD_GROUP_START_Y,
        }
    }
}

impl ModelRig {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.scroll_rotation)
            * Mat4::from_translation(Vec3::new(0.0, self.load_offset_y, 0.0))
    }
}

fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` sRGB colour to linear RGB.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_channel_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}
