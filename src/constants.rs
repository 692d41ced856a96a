// Landing page tuning constants.
//
// These keep magic numbers out of the frame loop and the controllers. The
// scroll values are kept at their historical settings for behavioural parity.

// Scroll -> model rotation (radians per CSS pixel of vertical scroll)
pub const ROTATION_PER_SCROLL_PX: f32 = 0.001;

// Scroll-driven noise effect
pub const EFFECT_SMOOTHING: f32 = 0.05; // fraction of the gap closed per frame
pub const EFFECT_DEBOUNCE_MS: u64 = 300; // quiet period before the effect decays

// Asset
pub const MODEL_URL: &str = "sneaker.glb";
pub const LOAD_GROUP_START_Y: f32 = -10.0; // model waits below frame until revealed
pub const LOAD_GROUP_REST_Y: f32 = 0.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 2.0;

// Orbit controls
pub const AUTO_ROTATE_SPEED: f32 = 2.0; // one revolution per 30s at 2.0
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_POLAR_EPS: f32 = 1e-6;

// Lights, attached to the camera; positions are camera-space
pub const AMBIENT_COLOR: u32 = 0x404040;
pub const KEY_LIGHT: ([f32; 3], f32) = ([-1.0, 1.0, 3.0], 1.0);
pub const FILL_LIGHT: ([f32; 3], f32) = ([1.0, 1.0, 3.0], 0.5);
pub const BACK_LIGHT: ([f32; 3], f32) = ([-1.0, 3.0, -1.0], 1.0);

// Entrance timings (seconds after the model has loaded)
pub const LOADER_SLIDE_DELAY_SEC: f32 = 0.0;
pub const LOADER_SLIDE_SEC: f32 = 1.0;
pub const MODEL_RISE_DELAY_SEC: f32 = 1.0;
pub const MODEL_RISE_SEC: f32 = 2.0;
pub const HEADER_REVEAL_DELAY_SEC: f32 = 2.0;
pub const NEW_DROP_REVEAL_DELAY_SEC: f32 = 2.5;
pub const REVEAL_SEC: f32 = 1.0;
pub const REVEAL_OFFSET_PX: f32 = -100.0; // start offset for header-style reveals

// Content section fade-in once it scrolls into view
pub const CONTENT_REVEAL_DELAY_SEC: f32 = 1.0;
pub const CONTENT_REVEAL_SEC: f32 = 1.0;

// DOM selectors
pub const SNEAKER_SELECTOR: &str = "section.sneaker";
pub const LOADER_SELECTOR: &str = "div.loader";
pub const LOADER_TEXT_SELECTOR: &str = "div.loader span";
pub const HEADER_SELECTOR: &str = "header";
pub const NEW_DROP_SELECTOR: &str = "section.new-drop";
pub const CONTENT_SELECTOR: &str = "section.content";
pub const CONTENT_ITEMS_SELECTOR: &str = "section.content p, section.content img";
