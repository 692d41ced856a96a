pub mod pointer;
pub mod visibility;
pub mod window;

pub use pointer::{wire_orbit_drag, OrbitWiring};
pub use visibility::wire_content_reveal;
pub use window::{wire_resize, wire_scroll};
