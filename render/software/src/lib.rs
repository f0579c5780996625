//! Flat shaded software rendering of a level's one-sided walls, plus a top
//! down automap.
//!
//! A frame is drawn by walking the BSP front to back from the camera. Each
//! seg is clipped to the field of view and projected to a column range, then
//! run through `SolidSegs` so only columns no nearer wall has covered are
//! drawn. Walls are one colour per middle texture, picked by `WallColours`.

mod automap;
mod bsp;
mod colours;
mod defs;
mod segs;
mod utilities;

pub use automap::AutomapRenderer;
pub use bsp::{Projection, SoftwareRenderer, ViewState};
pub use colours::{ColourAssigner, WallColours};
pub use defs::{ClipRange, FrameStats, SolidSegs};
pub use utilities::{SegAngles, angle_to_screen, clip_to_fov, projection, screen_to_angle};

#[cfg(test)]
mod tests;
