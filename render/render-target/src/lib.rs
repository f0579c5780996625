//! An in-memory RGBA `DrawBuffer` the renderers draw to. There is no window;
//! a finished frame is written out as a PNG.

mod buffers;

pub use buffers::DrawBuffer;
pub use render_trait::{BufferSize, Colour, DrawSurface, SOFT_PIXEL_CHANNELS};
