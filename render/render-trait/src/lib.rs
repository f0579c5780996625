use level::{MapData, Player};

/// channels should match pixel format
pub const SOFT_PIXEL_CHANNELS: usize = 4;

/// RGBA
pub type Colour = [u8; SOFT_PIXEL_CHANNELS];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSize {
    width_usize: usize,
    height_usize: usize,
    width: i32,
    height: i32,
    width_f32: f32,
    height_f32: f32,
}

impl BufferSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width_usize: width,
            height_usize: height,
            width: width as i32,
            height: height as i32,
            width_f32: width as f32,
            height_f32: height as f32,
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn half_width(&self) -> i32 {
        self.width / 2
    }

    pub const fn half_height(&self) -> i32 {
        self.height / 2
    }

    pub const fn width_usize(&self) -> usize {
        self.width_usize
    }

    pub const fn height_usize(&self) -> usize {
        self.height_usize
    }

    pub const fn width_f32(&self) -> f32 {
        self.width_f32
    }

    pub const fn height_f32(&self) -> f32 {
        self.height_f32
    }

    pub const fn half_width_f32(&self) -> f32 {
        self.width_f32 / 2.0
    }

    pub const fn half_height_f32(&self) -> f32 {
        self.height_f32 / 2.0
    }
}

/// Where the renderers draw to. Coordinates are in pixels with 0,0 at the
/// top left; anything outside the surface is clipped by the implementation.
pub trait DrawSurface {
    fn size(&self) -> &BufferSize;

    fn width(&self) -> i32 {
        self.size().width()
    }

    fn height(&self) -> i32 {
        self.size().height()
    }

    /// Fill with black
    fn clear(&mut self);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, colour: Colour);
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Colour, filled: bool);
    /// Filled
    fn draw_circle(&mut self, x: i32, y: i32, radius: i32, colour: Colour);
}

pub trait PlayViewRenderer {
    /// Doom function name `R_RenderPlayerView`
    fn render_player_view(&mut self, player: &Player, map: &MapData, surface: &mut impl DrawSurface);
}

#[cfg(test)]
mod tests {
    use super::BufferSize;

    #[test]
    fn halves() {
        let size = BufferSize::new(640, 400);
        assert_eq!(size.half_width(), 320);
        assert_eq!(size.half_height_f32(), 200.0);
        assert_eq!(size.width_usize(), 640);
    }
}
