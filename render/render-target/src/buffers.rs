use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::debug;
use render_trait::{BufferSize, Colour, DrawSurface, SOFT_PIXEL_CHANNELS};

const BLACK: Colour = [0, 0, 0, 255];

pub struct DrawBuffer {
    size: BufferSize,
    /// Total length is width * height * CHANNELS, where CHANNELS is RGBA bytes
    buffer: Vec<u8>,
    stride: usize,
}

impl DrawBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut buf = Self {
            size: BufferSize::new(width, height),
            buffer: vec![0; (width * height) * SOFT_PIXEL_CHANNELS],
            stride: width * SOFT_PIXEL_CHANNELS,
        };
        buf.clear();
        buf
    }

    #[inline(always)]
    pub fn clear_with_colour(&mut self, colour: &Colour) {
        self.buffer
            .chunks_mut(SOFT_PIXEL_CHANNELS)
            .for_each(|n| n.copy_from_slice(colour));
    }

    /// Read the colour of a single pixel at X|Y
    #[inline]
    pub fn read_pixel(&self, x: usize, y: usize) -> Colour {
        let pos = self.get_buf_index(x, y);
        let mut slice = [0u8; SOFT_PIXEL_CHANNELS];
        slice.copy_from_slice(&self.buffer[pos..pos + SOFT_PIXEL_CHANNELS]);
        slice
    }

    /// Pixels off the buffer are dropped
    #[inline(always)]
    pub fn set_pixel(&mut self, x: i32, y: i32, colour: &Colour) {
        if x < 0 || y < 0 || x >= self.size.width() || y >= self.size.height() {
            return;
        }
        let pos = self.get_buf_index(x as usize, y as usize);
        self.buffer[pos..pos + SOFT_PIXEL_CHANNELS].copy_from_slice(colour);
    }

    /// Read the full buffer
    #[inline(always)]
    pub fn buf(&self) -> &[u8] {
        &self.buffer
    }

    #[inline(always)]
    pub fn pitch(&self) -> usize {
        self.stride
    }

    #[inline(always)]
    pub fn get_buf_index(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * SOFT_PIXEL_CHANNELS
    }

    /// Count of pixels that are not the clear colour, mostly for tests
    pub fn lit_pixels(&self) -> usize {
        self.buffer
            .chunks(SOFT_PIXEL_CHANNELS)
            .filter(|p| *p != BLACK)
            .count()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), png::EncodingError> {
        let file = File::create(path)?;
        let mut encoder = png::Encoder::new(
            BufWriter::new(file),
            self.size.width() as u32,
            self.size.height() as u32,
        );
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.buffer)?;
        debug!("Wrote {:?}", path);
        Ok(())
    }

    fn hline(&mut self, x1: i32, x2: i32, y: i32, colour: &Colour) {
        for x in x1.max(0)..=x2.min(self.size.width() - 1) {
            self.set_pixel(x, y, colour);
        }
    }

    /// Liang-Barsky against the buffer edges. `None` if nothing is left.
    fn clip_line(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
        let (x1f, y1f) = (x1 as f32, y1 as f32);
        let dx = (x2 - x1) as f32;
        let dy = (y2 - y1) as f32;
        let max_x = (self.size.width() - 1) as f32;
        let max_y = (self.size.height() - 1) as f32;

        let mut t0: f32 = 0.0;
        let mut t1: f32 = 1.0;
        for (p, q) in [
            (-dx, x1f),
            (dx, max_x - x1f),
            (-dy, y1f),
            (dy, max_y - y1f),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (x1f + t0 * dx).round() as i32,
            (y1f + t0 * dy).round() as i32,
            (x1f + t1 * dx).round() as i32,
            (y1f + t1 * dy).round() as i32,
        ))
    }
}

impl DrawSurface for DrawBuffer {
    #[inline(always)]
    fn size(&self) -> &BufferSize {
        &self.size
    }

    fn clear(&mut self) {
        self.clear_with_colour(&BLACK);
    }

    /// Bresenham
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, colour: Colour) {
        let Some((mut x, mut y, x2, y2)) = self.clip_line(x1, y1, x2, y2) else {
            return;
        };
        let dx = (x2 - x).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let dy = -(y2 - y).abs();
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, &colour);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Colour, filled: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x2, y2) = (x + w - 1, y + h - 1);
        if filled {
            for row in y.max(0)..=y2.min(self.size.height() - 1) {
                self.hline(x, x2, row, &colour);
            }
        } else {
            self.draw_line(x, y, x2, y, colour);
            self.draw_line(x, y2, x2, y2, colour);
            self.draw_line(x, y, x, y2, colour);
            self.draw_line(x2, y, x2, y2, colour);
        }
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: i32, colour: Colour) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            let half = ((r2 - dy * dy) as f32).sqrt() as i32;
            self.hline(x - half, x + half, y + dy, &colour);
        }
    }
}
