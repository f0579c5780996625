use level::test_maps::{SQUARE_MAP, SquareRoom, WALL_TEXTURES};
use level::{MapData, Player};
use math::Angle;
use render_trait::{BufferSize, Colour, DrawSurface};
use wad::WadData;

use crate::WallColours;

mod automap_tests;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Clear,
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        colour: Colour,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        colour: Colour,
        filled: bool,
    },
    Circle {
        x: i32,
        y: i32,
        radius: i32,
        colour: Colour,
    },
}

/// Keeps every call instead of drawing
pub(crate) struct RecordingSurface {
    size: BufferSize,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: BufferSize::new(width, height),
            calls: Vec::new(),
        }
    }

    /// `(x, top, bottom, colour)` of every vertical line
    pub fn columns(&self) -> Vec<(i32, i32, i32, Colour)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                DrawCall::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    colour,
                } if x1 == x2 => Some((x1, y1, y2, colour)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> &BufferSize {
        &self.size
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, colour: Colour) {
        self.calls.push(DrawCall::Line {
            x1,
            y1,
            x2,
            y2,
            colour,
        });
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Colour, filled: bool) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            w,
            h,
            colour,
            filled,
        });
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: i32, colour: Colour) {
        self.calls.push(DrawCall::Circle {
            x,
            y,
            radius,
            colour,
        });
    }
}

pub(crate) fn load(room: &SquareRoom) -> MapData {
    let wad = WadData::from_bytes(room.build()).unwrap();
    MapData::load(SQUARE_MAP, &wad).unwrap()
}

/// Centre of the room, facing `heading`
pub(crate) fn player_at(map: &MapData, heading: f32) -> Player {
    let mut player = Player::spawn(map, 1, Angle::new(90.0)).unwrap();
    player.angle = Angle::new(heading);
    player
}

/// Wall texture `i` of the square room is drawn in `wall_colour(i)`
pub(crate) fn wall_colour(i: usize) -> Colour {
    [(i as u8 + 1) * 50, 0, 0, 255]
}

pub(crate) fn named_colours() -> WallColours {
    WallColours::with_assigner(|name| {
        let i = WALL_TEXTURES.iter().position(|t| *t == name).unwrap_or(4);
        wall_colour(i)
    })
}
