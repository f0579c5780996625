use level::{Player, Sector, Segment};
use math::{Angle, point_to_dist};
use render_trait::{Colour, DrawSurface};

use crate::bsp::Projection;
use crate::utilities::{distance_to_normal, scale_from_view_angle};

/// Per-seg wall state, set up once for a seg then used for each of its
/// uncovered fragments
#[derive(Debug, Clone, Copy)]
pub(crate) struct SegRender {
    rw_normalangle: Angle,
    rw_distance: f32,
    /// Sector ceiling and floor relative to the eye
    worldtop: f32,
    worldbottom: f32,
    colour: Colour,
}

/// Screen extents of one drawn column
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WallColumn {
    pub x: i32,
    pub top: f32,
    pub bottom: f32,
}

impl SegRender {
    pub fn new(seg: &Segment, v1_angle: Angle, sector: &Sector, player: &Player, colour: Colour) -> Self {
        let rw_normalangle = seg.angle + 90.0;
        let rw_distance = distance_to_normal(rw_normalangle, v1_angle, point_to_dist(player.xy, seg.v1));
        Self {
            rw_normalangle,
            rw_distance,
            worldtop: sector.ceilingheight - player.viewz,
            worldbottom: sector.floorheight - player.viewz,
            colour,
        }
    }

    fn scale_at(&self, x: i32, view: &Projection, player: &Player) -> f32 {
        scale_from_view_angle(
            view.column_angle(x),
            player.angle,
            self.rw_normalangle,
            view.dist,
            self.rw_distance,
        )
    }

    /// Columns of the fragment `start..=stop`, with the scale stepped
    /// linearly between the two ends
    pub fn columns(&self, start: i32, stop: i32, view: &Projection, player: &Player) -> Vec<WallColumn> {
        let scale1 = self.scale_at(start, view, player);
        let scale2 = self.scale_at(stop, view, player);
        let scalestep = if stop > start {
            (scale2 - scale1) / (stop - start) as f32
        } else {
            0.0
        };

        let mut topfrac = view.half_height - self.worldtop * scale1;
        let mut bottomfrac = view.half_height - self.worldbottom * scale1;
        let topstep = -self.worldtop * scalestep;
        let bottomstep = -self.worldbottom * scalestep;

        let mut out = Vec::with_capacity((stop - start + 1) as usize);
        for x in start..=stop {
            out.push(WallColumn {
                x,
                top: topfrac,
                bottom: bottomfrac,
            });
            topfrac += topstep;
            bottomfrac += bottomstep;
        }
        out
    }

    /// R_StoreWallRange - r_segs
    pub fn store_wall_range(
        &self,
        start: i32,
        stop: i32,
        view: &Projection,
        player: &Player,
        surface: &mut impl DrawSurface,
    ) {
        for col in self.columns(start, stop, view, player) {
            surface.draw_line(
                col.x,
                col.top.round() as i32,
                col.x,
                col.bottom.round() as i32,
                self.colour,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use level::SegDirection;

    fn east_wall() -> Segment {
        Segment {
            start_vertex: 2,
            end_vertex: 3,
            v1: Vec2::new(256.0, 256.0),
            v2: Vec2::new(256.0, 0.0),
            offset: 0.0,
            angle: Angle::new(270.0),
            linedef: 2,
            direction: SegDirection::Same,
            sidedef: Some(2),
            right_sector: Some(0),
            left_sector: None,
        }
    }

    fn room_sector() -> Sector {
        Sector {
            num: 0,
            floorheight: 0.0,
            ceilingheight: 128.0,
            floor_tex: "FLOOR4_8".to_owned(),
            ceil_tex: "CEIL3_5".to_owned(),
            lightlevel: 160,
            special: 0,
            tag: 0,
        }
    }

    #[test]
    fn facing_wall_is_level() {
        let player = Player::new(Vec2::new(128.0, 128.0), Angle::new(0.0), Angle::new(90.0));
        let view = Projection::new(480, 400, Angle::new(90.0));
        let seg = SegRender::new(&east_wall(), Angle::new(45.0), &room_sector(), &player, [1, 2, 3, 255]);

        let cols = seg.columns(0, 479, &view, &player);
        assert_eq!(cols.len(), 480);
        // scale 240 / 128 at every column
        for c in [cols[0], cols[240], cols[479]] {
            assert!((c.top - (200.0 - 87.0 * 1.875)).abs() < 0.1, "{c:?}");
            assert!((c.bottom - (200.0 + 41.0 * 1.875)).abs() < 0.1, "{c:?}");
        }
    }

    #[test]
    fn single_column_fragment() {
        let player = Player::new(Vec2::new(128.0, 128.0), Angle::new(0.0), Angle::new(90.0));
        let view = Projection::new(480, 400, Angle::new(90.0));
        let seg = SegRender::new(&east_wall(), Angle::new(45.0), &room_sector(), &player, [1, 2, 3, 255]);
        let cols = seg.columns(479, 479, &view, &player);
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].x, 479);
        assert!(cols[0].top < cols[0].bottom);
    }
}
