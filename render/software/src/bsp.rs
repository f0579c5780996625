use level::log::{trace, warn};
use level::{MapData, Player, Segment};
use math::Angle;
use render_trait::{DrawSurface, PlayViewRenderer};

use crate::colours::WallColours;
use crate::defs::{FrameStats, SolidSegs};
use crate::segs::SegRender;
use crate::utilities::{angle_to_screen, clip_to_fov, projection, screen_to_angle};

/// Everything derived from the screen size and field of view
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub width: i32,
    pub height: i32,
    pub half_width: f32,
    pub half_height: f32,
    pub fov: Angle,
    pub half_fov: Angle,
    /// Eye to projection plane
    pub dist: f32,
    /// Degrees from the view direction for each column, left positive. One
    /// longer than the width so the right edge has an entry.
    screen_x_to_angle: Vec<f32>,
}

impl Projection {
    pub fn new(width: i32, height: i32, fov: Angle) -> Self {
        let half_width = width as f32 / 2.0;
        let dist = projection(fov, half_width);
        let screen_x_to_angle = (0..=width)
            .map(|x| screen_to_angle(x as f32, half_width, dist))
            .collect();
        Self {
            width,
            height,
            half_width,
            half_height: height as f32 / 2.0,
            fov,
            half_fov: fov / 2.0,
            dist,
            screen_x_to_angle,
        }
    }

    #[inline]
    pub fn column_angle(&self, x: i32) -> f32 {
        self.screen_x_to_angle[x.clamp(0, self.width) as usize]
    }

    pub fn column_angles(&self) -> &[f32] {
        &self.screen_x_to_angle
    }

    fn matches(&self, width: i32, height: i32, fov: Angle) -> bool {
        self.width == width && self.height == height && self.fov == fov
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Uninitialized,
    Ready(Projection),
}

/// Flat shaded first person view of the one-sided walls, walked front to back
/// through the BSP with each screen column drawn at most once.
#[derive(Debug)]
pub struct SoftwareRenderer {
    state: ViewState,
    solid_segs: SolidSegs,
    colours: WallColours,
    stats: FrameStats,
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        Self::new(WallColours::default())
    }
}

impl SoftwareRenderer {
    pub fn new(colours: WallColours) -> Self {
        Self {
            state: ViewState::Uninitialized,
            solid_segs: SolidSegs::new(0),
            colours,
            stats: FrameStats::default(),
        }
    }

    /// Build the projection for a screen size and fov. Called on the first
    /// frame and again whenever either changes.
    pub fn setup(&mut self, width: i32, height: i32, fov: Angle) {
        self.state = ViewState::Ready(Projection::new(width, height, fov));
        self.solid_segs.resize(width);
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn colours(&self) -> &WallColours {
        &self.colours
    }

    pub fn solid_segs(&self) -> &SolidSegs {
        &self.solid_segs
    }

    /// Doom function name `R_RenderPlayerView`
    pub fn render(&mut self, player: &Player, map: &MapData, surface: &mut impl DrawSurface) {
        let (width, height) = (surface.width(), surface.height());
        if width <= 0 || height <= 0 {
            warn!("Can't render in to a {}x{} surface", width, height);
            return;
        }
        let ready = matches!(&self.state, ViewState::Ready(p) if p.matches(width, height, player.fov));
        if !ready {
            self.setup(width, height, player.fov);
        }
        // Taken out so the walk below can borrow self mutably
        let ViewState::Ready(view) = std::mem::replace(&mut self.state, ViewState::Uninitialized) else {
            return;
        };

        self.solid_segs.clear();
        self.stats = FrameStats::default();
        surface.clear();

        let nodes = map.bsp_front_to_back(player.xy, &mut |subsector| {
            self.stats.subsectors += 1;
            if self.solid_segs.is_full() {
                return;
            }
            for seg in map.subsector_segs(subsector) {
                self.add_line(seg, player, map, &view, surface);
            }
        });
        self.stats.nodes = nodes;
        self.state = ViewState::Ready(view);

        trace!(
            "Frame: {} nodes, {} subsectors, {} segs, {} fragments",
            self.stats.nodes, self.stats.subsectors, self.stats.segs, self.stats.fragments
        );
    }

    /// Clip a seg to the view, and if it survives as a solid wall, draw the
    /// parts not already covered.
    ///
    /// Doom function name `R_AddLine`
    fn add_line(
        &mut self,
        seg: &Segment,
        player: &Player,
        map: &MapData,
        view: &Projection,
        surface: &mut impl DrawSurface,
    ) {
        self.stats.segs += 1;

        let Some(angles) = clip_to_fov(player.xy, player.angle, view.fov, seg.v1, seg.v2) else {
            return;
        };

        let x1 = angle_to_screen(angles.v1_from_view, view.half_width, view.width, view.dist);
        let x2 = angle_to_screen(angles.v2_from_view, view.half_width, view.width, view.dist);
        // Does not cross a pixel?
        if x1 == x2 {
            return;
        }

        // Two-sided lines are windows in to the next sector, not walls
        if !seg.is_solid() {
            return;
        }

        let Some(sector) = seg.right_sector.map(|s| &map.sectors()[s]) else {
            return;
        };
        let texture = seg
            .sidedef
            .map(|s| map.sidedefs()[s].middle_tex.as_str())
            .unwrap_or("-");
        let colour = self.colours.colour_for(texture);
        let wall = SegRender::new(seg, angles.v1_angle, sector, player, colour);

        #[cfg(feature = "debug_seg_clip")]
        level::log::debug!("Seg {}: {} to {}, {}", seg.linedef, x1, x2, texture);

        let (first, last) = (x1.min(x2), x1.max(x2));
        let stats = &mut self.stats;
        self.solid_segs.clip_solid_seg(first, last, |start, stop| {
            stats.fragments += 1;
            wall.store_wall_range(start, stop, view, player, surface);
        });
    }
}

impl PlayViewRenderer for SoftwareRenderer {
    fn render_player_view(&mut self, player: &Player, map: &MapData, surface: &mut impl DrawSurface) {
        self.render(player, map, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_table_covers_every_column() {
        let p = Projection::new(480, 400, Angle::new(90.0));
        assert_eq!(p.column_angles().len(), 481);
        assert!((p.column_angle(0) - 45.0).abs() < 0.01);
        assert!(p.column_angle(240).abs() < 0.01);
        assert!((p.column_angle(480) + 45.0).abs() < 0.01);
        assert!(p.column_angles().windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn setup_moves_to_ready() {
        let mut r = SoftwareRenderer::default();
        assert_eq!(r.state(), &ViewState::Uninitialized);
        r.setup(320, 200, Angle::new(90.0));
        let ViewState::Ready(p) = r.state() else {
            panic!("not ready");
        };
        assert_eq!(p.width, 320);
        assert_eq!(p.half_height, 100.0);
        assert_eq!(r.solid_segs().ranges().len(), 2);
    }
}
