use glam::Vec2;
use level::log::trace;
use level::{LEFT, MapData, MapExtents, Player, RIGHT};
use render_trait::{Colour, DrawSurface};

const WALL: Colour = [255, 0, 0, 255];
const PLAYER: Colour = [0, 255, 0, 255];
const THING: Colour = [255, 0, 0, 255];
const SPLIT: Colour = [0, 0, 255, 255];
const PLAYER_RADIUS: i32 = 4;
const THING_SIZE: i32 = 2;

/// Top down line drawing of a map. World units are divided by `scale` and
/// shifted so the map's smallest vertex lands at the bottom left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomapRenderer {
    /// Map units per pixel
    pub scale: f32,
}

impl Default for AutomapRenderer {
    fn default() -> Self {
        Self { scale: 10.0 }
    }
}

impl AutomapRenderer {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Translate a map vertex to screen coords
    pub fn vertex_to_screen(&self, v: Vec2, extents: &MapExtents, screen_height: i32) -> (i32, i32) {
        (
            ((v.x - extents.min_vertex.x) / self.scale) as i32,
            (screen_height as f32 - (v.y - extents.min_vertex.y) / self.scale) as i32,
        )
    }

    /// Every linedef, every thing, then the player on top
    pub fn draw(&self, map: &MapData, player: &Player, surface: &mut impl DrawSurface) {
        surface.clear();
        let extents = map.get_map_extents();
        let height = surface.height();

        for line in map.linedefs() {
            let (x1, y1) = self.vertex_to_screen(line.v1, extents, height);
            let (x2, y2) = self.vertex_to_screen(line.v2, extents, height);
            surface.draw_line(x1, y1, x2, y2, WALL);
        }

        for thing in map.things() {
            let (x, y) = self.vertex_to_screen(Vec2::new(thing.x as f32, thing.y as f32), extents, height);
            surface.draw_rect(x, y, THING_SIZE, THING_SIZE, THING, true);
        }

        let (x, y) = self.vertex_to_screen(player.xy, extents, height);
        surface.draw_circle(x, y, PLAYER_RADIUS, PLAYER);

        trace!(
            "Automap: {} lines, {} things",
            map.linedefs().len(),
            map.things().len()
        );
    }

    /// Partition line of a node with its right child's box in green and left
    /// child's box in red. Out of range ids draw nothing.
    pub fn draw_node(&self, map: &MapData, node_id: usize, surface: &mut impl DrawSurface) {
        let Some(node) = map.get_nodes().get(node_id) else {
            return;
        };
        let extents = map.get_map_extents();
        let height = surface.height();

        for (side, colour) in [(RIGHT, PLAYER), (LEFT, WALL)] {
            let bbox = &node.bboxes[side];
            let (x1, y1) = self.vertex_to_screen(Vec2::new(bbox.left, bbox.top), extents, height);
            let (x2, y2) = self.vertex_to_screen(Vec2::new(bbox.right, bbox.bottom), extents, height);
            surface.draw_rect(x1, y1, x2 - x1 + 1, y2 - y1 + 1, colour, false);
        }

        let (x1, y1) = self.vertex_to_screen(node.xy, extents, height);
        let (x2, y2) = self.vertex_to_screen(node.xy + node.delta, extents, height);
        surface.draw_line(x1, y1, x2, y2, SPLIT);
    }
}
