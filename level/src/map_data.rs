use glam::Vec2;
use log::{debug, info, warn};
use math::Angle;
use wad::{WadData, WadError};
use wad::lumps::{WadBlockMap, WadThing};

use crate::LevelError;
use crate::map_defs::{
    BBox, LineDef, Node, NodeChild, SegDirection, Sector, Segment, SideDef, SubSector,
};

/// The smallest vector and the largest vertex, combined make up a
/// rectangle enclosing the level area
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapExtents {
    pub min_vertex: Vec2,
    pub max_vertex: Vec2,
    pub width: f32,
    pub height: f32,
}

/// Check an index read from one lump against the length of the array it
/// points in to
fn check_ref(
    from: &'static str,
    index: usize,
    to: &'static str,
    id: usize,
    len: usize,
) -> Result<usize, LevelError> {
    if id >= len {
        return Err(LevelError::DanglingReference {
            from,
            index,
            to,
            id,
            len,
        });
    }
    Ok(id)
}

fn not_empty<T>(items: Vec<T>, what: &'static str) -> Result<Vec<T>, LevelError> {
    if items.is_empty() {
        return Err(LevelError::EmptyLump(what));
    }
    Ok(items)
}

/// A `Map` contains everything required for building the actual level the
/// player will see: the geometry, the BSP tree over it, and the `Things`.
///
/// Every cross reference is an index in to one of the arrays here. They are
/// all checked when the map is loaded, and nothing is mutated afterwards.
///
/// `nodes`, `subsectors`, and `segments` are what get used most to render the
/// basic level
#[derive(Debug, Default, Clone)]
pub struct MapData {
    name: String,
    things: Vec<WadThing>,
    vertexes: Vec<Vec2>,
    linedefs: Vec<LineDef>,
    sectors: Vec<Sector>,
    sidedefs: Vec<SideDef>,
    subsectors: Vec<SubSector>,
    segments: Vec<Segment>,
    nodes: Vec<Node>,
    reject: Option<Vec<u8>>,
    blockmap: Option<WadBlockMap>,
    extents: MapExtents,
}

impl MapData {
    /// Decode and resolve a map. Order matters here: sectors first, then the
    /// sidedefs facing them, the linedefs using those, and finally the segs
    /// and the tree over them.
    pub fn load(map_name: &str, wad: &WadData) -> Result<MapData, LevelError> {
        let mut map = MapData {
            name: map_name.to_owned(),
            ..MapData::default()
        };

        map.things = wad
            .thing_iter(map_name)?
            .collect::<Result<Vec<_>, WadError>>()?;
        info!("{}: Loaded {} things", map_name, map.things.len());

        map.load_vertexes(wad)?;
        map.load_sectors(wad)?;
        map.load_sidedefs(wad)?;
        map.load_linedefs(wad)?;
        map.load_segments(wad)?;
        map.load_subsectors(wad)?;
        // Should always be last to ensure child indexes can be checked
        map.load_nodes(wad)?;

        map.blockmap = wad.read_blockmap(map_name)?;
        if let Some(bm) = &map.blockmap {
            info!(
                "{}: Loaded blockmap, {} blocks",
                map_name,
                bm.offsets.len()
            );
        }
        map.reject = wad.read_rejects(map_name)?;
        if let Some(reject) = &map.reject {
            info!("{}: Loaded {} reject bytes", map_name, reject.len());
        }

        map.set_extents();
        Ok(map)
    }

    fn load_vertexes(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let vertexes = wad
            .vertex_iter(&self.name)?
            .map(|v| v.map(|v| Vec2::new(v.x as f32, v.y as f32)))
            .collect::<Result<Vec<_>, _>>()?;
        self.vertexes = not_empty(vertexes, "vertexes")?;
        info!("{}: Loaded {} vertexes", self.name, self.vertexes.len());
        Ok(())
    }

    fn load_sectors(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let mut sectors = Vec::new();
        for (num, s) in wad.sector_iter(&self.name)?.enumerate() {
            let s = s?;
            sectors.push(Sector {
                num,
                floorheight: s.floor_height as f32,
                ceilingheight: s.ceil_height as f32,
                floor_tex: s.floor_tex,
                ceil_tex: s.ceil_tex,
                lightlevel: s.light_level,
                special: s.kind,
                tag: s.tag,
            });
        }
        self.sectors = not_empty(sectors, "sectors")?;
        info!("{}: Loaded {} sectors", self.name, self.sectors.len());
        Ok(())
    }

    fn load_sidedefs(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let mut sidedefs = Vec::new();
        for (i, s) in wad.sidedef_iter(&self.name)?.enumerate() {
            let s = s?;
            let sector = check_ref("sidedef", i, "sector", s.sector as usize, self.sectors.len())?;
            sidedefs.push(SideDef {
                textureoffset: s.x_offset as f32,
                rowoffset: s.y_offset as f32,
                upper_tex: s.upper_tex,
                lower_tex: s.lower_tex,
                middle_tex: s.middle_tex,
                sector,
            });
        }
        self.sidedefs = not_empty(sidedefs, "sidedefs")?;
        info!("{}: Loaded {} sidedefs", self.name, self.sidedefs.len());
        Ok(())
    }

    fn load_linedefs(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let vlen = self.vertexes.len();
        let slen = self.sidedefs.len();
        let mut linedefs = Vec::new();

        for (i, l) in wad.linedef_iter(&self.name)?.enumerate() {
            let l = l?;
            let start_vertex = check_ref("linedef", i, "vertex", l.start_vertex as usize, vlen)?;
            let end_vertex = check_ref("linedef", i, "vertex", l.end_vertex as usize, vlen)?;
            let front_sidedef = l
                .front_sidedef
                .map(|s| check_ref("linedef", i, "sidedef", s as usize, slen))
                .transpose()?;
            let back_sidedef = l
                .back_sidedef
                .map(|s| check_ref("linedef", i, "sidedef", s as usize, slen))
                .transpose()?;

            let v1 = self.vertexes[start_vertex];
            let v2 = self.vertexes[end_vertex];
            linedefs.push(LineDef {
                start_vertex,
                end_vertex,
                v1,
                v2,
                delta: v2 - v1,
                flags: l.flags,
                special: l.special,
                tag: l.sector_tag,
                bbox: BBox::new(v1, v2),
                front_sidedef,
                back_sidedef,
            });
        }
        self.linedefs = not_empty(linedefs, "linedefs")?;
        info!("{}: Loaded {} linedefs", self.name, self.linedefs.len());
        Ok(())
    }

    fn load_segments(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let vlen = self.vertexes.len();
        let llen = self.linedefs.len();
        let mut segments = Vec::new();

        for (i, s) in wad.segment_iter(&self.name)?.enumerate() {
            let s = s?;
            let start_vertex = check_ref("seg", i, "vertex", s.start_vertex as usize, vlen)?;
            let end_vertex = check_ref("seg", i, "vertex", s.end_vertex as usize, vlen)?;
            let linedef_id = check_ref("seg", i, "linedef", s.linedef as usize, llen)?;
            let linedef = &self.linedefs[linedef_id];
            let direction = SegDirection::from_raw(s.direction);

            let (right_side, left_side) = match direction {
                SegDirection::Same => (linedef.front_sidedef, linedef.back_sidedef),
                SegDirection::Opposite => (linedef.back_sidedef, linedef.front_sidedef),
            };
            let side_sector = |side: Option<usize>| side.map(|s| self.sidedefs[s].sector);

            if right_side.is_none() {
                warn!("{}: seg {} has no sidedef on its right", self.name, i);
            }

            segments.push(Segment {
                start_vertex,
                end_vertex,
                v1: self.vertexes[start_vertex],
                v2: self.vertexes[end_vertex],
                offset: s.offset as f32,
                angle: Angle::from_bam(s.angle),
                linedef: linedef_id,
                direction,
                sidedef: right_side.or(left_side),
                right_sector: side_sector(right_side),
                left_sector: side_sector(left_side),
            });
        }
        self.segments = not_empty(segments, "segs")?;
        info!("{}: Generated {} segments", self.name, self.segments.len());
        Ok(())
    }

    fn load_subsectors(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let seg_len = self.segments.len();
        let mut subsectors = Vec::new();

        for (i, s) in wad.subsector_iter(&self.name)?.enumerate() {
            let s = s?;
            let start_seg = s.start_seg as usize;
            let seg_count = s.seg_count as usize;
            // The last seg in the run must exist
            if seg_count > 0 {
                check_ref("subsector", i, "seg", start_seg + seg_count - 1, seg_len)?;
            } else {
                debug!("{}: subsector {} has no segs", self.name, i);
            }

            subsectors.push(SubSector {
                sector: self.segments.get(start_seg).and_then(|seg| seg.right_sector),
                seg_count,
                start_seg,
            });
        }
        self.subsectors = not_empty(subsectors, "subsectors")?;
        info!("{}: Loaded {} subsectors", self.name, self.subsectors.len());
        Ok(())
    }

    fn load_nodes(&mut self, wad: &WadData) -> Result<(), LevelError> {
        let mut nodes = Vec::new();
        for n in wad.node_iter(&self.name)? {
            let n = n?;
            nodes.push(Node {
                xy: Vec2::new(n.x as f32, n.y as f32),
                delta: Vec2::new(n.dx as f32, n.dy as f32),
                bboxes: [BBox::from_raw(n.bboxes[0]), BBox::from_raw(n.bboxes[1])],
                children: [
                    NodeChild::from_raw(n.children[0]),
                    NodeChild::from_raw(n.children[1]),
                ],
            });
        }

        for (i, node) in nodes.iter().enumerate() {
            for child in node.children {
                match child {
                    NodeChild::Node(id) => {
                        check_ref("node", i, "node", id, nodes.len())?;
                        // Children are written before their parents, which
                        // also rules out cycles
                        if id >= i {
                            return Err(LevelError::NodeOrder { node: i, child: id });
                        }
                    }
                    NodeChild::SubSector(id) => {
                        check_ref("node", i, "subsector", id, self.subsectors.len())?;
                    }
                }
            }
        }
        self.nodes = nodes;
        info!("{}: Loaded {} bsp nodes", self.name, self.nodes.len());
        Ok(())
    }

    fn set_extents(&mut self) {
        // set the min/max to first vertex so we have a baseline
        // that isn't 0 causing comparison issues, eg; if it's 0,
        // then a min vertex of -3542 won't be set since it's negative
        let Some(first) = self.vertexes.first() else {
            return;
        };
        let mut min = *first;
        let mut max = *first;
        for v in &self.vertexes {
            min = min.min(*v);
            max = max.max(*v);
        }
        self.extents = MapExtents {
            min_vertex: min,
            max_vertex: max,
            width: max.x - min.x,
            height: max.y - min.y,
        };
        debug!("{}: extents {:?}", self.name, self.extents);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn things(&self) -> &[WadThing] {
        &self.things
    }

    pub fn vertexes(&self) -> &[Vec2] {
        &self.vertexes
    }

    pub fn linedefs(&self) -> &[LineDef] {
        &self.linedefs
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sidedefs(&self) -> &[SideDef] {
        &self.sidedefs
    }

    pub fn subsectors(&self) -> &[SubSector] {
        &self.subsectors
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get_nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get_map_extents(&self) -> &MapExtents {
        &self.extents
    }

    pub fn get_devils_rejects(&self) -> Option<&[u8]> {
        self.reject.as_deref()
    }

    pub fn blockmap(&self) -> Option<&WadBlockMap> {
        self.blockmap.as_ref()
    }

    /// The root of the BSP tree is the last node. A map with no nodes is a
    /// single subsector.
    pub fn start_node(&self) -> NodeChild {
        match self.nodes.len() {
            0 => NodeChild::SubSector(0),
            n => NodeChild::Node(n - 1),
        }
    }

    /// The segs lining a subsector
    pub fn subsector_segs(&self, subsector: usize) -> &[Segment] {
        &self.segments[self.subsectors[subsector].seg_range()]
    }

    /// Recursive descent from the root, calling `visit` with every subsector
    /// in front to back order as seen from `point`. At each node the side
    /// `point` is on is walked first. Returns the count of nodes visited.
    pub fn bsp_front_to_back(&self, point: Vec2, visit: &mut impl FnMut(usize)) -> usize {
        let mut count = 0;
        self.walk_child(self.start_node(), point, visit, &mut count);
        count
    }

    fn walk_child(
        &self,
        child: NodeChild,
        point: Vec2,
        visit: &mut impl FnMut(usize),
        count: &mut usize,
    ) {
        match child {
            NodeChild::SubSector(id) => visit(id),
            NodeChild::Node(id) => {
                *count += 1;
                let node = &self.nodes[id];
                let side = node.point_on_side(&point);
                self.walk_child(node.children[side], point, visit, count);
                self.walk_child(node.children[side ^ 1], point, visit, count);
            }
        }
    }

    /// Descend the near side only to find which subsector holds the point.
    ///
    /// Doom function name `R_PointInSubsector`
    pub fn subsector_at(&self, point: Vec2) -> usize {
        let mut child = self.start_node();
        loop {
            match child {
                NodeChild::SubSector(id) => return id,
                NodeChild::Node(id) => {
                    let node = &self.nodes[id];
                    child = node.children[node.point_on_side(&point)];
                }
            }
        }
    }

    /// The sector `point` is in, if its subsector faces one
    pub fn sector_at(&self, point: Vec2) -> Option<&Sector> {
        self.subsectors[self.subsector_at(point)]
            .sector
            .map(|s| &self.sectors[s])
    }

    /// The first thing of this type
    pub fn thing_by_kind(&self, kind: u16) -> Option<&WadThing> {
        self.things.iter().find(|t| t.kind == kind)
    }

    /// Position and facing of the first thing of type `kind`, used to place
    /// the camera
    pub fn player_start(&self, kind: u16) -> Option<(Vec2, Angle)> {
        self.thing_by_kind(kind)
            .map(|t| (Vec2::new(t.x as f32, t.y as f32), Angle::new(t.angle as f32)))
    }
}
