//! Small hand built maps for tests. `SquareRoom` is a 256 unit square room
//! with one sector, four one-sided walls, and a player start in the middle
//! facing east. Fields are public so a test can break one thing at a time.

use wad::lumps::*;
use wad::{MapLump, WadBuilder};

pub const SQUARE_MAP: &str = "E1M1";

/// Middle textures of the west, north, east, and south walls
pub const WALL_TEXTURES: [&str; 4] = ["STARTAN3", "BROWN1", "COMPTALL", "GRAY1"];

pub fn sector(floor: i16, ceiling: i16) -> WadSector {
    WadSector {
        floor_height: floor,
        ceil_height: ceiling,
        floor_tex: "FLOOR4_8".to_owned(),
        ceil_tex: "CEIL3_5".to_owned(),
        light_level: 160,
        kind: 0,
        tag: 0,
    }
}

pub fn sidedef(middle: &str) -> WadSideDef {
    WadSideDef {
        x_offset: 0,
        y_offset: 0,
        upper_tex: "-".to_owned(),
        lower_tex: "-".to_owned(),
        middle_tex: middle.to_owned(),
        sector: 0,
    }
}

#[derive(Debug, Clone)]
pub struct SquareRoom {
    pub things: Vec<WadThing>,
    pub vertexes: Vec<WadVertex>,
    pub linedefs: Vec<WadLineDef>,
    pub sidedefs: Vec<WadSideDef>,
    pub sectors: Vec<WadSector>,
    pub segs: Vec<WadSegment>,
    pub subsectors: Vec<WadSubSector>,
    pub nodes: Vec<WadNode>,
    /// Write the SEGS lump where VERTEXES belongs and vice versa
    pub swap_vertexes_and_segs: bool,
    /// Junk bytes added to the end of the NODES lump
    pub trailing_node_bytes: usize,
}

impl Default for SquareRoom {
    fn default() -> Self {
        let vertexes = vec![
            WadVertex::new(0, 0),
            WadVertex::new(0, 256),
            WadVertex::new(256, 256),
            WadVertex::new(256, 0),
        ];
        // Clockwise, so the front (right) side of each faces in to the room
        let linedefs = (0..4u16)
            .map(|i| WadLineDef::new(i, (i + 1) % 4, 1, 0, 0, Some(i), None))
            .collect();
        let sidedefs = WALL_TEXTURES.iter().map(|t| sidedef(t)).collect();
        // west heads north, north heads east, east heads south, south heads west
        let angles = [0x4000, 0, 0xC000, 0x8000];
        let segs = (0..4u16)
            .map(|i| WadSegment::new(i, (i + 1) % 4, angles[i as usize], i, 0, 0))
            .collect();

        SquareRoom {
            things: vec![
                WadThing::new(128, 128, 0, 1, 7),
                WadThing::new(200, 64, 90, 3004, 7),
            ],
            vertexes,
            linedefs,
            sidedefs,
            sectors: vec![sector(0, 128)],
            segs,
            // north-west triangle (west and north walls), south-east triangle
            subsectors: vec![WadSubSector::new(2, 0), WadSubSector::new(2, 2)],
            // diagonal from the south-west corner: right is south-east
            nodes: vec![WadNode {
                x: 0,
                y: 0,
                dx: 256,
                dy: 256,
                bboxes: [[256, 0, 0, 256], [256, 0, 0, 256]],
                children: [0x8001, 0x8000],
            }],
            swap_vertexes_and_segs: false,
            trailing_node_bytes: 0,
        }
    }
}

fn records<T: WadLumpRecord>(items: &[T]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(items.len() * T::SIZE);
    for i in items {
        i.write_le(&mut buf);
    }
    buf
}

impl SquareRoom {
    /// Encode as a PWAD with a leading non-map lump, the map marker, and all
    /// ten map lumps
    pub fn build(&self) -> Vec<u8> {
        let mut nodes = records(&self.nodes);
        nodes.extend(std::iter::repeat_n(0u8, self.trailing_node_bytes));

        // Blockmap: one 256x256 block holding every line
        let mut blockmap = Vec::new();
        for v in [0i16, 0, 1, 1, 5, 0, 0, 1, 2, 3, -1] {
            blockmap.extend_from_slice(&v.to_le_bytes());
        }

        let mut b = WadBuilder::new();
        b.add_lump("PLAYPAL", vec![0; 768]);
        b.add_marker(SQUARE_MAP);
        for lump in MapLump::ALL {
            let lump = match (self.swap_vertexes_and_segs, lump) {
                (true, MapLump::Vertexes) => MapLump::Segs,
                (true, MapLump::Segs) => MapLump::Vertexes,
                (_, l) => l,
            };
            let data = match lump {
                MapLump::Things => records(&self.things),
                MapLump::LineDefs => records(&self.linedefs),
                MapLump::SideDefs => records(&self.sidedefs),
                MapLump::Vertexes => records(&self.vertexes),
                MapLump::Segs => records(&self.segs),
                MapLump::SubSectors => records(&self.subsectors),
                MapLump::Nodes => nodes.clone(),
                MapLump::Sectors => records(&self.sectors),
                MapLump::Reject => vec![0],
                MapLump::Blockmap => blockmap.clone(),
            };
            b.add_lump(lump.tag(), data);
        }
        b.build()
    }
}

/// The default room, encoded
pub fn square_room() -> Vec<u8> {
    SquareRoom::default().build()
}
