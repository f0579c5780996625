//! Raw lump records, exactly as stored in the WAD. Indexes are left as
//! indexes here; resolving them in to a connected map is the job of the
//! level loader.

use crate::WadError;
use crate::wad::{check_len, read_i16, read_name, read_u16, write_name};

/// Value of a sidedef reference in a linedef when that side is not present
pub const NO_SIDEDEF: u16 = 0xFFFF;

/// A fixed size little-endian record in a lump
pub trait WadLumpRecord: Sized {
    /// Size in bytes of one record
    const SIZE: usize;
    /// Used in decode errors
    const WHAT: &'static str;

    /// Decode one record from `data` starting at `offset`. Fails if fewer
    /// than `SIZE` bytes are available.
    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError>;

    /// Encode the record, the inverse of `read_le`
    fn write_le(&self, out: &mut Vec<u8>);
}

fn write_i16(v: i16, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn write_u16(v: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// A `Thing` describes only the position, type, and angle + spawn flags
///
/// The data in the WAD lump is structured as follows:
///
/// | Field Size | Data Type | Content    |
/// |------------|-----------|------------|
/// |  0x00-0x01 |    i16    | X Position |
/// |  0x02-0x03 |    i16    | Y Position |
/// |  0x04-0x05 |    u16    | Angle      |
/// |  0x06-0x07 |    u16    | Type       |
/// |  0x08-0x09 |    u16    | Flags      |
///
/// Each `Thing` record is 10 bytes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WadThing {
    pub x: i16,
    pub y: i16,
    /// Facing in degrees, 0 is east, counter-clockwise
    pub angle: u16,
    pub kind: u16,
    pub flags: u16,
}

impl WadThing {
    pub fn new(x: i16, y: i16, angle: u16, kind: u16, flags: u16) -> WadThing {
        WadThing {
            x,
            y,
            angle,
            kind,
            flags,
        }
    }
}

impl WadLumpRecord for WadThing {
    const SIZE: usize = 10;
    const WHAT: &'static str = "thing";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadThing::new(
            read_i16(data, offset),
            read_i16(data, offset + 2),
            read_u16(data, offset + 4),
            read_u16(data, offset + 6),
            read_u16(data, offset + 8),
        ))
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_i16(self.x, out);
        write_i16(self.y, out);
        write_u16(self.angle, out);
        write_u16(self.kind, out);
        write_u16(self.flags, out);
    }
}

/// A `Vertex` is the basic struct used for any type of coordinate
/// in the game
///
/// | Field Size | Data Type | Content      |
/// |------------|-----------|--------------|
/// |  0x00-0x01 |    i16    | X Coordinate |
/// |  0x02-0x03 |    i16    | Y Coordinate |
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct WadVertex {
    pub x: i16,
    pub y: i16,
}

impl WadVertex {
    pub fn new(x: i16, y: i16) -> WadVertex {
        WadVertex { x, y }
    }
}

impl WadLumpRecord for WadVertex {
    const SIZE: usize = 4;
    const WHAT: &'static str = "vertex";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadVertex::new(read_i16(data, offset), read_i16(data, offset + 2)))
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_i16(self.x, out);
        write_i16(self.y, out);
    }
}

/// Each linedef represents a line from one of the VERTEXES to another.
///
///| Field Size | Data Type      | Content                                   |
///|------------|----------------|-------------------------------------------|
///|  0x00-0x01 | Unsigned short | Start vertex                              |
///|  0x02-0x03 | Unsigned short | End vertex                                |
///|  0x04-0x05 | Unsigned short | Flags                                     |
///|  0x06-0x07 | Unsigned short | Line type / Action                        |
///|  0x08-0x09 | Unsigned short | Sector tag                                |
///|  0x0A-0x0B | Unsigned short | Front sidedef ( 0xFFFF side not present ) |
///|  0x0C-0x0D | Unsigned short | Back sidedef  ( 0xFFFF side not present ) |
///
/// Each linedef's record is 14 bytes
///
/// If you imagine a linedef starting from the bottom of the screen travelling
/// upwards then the right side of this line is the first side (the front).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadLineDef {
    /// The line starts from this point
    pub start_vertex: u16,
    /// The line ends at this point
    pub end_vertex: u16,
    /// The line attributes, see `LineDefFlags`
    pub flags: u16,
    pub special: u16,
    /// This is a number which ties this line's effect type
    /// to all SECTORS that have the same tag number
    pub sector_tag: u16,
    /// The front (right) `SideDef` for this line
    pub front_sidedef: Option<u16>,
    /// The back (left) `SideDef` for this line
    pub back_sidedef: Option<u16>,
}

impl WadLineDef {
    pub fn new(
        start_vertex: u16,
        end_vertex: u16,
        flags: u16,
        special: u16,
        sector_tag: u16,
        front_sidedef: Option<u16>,
        back_sidedef: Option<u16>,
    ) -> WadLineDef {
        WadLineDef {
            start_vertex,
            end_vertex,
            flags,
            special,
            sector_tag,
            front_sidedef,
            back_sidedef,
        }
    }
}

fn side_ref(raw: u16) -> Option<u16> {
    if raw == NO_SIDEDEF { None } else { Some(raw) }
}

impl WadLumpRecord for WadLineDef {
    const SIZE: usize = 14;
    const WHAT: &'static str = "linedef";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadLineDef::new(
            read_u16(data, offset),
            read_u16(data, offset + 2),
            read_u16(data, offset + 4),
            read_u16(data, offset + 6),
            read_u16(data, offset + 8),
            side_ref(read_u16(data, offset + 10)),
            side_ref(read_u16(data, offset + 12)),
        ))
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_u16(self.start_vertex, out);
        write_u16(self.end_vertex, out);
        write_u16(self.flags, out);
        write_u16(self.special, out);
        write_u16(self.sector_tag, out);
        write_u16(self.front_sidedef.unwrap_or(NO_SIDEDEF), out);
        write_u16(self.back_sidedef.unwrap_or(NO_SIDEDEF), out);
    }
}

/// The Segments (SEGS) are in a sequential order determined by the `SubSector`
/// (SSECTOR), which are part of the NODES recursive tree
///
/// | Field Size | Data Type | Content                              |
/// |------------|-----------|--------------------------------------|
/// |  0x00-0x01 |    u16    | Index to vertex the line starts from |
/// |  0x02-0x03 |    u16    | Index to vertex the line ends with   |
/// |  0x04-0x05 |    u16    | Angle in Binary Angle Measurement (BAMS) |
/// |  0x06-0x07 |    u16    | Index to the linedef this seg travels along|
/// |  0x08-0x09 |    u16    | Direction along line. 0 == SEG is on the right and follows the line, 1 == SEG travels in opposite direction |
/// |  0x0A-0x0B |    i16    | Offset: this is the distance along the linedef this seg starts at |
///
/// Each `Segment` record is 12 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSegment {
    pub start_vertex: u16,
    pub end_vertex: u16,
    /// Binary Angle Measurement, the full circle is 65536
    pub angle: u16,
    /// The Linedef this segment travels along
    pub linedef: u16,
    /// 0 = same direction as the linedef, 1 = opposite
    pub direction: u16,
    /// Offset distance along the linedef (from `start_vertex`) to the start
    /// of this `Segment`
    pub offset: i16,
}

impl WadSegment {
    pub fn new(
        start_vertex: u16,
        end_vertex: u16,
        angle: u16,
        linedef: u16,
        direction: u16,
        offset: i16,
    ) -> WadSegment {
        WadSegment {
            start_vertex,
            end_vertex,
            angle,
            linedef,
            direction,
            offset,
        }
    }
}

impl WadLumpRecord for WadSegment {
    const SIZE: usize = 12;
    const WHAT: &'static str = "seg";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadSegment::new(
            read_u16(data, offset),
            read_u16(data, offset + 2),
            read_u16(data, offset + 4),
            read_u16(data, offset + 6),
            read_u16(data, offset + 8),
            read_i16(data, offset + 10),
        ))
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_u16(self.start_vertex, out);
        write_u16(self.end_vertex, out);
        write_u16(self.angle, out);
        write_u16(self.linedef, out);
        write_u16(self.direction, out);
        write_i16(self.offset, out);
    }
}

/// A `SubSector` divides up all the SECTORS into convex polygons. They are
/// then referenced through the NODES resources. There will be (number of
/// nodes) + 1.
///
/// | Field Size | Data Type | Content                            |
/// |------------|-----------|------------------------------------|
/// |  0x00-0x01 |    u16    | How many segments line this sector |
/// |  0x02-0x03 |    u16    | Index to the starting segment      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSubSector {
    pub seg_count: u16,
    pub start_seg: u16,
}

impl WadSubSector {
    pub fn new(seg_count: u16, start_seg: u16) -> WadSubSector {
        WadSubSector {
            seg_count,
            start_seg,
        }
    }
}

impl WadLumpRecord for WadSubSector {
    const SIZE: usize = 4;
    const WHAT: &'static str = "subsector";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadSubSector::new(
            read_u16(data, offset),
            read_u16(data, offset + 2),
        ))
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_u16(self.seg_count, out);
        write_u16(self.start_seg, out);
    }
}

/// A `Sector` is a horizontal area of the level where a floor height and
/// ceiling height is defined.
///
/// | Field Size | Data Type | Content              |
/// |------------|-----------|----------------------|
/// |  0x00-0x01 |    i16    | Floor height         |
/// |  0x02-0x03 |    i16    | Ceiling height       |
/// |  0x04-0x0B |  8 ASCII  | Floor texture name   |
/// |  0x0C-0x13 |  8 ASCII  | Ceiling texture name |
/// |  0x14-0x15 |    u16    | Light level          |
/// |  0x16-0x17 |    u16    | Special type         |
/// |  0x18-0x19 |    u16    | Tag                  |
///
/// Each `Sector` record is 26 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSector {
    pub floor_height: i16,
    pub ceil_height: i16,
    pub floor_tex: String,
    pub ceil_tex: String,
    /// Light level from 0-255
    pub light_level: u16,
    pub kind: u16,
    /// a "tag" number corresponding to LINEDEF(s) with the same tag number
    pub tag: u16,
}

impl WadLumpRecord for WadSector {
    const SIZE: usize = 26;
    const WHAT: &'static str = "sector";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadSector {
            floor_height: read_i16(data, offset),
            ceil_height: read_i16(data, offset + 2),
            floor_tex: read_name(data, offset + 4)?,
            ceil_tex: read_name(data, offset + 12)?,
            light_level: read_u16(data, offset + 20),
            kind: read_u16(data, offset + 22),
            tag: read_u16(data, offset + 24),
        })
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_i16(self.floor_height, out);
        write_i16(self.ceil_height, out);
        write_name(&self.floor_tex, out);
        write_name(&self.ceil_tex, out);
        write_u16(self.light_level, out);
        write_u16(self.kind, out);
        write_u16(self.tag, out);
    }
}

/// A sidedef is a definition of what wall texture(s) to draw along a
/// `LineDef`, and a group of sidedefs outline the space of a `Sector`
///
/// | Field Size | Data Type | Content                 |
/// |------------|-----------|-------------------------|
/// |  0x00-0x01 |    i16    | X offset                |
/// |  0x02-0x03 |    i16    | Y offset                |
/// |  0x04-0x0B |  8 ASCII  | Upper texture name      |
/// |  0x0C-0x13 |  8 ASCII  | Lower texture name      |
/// |  0x14-0x1B |  8 ASCII  | Middle texture name     |
/// |  0x1C-0x1D |    u16    | Sector this side faces  |
///
/// Each `SideDef` record is 30 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSideDef {
    pub x_offset: i16,
    pub y_offset: i16,
    /// Name of upper texture used for example in the upper of a window
    pub upper_tex: String,
    /// Name of lower texture used for example in the front of a step
    pub lower_tex: String,
    /// The regular part of a wall
    pub middle_tex: String,
    /// Sector that this sidedef faces or helps to surround
    pub sector: u16,
}

impl WadLumpRecord for WadSideDef {
    const SIZE: usize = 30;
    const WHAT: &'static str = "sidedef";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        Ok(WadSideDef {
            x_offset: read_i16(data, offset),
            y_offset: read_i16(data, offset + 2),
            upper_tex: read_name(data, offset + 4)?,
            lower_tex: read_name(data, offset + 12)?,
            middle_tex: read_name(data, offset + 20)?,
            sector: read_u16(data, offset + 28),
        })
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_i16(self.x_offset, out);
        write_i16(self.y_offset, out);
        write_name(&self.upper_tex, out);
        write_name(&self.lower_tex, out);
        write_name(&self.middle_tex, out);
        write_u16(self.sector, out);
    }
}

/// The base node structure as parsed from the WAD records. What is stored in
/// the WAD is the splitting line used for splitting the level/node, a box
/// which encapsulates the right and left regions of the split, and the index
/// numbers for right and left children of the node.
///
/// **The last node is the root node**
///
/// | Field Size | Content                                          |
/// |------------|--------------------------------------------------|
/// | 0x00-0x01  | X coordinate of the splitter                     |
/// | 0x02-0x03  | Y coordinate of the splitter                     |
/// | 0x04-0x05  | The amount to move in X to reach end of splitter |
/// | 0x06-0x07  | The amount to move in Y to reach end of splitter |
/// | 0x08-0x0F  | Right (Front) box: top, bottom, left, right      |
/// | 0x10-0x17  | Left (Back) box: top, bottom, left, right        |
/// | 0x18-0x19  | Right (Front) child index + sub-sector indicator |
/// | 0x1A-0x1B  | Left (Back) child index + sub-sector indicator   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadNode {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    /// `[right, left]`, each `[top, bottom, left, right]`
    pub bboxes: [[i16; 4]; 2],
    /// `[right, left]`. If the high bit is set the rest is a subsector index
    pub children: [u16; 2],
}

impl WadLumpRecord for WadNode {
    const SIZE: usize = 28;
    const WHAT: &'static str = "node";

    fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::SIZE, Self::WHAT)?;
        let bbox = |o: usize| {
            [
                read_i16(data, o),
                read_i16(data, o + 2),
                read_i16(data, o + 4),
                read_i16(data, o + 6),
            ]
        };
        Ok(WadNode {
            x: read_i16(data, offset),
            y: read_i16(data, offset + 2),
            dx: read_i16(data, offset + 4),
            dy: read_i16(data, offset + 6),
            bboxes: [bbox(offset + 8), bbox(offset + 16)],
            children: [read_u16(data, offset + 24), read_u16(data, offset + 26)],
        })
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        write_i16(self.x, out);
        write_i16(self.y, out);
        write_i16(self.dx, out);
        write_i16(self.dy, out);
        for bbox in self.bboxes.iter() {
            for v in bbox {
                write_i16(*v, out);
            }
        }
        write_u16(self.children[0], out);
        write_u16(self.children[1], out);
    }
}

/// The `BLOCKMAP` is a pre-calculated structure that the game engine uses to
/// simplify collision-detection between moving things and walls. Only the
/// header and offset table are decoded, the blocklists stay raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadBlockMap {
    /// Leftmost X coord
    pub x_origin: i16,
    /// Bottommost Y coord
    pub y_origin: i16,
    pub columns: u16,
    pub rows: u16,
    /// Offset in 16-bit words from the lump start to each block's line list
    pub offsets: Vec<u16>,
}

impl WadBlockMap {
    const HEADER_SIZE: usize = 8;

    pub fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, Self::HEADER_SIZE, "blockmap header")?;
        let columns = read_u16(data, offset + 4);
        let rows = read_u16(data, offset + 6);
        let count = columns as usize * rows as usize;
        let table = offset + Self::HEADER_SIZE;
        check_len(data, table, count * 2, "blockmap offsets")?;

        Ok(WadBlockMap {
            x_origin: read_i16(data, offset),
            y_origin: read_i16(data, offset + 2),
            columns,
            rows,
            offsets: (0..count).map(|i| read_u16(data, table + i * 2)).collect(),
        })
    }
}
