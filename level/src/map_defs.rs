use glam::Vec2;
use math::Angle;

/// The flags control some attributes of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDefFlags {
    /// Players and monsters cannot cross this line. Note that
    /// if there is no sector on the other side, they can't go through the line
    /// anyway, regardless of the flags
    Blocking = 1,
    /// Monsters cannot cross this line
    BlockMonsters = 1 << 1,
    /// The linedef's two sidedefs can have "-" as a texture,
    /// which in this case means "transparent". If this flag is not set, the
    /// sidedefs can't be transparent
    TwoSided = 1 << 2,
    /// The upper texture is pasted onto the wall from
    /// the top down instead of from the bottom up like usual
    UnpegTop = 1 << 3,
    /// Lower and middle textures are drawn from the
    /// bottom up, instead of from the top down like usual
    UnpegBottom = 1 << 4,
    /// On the automap, this line appears in red like a normal
    /// solid wall that has nothing on the other side
    Secret = 1 << 5,
    /// Blocks sound traveling out of this sector through this line
    BlockSound = 1 << 6,
    /// Not on AutoMap
    DontDraw = 1 << 7,
    /// Already on AutoMap
    Draw = 1 << 8,
}

impl LineDefFlags {
    #[inline]
    pub const fn is_set(self, flags: u16) -> bool {
        flags & self as u16 != 0
    }
}

/// The SECTORS record, at runtime
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    /// Index in to the map's sector array
    pub num: usize,
    pub floorheight: f32,
    pub ceilingheight: f32,
    pub floor_tex: String,
    pub ceil_tex: String,
    pub lightlevel: u16,
    pub special: u16,
    pub tag: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SideDef {
    // add this to the calculated texture column
    pub textureoffset: f32,
    // add this to the calculated texture top
    pub rowoffset: f32,
    pub upper_tex: String,
    pub lower_tex: String,
    pub middle_tex: String,
    /// Sector the SideDef is facing
    pub sector: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BBox {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl BBox {
    pub fn new(v1: Vec2, v2: Vec2) -> Self {
        BBox {
            top: v1.y.max(v2.y),
            bottom: v1.y.min(v2.y),
            left: v1.x.min(v2.x),
            right: v1.x.max(v2.x),
        }
    }

    /// From a node record's `[top, bottom, left, right]`
    pub fn from_raw(raw: [i16; 4]) -> Self {
        BBox {
            top: raw[0] as f32,
            bottom: raw[1] as f32,
            left: raw[2] as f32,
            right: raw[3] as f32,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineDef {
    pub start_vertex: usize,
    pub end_vertex: usize,
    // Vertices, from v1 to v2.
    pub v1: Vec2,
    pub v2: Vec2,
    // Precalculated v2 - v1 for side checking.
    pub delta: Vec2,
    /// See `LineDefFlags`
    pub flags: u16,
    pub special: u16,
    pub tag: u16,
    pub bbox: BBox,
    /// The right side
    pub front_sidedef: Option<usize>,
    /// The left side, absent on one-sided walls
    pub back_sidedef: Option<usize>,
}

impl LineDef {
    pub fn is_two_sided(&self) -> bool {
        LineDefFlags::TwoSided.is_set(self.flags) || self.back_sidedef.is_some()
    }
}

/// The direction a seg runs along its linedef
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegDirection {
    /// Same winding as the linedef, the seg's right is the linedef's front
    Same,
    /// Opposite winding, the seg's right is the linedef's back
    Opposite,
}

impl SegDirection {
    pub fn from_raw(raw: u16) -> Self {
        if raw == 0 {
            SegDirection::Same
        } else {
            SegDirection::Opposite
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_vertex: usize,
    pub end_vertex: usize,
    // Vertices, from v1 to v2.
    pub v1: Vec2,
    pub v2: Vec2,
    /// Offset distance along the linedef (from `start_vertex`) to the start
    /// of this `Segment`
    pub offset: f32,
    /// The slope of the seg, converted from BAM
    pub angle: Angle,
    /// The Linedef this segment travels along
    pub linedef: usize,
    pub direction: SegDirection,
    /// The sidedef facing the seg's right, falling back to whichever side
    /// the linedef has
    pub sidedef: Option<usize>,
    pub right_sector: Option<usize>,
    /// `None` means a one-sided, fully solid wall
    pub left_sector: Option<usize>,
}

impl Segment {
    pub fn is_solid(&self) -> bool {
        self.left_sector.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubSector {
    /// Sector of the first seg, if it faces one
    pub sector: Option<usize>,
    /// How many `Segment`s line this `SubSector`
    pub seg_count: usize,
    /// The `Segment` to start with
    pub start_seg: usize,
}

impl SubSector {
    pub fn seg_range(&self) -> std::ops::Range<usize> {
        self.start_seg..self.start_seg + self.seg_count
    }
}

/// One side of a BSP split. Decoded once from the raw child index, where the
/// high bit marks a subsector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChild {
    Node(usize),
    SubSector(usize),
}

pub(crate) const IS_SSECTOR_MASK: u16 = 0x8000;

impl NodeChild {
    pub fn from_raw(raw: u16) -> Self {
        if raw & IS_SSECTOR_MASK != 0 {
            NodeChild::SubSector((raw & !IS_SSECTOR_MASK) as usize)
        } else {
            NodeChild::Node(raw as usize)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Where the line used for splitting the level starts
    pub xy: Vec2,
    /// Where the line used for splitting the level ends
    pub delta: Vec2,
    /// `[right, left]`
    pub bboxes: [BBox; 2],
    /// `[right, left]`
    pub children: [NodeChild; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_flags_enum() {
        // upper and lower unpegged, twosided, blocking
        let flags = 29;
        assert!(LineDefFlags::TwoSided.is_set(flags));
        assert!(LineDefFlags::Blocking.is_set(flags));
        assert!(!LineDefFlags::BlockMonsters.is_set(flags));
        assert!(LineDefFlags::UnpegBottom.is_set(flags));
    }

    #[test]
    fn child_decoding() {
        assert_eq!(NodeChild::from_raw(0x8003), NodeChild::SubSector(3));
        assert_eq!(NodeChild::from_raw(0x8000), NodeChild::SubSector(0));
        assert_eq!(NodeChild::from_raw(12), NodeChild::Node(12));
        assert_eq!(NodeChild::from_raw(0x7FFF), NodeChild::Node(0x7FFF));
    }

    #[test]
    fn bbox() {
        let b = BBox::new(Vec2::new(256.0, 0.0), Vec2::new(0.0, 128.0));
        assert_eq!(b.left, 0.0);
        assert_eq!(b.top, 128.0);
        assert_eq!(BBox::from_raw([128, 0, -64, 64]).width(), 128.0);
    }
}
