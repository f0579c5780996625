use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::{fmt, str};

use log::{debug, info, warn};

use crate::WadError;
use crate::lumps::{WadBlockMap, WadLumpRecord};

pub const HEADER_SIZE: usize = 12;
pub const DIRECTORY_SIZE: usize = 16;
pub const NAME_SIZE: usize = 8;

/// Fails with `WadError::Decode` if `needed` bytes are not available from
/// `offset` onwards.
#[inline]
pub(crate) fn check_len(
    data: &[u8],
    offset: usize,
    needed: usize,
    what: &'static str,
) -> Result<(), WadError> {
    let available = data.len().saturating_sub(offset);
    if offset > data.len() || available < needed {
        return Err(WadError::Decode {
            what,
            offset,
            needed,
            available,
        });
    }
    Ok(())
}

/// Callers must have bounds checked with `check_len`
#[inline]
pub(crate) fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[inline]
pub(crate) fn read_i16(data: &[u8], offset: usize) -> i16 {
    read_u16(data, offset) as i16
}

#[inline]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Read an 8 byte name field. The name ends at the first NUL, anything after
/// it is padding (or junk left by old editors).
pub(crate) fn read_name(data: &[u8], offset: usize) -> Result<String, WadError> {
    check_len(data, offset, NAME_SIZE, "name")?;
    let raw = &data[offset..offset + NAME_SIZE];
    let end = raw.iter().position(|b| *b == 0).unwrap_or(NAME_SIZE);
    let name = str::from_utf8(&raw[..end]).map_err(|_| WadError::InvalidName { offset })?;
    if !name.is_ascii() {
        return Err(WadError::InvalidName { offset });
    }
    Ok(name.to_owned())
}

/// Write a name as exactly 8 bytes, NUL padded. Longer names are truncated.
pub(crate) fn write_name(name: &str, out: &mut Vec<u8>) {
    let mut n = [0u8; NAME_SIZE];
    for (slot, b) in n.iter_mut().zip(name.bytes()) {
        *slot = b;
    }
    out.extend_from_slice(&n);
}

/// The lumps that make up a map, in the order they follow the map marker.
/// The discriminant is the offset from the marker's directory index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLump {
    /// Position and angle for all monster, powerup and spawn location
    Things = 1,
    /// An array of lines referencing two vertices (Two vertexes are connected
    /// by one `LineDef`). Also points to one or two `SideDef` depending on if
    /// this line is a wall or a portal
    LineDefs,
    /// Defines upper, lower, and middle textures. Also defines texture
    /// horizontal and vertical offsets. This is information for a `LineDef`
    SideDefs,
    /// An array of signed short X, Y pairs (`Vertex`). All coordinates in this
    /// map block are indexes into this array
    Vertexes,
    /// Portions of lines cut due to Binary Space Partitioning.
    /// Each `SubSectors`'s geometry is defined by the `Segs` which it contains
    Segs,
    /// Set of segments of a `LineDef` representing a convex subspace
    SubSectors,
    /// BSP with segs, nodes and sub-sector leaves
    Nodes,
    /// Area surrounded by lines, with set ceiling and floor textures/heights
    /// with light level
    Sectors,
    /// Sector-to-sector visibility matrix to speed-up line of sight
    /// calculations
    Reject,
    /// 128x128 grid partition of the map LINEDEFS to accelerate collision
    /// detection
    Blockmap,
}

impl MapLump {
    /// The name the directory entry must carry
    pub const fn tag(&self) -> &'static str {
        match self {
            MapLump::Things => "THINGS",
            MapLump::LineDefs => "LINEDEFS",
            MapLump::SideDefs => "SIDEDEFS",
            MapLump::Vertexes => "VERTEXES",
            MapLump::Segs => "SEGS",
            MapLump::SubSectors => "SSECTORS",
            MapLump::Nodes => "NODES",
            MapLump::Sectors => "SECTORS",
            MapLump::Reject => "REJECT",
            MapLump::Blockmap => "BLOCKMAP",
        }
    }

    pub const ALL: [MapLump; 10] = [
        MapLump::Things,
        MapLump::LineDefs,
        MapLump::SideDefs,
        MapLump::Vertexes,
        MapLump::Segs,
        MapLump::SubSectors,
        MapLump::Nodes,
        MapLump::Sectors,
        MapLump::Reject,
        MapLump::Blockmap,
    ];
}

/// Header which tells us the WAD type and where the data is
///
/// The header structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                              |
/// |------------|--------------|------------------------------------------------------|
/// | 0x00-0x03  | 4 ASCII char | *Must* be an ASCII string (either "IWAD" or "PWAD")  |
/// | 0x04-0x07  | unsigned int | The number entries in the directory                  |
/// | 0x08-0x0b  | unsigned int | Offset in bytes to the directory in the WAD file     |
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WadHeader {
    /// Will be either `IWAD` for game, or `PWAD` for patch
    pub wad_type: [u8; 4],
    /// The count of "lumps" of data
    pub dir_count: u32,
    /// Offset in bytes that the directory starts at
    pub dir_offset: u32,
}

impl WadHeader {
    pub fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, HEADER_SIZE, "header")?;
        let mut wad_type = [0u8; 4];
        wad_type.copy_from_slice(&data[offset..offset + 4]);
        Ok(WadHeader {
            wad_type,
            dir_count: read_u32(data, offset + 4),
            dir_offset: read_u32(data, offset + 8),
        })
    }

    pub fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.wad_type);
        out.extend_from_slice(&self.dir_count.to_le_bytes());
        out.extend_from_slice(&self.dir_offset.to_le_bytes());
    }

    pub fn is_known_type(&self) -> bool {
        &self.wad_type == b"IWAD" || &self.wad_type == b"PWAD"
    }
}

impl fmt::Debug for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadHeader {{\n  wad_type: {},\n  dir_count: {},\n  dir_offset: {},\n}}",
            String::from_utf8_lossy(&self.wad_type),
            self.dir_count,
            self.dir_offset
        )
    }
}

/// Contains the details for a lump of data: where it starts, the size of it,
/// and the name
///
/// The directory structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                                    |
/// |------------|--------------|------------------------------------------------------------|
/// | 0x00-0x03  | unsigned int | Offset value to the start of the lump data in the WAD file |
/// | 0x04-0x07  | unsigned int | The size of the lump in bytes                              |
/// | 0x08-0x0f  | 8 ASCII char | ASCII holding the name of the lump                         |
#[derive(Clone, PartialEq, Eq)]
pub struct WadDirectory {
    /// The offset in bytes where the lump data starts
    pub lump_offset: u32,
    /// The size in bytes of the lump referenced
    pub lump_size: u32,
    /// Name for the lump data, NUL padding removed
    pub lump_name: String,
}

impl WadDirectory {
    pub fn read_le(data: &[u8], offset: usize) -> Result<Self, WadError> {
        check_len(data, offset, DIRECTORY_SIZE, "directory entry")?;
        Ok(WadDirectory {
            lump_offset: read_u32(data, offset),
            lump_size: read_u32(data, offset + 4),
            lump_name: read_name(data, offset + 8)?,
        })
    }

    pub fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.lump_offset.to_le_bytes());
        out.extend_from_slice(&self.lump_size.to_le_bytes());
        write_name(&self.lump_name, out);
    }
}

impl fmt::Debug for WadDirectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadDirectory {{\n  lump_name: {},\n  lump_size: {},\n  lump_offset: {},\n}}",
            &self.lump_name, self.lump_size, self.lump_offset
        )
    }
}

/// "Where's All (the) Data": contains the WAD in memory, plus an array of
/// directories telling us where each data lump starts
pub struct WadData {
    file_path: Option<PathBuf>,
    header: WadHeader,
    /// The WAD as an array of bytes read in to memory
    pub(crate) file_data: Vec<u8>,
    /// Tells us where each lump of data is
    dirs: Vec<WadDirectory>,
}

impl fmt::Debug for WadData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadData {{\n  file_path: {:?},\n  header: {:?},\n  dirs: {},\n}}",
            self.file_path,
            self.header,
            self.dirs.len()
        )
    }
}

impl WadData {
    /// Read the archive from disk. This is the only I/O the loader does,
    /// everything after it works on the in-memory bytes.
    pub fn new(file_path: &Path) -> Result<WadData, WadError> {
        let io_err = |source| WadError::Io {
            path: file_path.to_path_buf(),
            source,
        };
        let mut file = File::open(file_path).map_err(io_err)?;
        let file_len = file.metadata().map_err(io_err)?.len();

        let mut file_data = Vec::with_capacity(file_len as usize);
        file.read_to_end(&mut file_data).map_err(io_err)?;
        info!("Read {} bytes from {:?}", file_data.len(), file_path);

        let mut wad = Self::from_bytes(file_data)?;
        wad.file_path = Some(file_path.to_path_buf());
        Ok(wad)
    }

    /// Parse the header and directory of an archive already in memory
    pub fn from_bytes(file_data: Vec<u8>) -> Result<WadData, WadError> {
        let header = WadHeader::read_le(&file_data, 0)?;
        if !header.is_known_type() {
            return Err(WadError::BadHeader {
                magic: header.wad_type,
            });
        }
        debug!("{:?}", header);

        let mut wad = WadData {
            file_path: None,
            header,
            file_data,
            dirs: Vec::new(),
        };
        wad.read_directories()?;
        Ok(wad)
    }

    fn read_directories(&mut self) -> Result<(), WadError> {
        let count = self.header.dir_count as usize;
        let start = self.header.dir_offset as usize;
        check_len(&self.file_data, start, count * DIRECTORY_SIZE, "directory")?;

        self.dirs.reserve_exact(count);
        for i in 0..count {
            let dir = WadDirectory::read_le(&self.file_data, start + i * DIRECTORY_SIZE)?;
            self.dirs.push(dir);
        }
        info!("Read {} directory entries", self.dirs.len());
        Ok(())
    }

    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn dirs(&self) -> &[WadDirectory] {
        &self.dirs
    }

    pub fn lump_names(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(|d| d.lump_name.as_str())
    }

    pub fn lump_exists(&self, name: &str) -> bool {
        self.dirs.iter().any(|d| d.lump_name == name)
    }

    /// The first directory index carrying `name`
    pub fn find_lump_index(&self, name: &str) -> Result<usize, WadError> {
        self.dirs
            .iter()
            .position(|d| d.lump_name == name)
            .ok_or_else(|| WadError::LumpNotFound(name.to_owned()))
    }

    /// Every map marker in the directory. A marker is recognised by the lump
    /// following it being `THINGS`, which catches `E#M#` and `MAP##` names
    /// as well as custom names in PWADs.
    pub fn map_names(&self) -> Vec<String> {
        self.dirs
            .windows(2)
            .filter(|w| w[1].lump_name == MapLump::Things.tag())
            .map(|w| w[0].lump_name.clone())
            .collect()
    }

    /// The raw bytes a directory entry points to
    pub fn lump_data(&self, dir: &WadDirectory) -> Result<&[u8], WadError> {
        let offset = dir.lump_offset as usize;
        let size = dir.lump_size as usize;
        check_len(&self.file_data, offset, size, "lump")?;
        Ok(&self.file_data[offset..offset + size])
    }

    /// The raw bytes of the first lump named `name`
    pub fn read_lump(&self, name: &str) -> Result<&[u8], WadError> {
        let index = self.find_lump_index(name)?;
        self.lump_data(&self.dirs[index])
    }

    /// Find the directory entry for one of a map's lumps. The entry must sit
    /// at the fixed offset from the map marker and carry the expected tag.
    pub fn map_lump(&self, map_name: &str, lump: MapLump) -> Result<&WadDirectory, WadError> {
        let index = self.find_lump_index(map_name)? + lump as usize;
        let dir = self
            .dirs
            .get(index)
            .ok_or_else(|| WadError::LumpNotFound(format!("{map_name}/{}", lump.tag())))?;

        if dir.lump_name != lump.tag() {
            return Err(WadError::LumpMismatch {
                index,
                expected: lump.tag(),
                found: dir.lump_name.clone(),
            });
        }
        Ok(dir)
    }

    /// Same as `map_lump` but a lump missing off the end of the directory is
    /// not an error. A lump that exists with the wrong name still is.
    fn optional_map_lump(
        &self,
        map_name: &str,
        lump: MapLump,
    ) -> Result<Option<&WadDirectory>, WadError> {
        match self.map_lump(map_name, lump) {
            Ok(dir) => Ok(Some(dir)),
            Err(WadError::LumpNotFound(_)) if self.lump_exists(map_name) => {
                warn!("{map_name}: no {} lump", lump.tag());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// The number of whole records of type `T` in the lump. A lump whose size
    /// is not a multiple of the record size is corrupt.
    pub(crate) fn record_count<T: WadLumpRecord>(
        &self,
        dir: &WadDirectory,
    ) -> Result<usize, WadError> {
        let size = dir.lump_size as usize;
        if size % T::SIZE != 0 {
            return Err(WadError::BadRecordCount {
                lump: dir.lump_name.clone(),
                size,
                record_size: T::SIZE,
            });
        }
        Ok(size / T::SIZE)
    }

    pub fn read_rejects(&self, map_name: &str) -> Result<Option<Vec<u8>>, WadError> {
        match self.optional_map_lump(map_name, MapLump::Reject)? {
            Some(dir) => Ok(Some(self.lump_data(dir)?.to_vec())),
            None => Ok(None),
        }
    }

    pub fn read_blockmap(&self, map_name: &str) -> Result<Option<WadBlockMap>, WadError> {
        match self.optional_map_lump(map_name, MapLump::Blockmap)? {
            Some(dir) => {
                let data = self.lump_data(dir)?;
                Ok(Some(WadBlockMap::read_le(data, 0)?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WadBuilder;

    #[test]
    fn header_round_trip() {
        let header = WadHeader {
            wad_type: *b"IWAD",
            dir_count: 1264,
            dir_offset: 4_175_796,
        };
        let mut buf = Vec::new();
        header.write_le(&mut buf);
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(WadHeader::read_le(&buf, 0).unwrap(), header);
    }

    #[test]
    fn directory_round_trip() {
        let dirs = [
            WadDirectory {
                lump_offset: 12,
                lump_size: 0,
                lump_name: "E1M1".to_owned(),
            },
            WadDirectory {
                lump_offset: 67500,
                lump_size: 1380,
                lump_name: "VERTEXES".to_owned(),
            },
        ];
        let mut buf = Vec::new();
        for d in &dirs {
            d.write_le(&mut buf);
        }
        assert_eq!(buf.len(), DIRECTORY_SIZE * 2);
        assert_eq!(WadDirectory::read_le(&buf, 0).unwrap(), dirs[0]);
        assert_eq!(WadDirectory::read_le(&buf, DIRECTORY_SIZE).unwrap(), dirs[1]);
    }

    #[test]
    fn name_trimming() {
        assert_eq!(read_name(b"THINGS\0\0", 0).unwrap(), "THINGS");
        assert_eq!(read_name(b"LINEDEFS", 0).unwrap(), "LINEDEFS");
        assert_eq!(read_name(b"E1M1\0AB\0", 0).unwrap(), "E1M1");
    }

    #[test]
    fn short_buffers_fail() {
        assert!(matches!(
            WadHeader::read_le(&[b'I', b'W', b'A', b'D', 0, 0], 0),
            Err(WadError::Decode { needed: 12, available: 6, .. })
        ));
        let mut buf = Vec::new();
        WadDirectory {
            lump_offset: 1,
            lump_size: 2,
            lump_name: "SEGS".to_owned(),
        }
        .write_le(&mut buf);
        assert!(WadDirectory::read_le(&buf, 1).is_err());
        assert!(WadDirectory::read_le(&buf, 100).is_err());
    }

    #[test]
    fn bad_magic() {
        let mut buf = Vec::new();
        WadHeader {
            wad_type: *b"ZWAD",
            dir_count: 0,
            dir_offset: 12,
        }
        .write_le(&mut buf);
        assert!(matches!(
            WadData::from_bytes(buf),
            Err(WadError::BadHeader { magic }) if &magic == b"ZWAD"
        ));
    }

    #[test]
    fn directory_past_end_fails() {
        let mut buf = Vec::new();
        WadHeader {
            wad_type: *b"PWAD",
            dir_count: 4,
            dir_offset: 12,
        }
        .write_le(&mut buf);
        assert!(matches!(
            WadData::from_bytes(buf),
            Err(WadError::Decode { what: "directory", .. })
        ));
    }

    #[test]
    fn find_lumps() {
        let mut b = WadBuilder::new();
        b.add_lump("PLAYPAL", vec![1, 2, 3]);
        b.add_marker("E1M1");
        b.add_lump("THINGS", Vec::new());
        let wad = WadData::from_bytes(b.build()).unwrap();

        assert!(wad.lump_exists("E1M1"));
        assert!(!wad.lump_exists("E1M2"));
        assert_eq!(wad.find_lump_index("E1M1").unwrap(), 1);
        assert_eq!(wad.read_lump("PLAYPAL").unwrap(), &[1, 2, 3]);
        assert_eq!(wad.map_names(), vec!["E1M1".to_owned()]);
        assert!(matches!(
            wad.find_lump_index("MAP01"),
            Err(WadError::LumpNotFound(n)) if n == "MAP01"
        ));
    }

    #[test]
    fn map_lump_checks_tag() {
        let mut b = WadBuilder::new();
        b.add_marker("E1M1");
        b.add_lump("THINGS", Vec::new());
        b.add_lump("SIDEDEFS", Vec::new());
        let wad = WadData::from_bytes(b.build()).unwrap();

        assert!(wad.map_lump("E1M1", MapLump::Things).is_ok());
        assert!(matches!(
            wad.map_lump("E1M1", MapLump::LineDefs),
            Err(WadError::LumpMismatch { index: 2, expected: "LINEDEFS", found }) if found == "SIDEDEFS"
        ));
        assert!(matches!(
            wad.map_lump("E1M1", MapLump::Vertexes),
            Err(WadError::LumpNotFound(_))
        ));
        // Off the end of the directory is fine for the optional lumps
        assert!(wad.read_rejects("E1M1").unwrap().is_none());
        assert!(wad.read_blockmap("E1M1").unwrap().is_none());
    }
}
