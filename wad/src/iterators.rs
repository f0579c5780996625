use std::marker::PhantomData;

use crate::lumps::*;
use crate::{MapLump, WadData, WadError};

/// Walks the records of one lump. The lump's tag and size have been checked
/// before the iterator is handed out, so each item only fails if a record's
/// own contents can't be decoded (such as a non-ASCII texture name).
pub struct LumpIter<'a, T: WadLumpRecord> {
    data: &'a [u8],
    item_count: usize,
    current: usize,
    _phantom: PhantomData<T>,
}

impl<'a, T: WadLumpRecord> LumpIter<'a, T> {
    fn new(data: &'a [u8], item_count: usize) -> Self {
        LumpIter {
            data,
            item_count,
            current: 0,
            _phantom: PhantomData,
        }
    }

    /// Total records in the lump, not the number remaining
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

impl<T: WadLumpRecord> Iterator for LumpIter<'_, T> {
    type Item = Result<T, WadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.item_count {
            let item = T::read_le(self.data, self.current * T::SIZE);
            self.current += 1;
            return Some(item);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.item_count - self.current;
        (left, Some(left))
    }
}

impl<T: WadLumpRecord> ExactSizeIterator for LumpIter<'_, T> {}

impl WadData {
    fn lump_iter<T: WadLumpRecord>(
        &self,
        map_name: &str,
        lump: MapLump,
    ) -> Result<LumpIter<'_, T>, WadError> {
        let dir = self.map_lump(map_name, lump)?;
        let count = self.record_count::<T>(dir)?;
        let data = self.lump_data(dir)?;
        Ok(LumpIter::new(data, count))
    }

    pub fn thing_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadThing>, WadError> {
        self.lump_iter(map_name, MapLump::Things)
    }

    pub fn vertex_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadVertex>, WadError> {
        self.lump_iter(map_name, MapLump::Vertexes)
    }

    pub fn sector_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadSector>, WadError> {
        self.lump_iter(map_name, MapLump::Sectors)
    }

    pub fn sidedef_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadSideDef>, WadError> {
        self.lump_iter(map_name, MapLump::SideDefs)
    }

    pub fn linedef_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadLineDef>, WadError> {
        self.lump_iter(map_name, MapLump::LineDefs)
    }

    pub fn segment_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadSegment>, WadError> {
        self.lump_iter(map_name, MapLump::Segs)
    }

    pub fn subsector_iter(
        &self,
        map_name: &str,
    ) -> Result<LumpIter<'_, WadSubSector>, WadError> {
        self.lump_iter(map_name, MapLump::SubSectors)
    }

    pub fn node_iter(&self, map_name: &str) -> Result<LumpIter<'_, WadNode>, WadError> {
        self.lump_iter(map_name, MapLump::Nodes)
    }
}

#[cfg(test)]
mod tests {
    use crate::lumps::*;
    use crate::{MapLump, WadBuilder, WadData, WadError};

    fn records<T: WadLumpRecord>(items: &[T]) -> Vec<u8> {
        let mut buf = Vec::new();
        for i in items {
            i.write_le(&mut buf);
        }
        buf
    }

    fn map_wad(things: Vec<u8>, vertexes: Vec<u8>) -> WadData {
        let mut b = WadBuilder::new();
        b.add_marker("E1M1");
        for lump in MapLump::ALL {
            let data = match lump {
                MapLump::Things => things.clone(),
                MapLump::Vertexes => vertexes.clone(),
                _ => Vec::new(),
            };
            b.add_lump(lump.tag(), data);
        }
        WadData::from_bytes(b.build()).unwrap()
    }

    #[test]
    fn things_iter() {
        let things = [
            WadThing::new(1056, -3616, 90, 1, 7),
            WadThing::new(1008, -3600, 90, 2, 7),
        ];
        let wad = map_wad(records(&things), Vec::new());
        let mut iter = wad.thing_iter("E1M1").unwrap();
        assert_eq!(iter.len(), 2);

        let next = iter.next().unwrap().unwrap();
        assert_eq!(next.x, 1056);
        assert_eq!(next.y, -3616);
        assert_eq!(next.angle, 90);
        assert_eq!(next.kind, 1);
        assert_eq!(next.flags, 7);

        let collection: Vec<WadThing> = wad
            .thing_iter("E1M1")
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(collection, things.to_vec());
    }

    #[test]
    fn empty_lump_yields_nothing() {
        let wad = map_wad(Vec::new(), Vec::new());
        assert_eq!(wad.node_iter("E1M1").unwrap().count(), 0);
    }

    #[test]
    fn partial_record_is_rejected() {
        let mut vertexes = records(&[WadVertex::new(0, 0), WadVertex::new(64, 0)]);
        vertexes.push(0);
        let wad = map_wad(Vec::new(), vertexes);
        assert!(matches!(
            wad.vertex_iter("E1M1"),
            Err(WadError::BadRecordCount { size: 9, record_size: 4, .. })
        ));
    }

    #[test]
    fn unknown_map() {
        let wad = map_wad(Vec::new(), Vec::new());
        assert!(matches!(
            wad.linedef_iter("MAP01"),
            Err(WadError::LumpNotFound(_))
        ));
    }
}
