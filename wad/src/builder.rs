use crate::wad::{DIRECTORY_SIZE, HEADER_SIZE};
use crate::{WadDirectory, WadHeader};

/// Assembles a PWAD in memory: header, then lump data in the order added,
/// then the directory.
#[derive(Debug, Default, Clone)]
pub struct WadBuilder {
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lump(&mut self, name: &str, data: Vec<u8>) -> &mut Self {
        self.lumps.push((name.to_owned(), data));
        self
    }

    /// A zero sized lump, such as a map marker
    pub fn add_marker(&mut self, name: &str) -> &mut Self {
        self.add_lump(name, Vec::new())
    }

    pub fn build(&self) -> Vec<u8> {
        let data_len: usize = self.lumps.iter().map(|(_, d)| d.len()).sum();
        let dir_offset = HEADER_SIZE + data_len;
        let mut out = Vec::with_capacity(dir_offset + self.lumps.len() * DIRECTORY_SIZE);

        WadHeader {
            wad_type: *b"PWAD",
            dir_count: self.lumps.len() as u32,
            dir_offset: dir_offset as u32,
        }
        .write_le(&mut out);

        let mut dirs = Vec::with_capacity(self.lumps.len());
        for (name, data) in &self.lumps {
            dirs.push(WadDirectory {
                lump_offset: out.len() as u32,
                lump_size: data.len() as u32,
                lump_name: name.clone(),
            });
            out.extend_from_slice(data);
        }
        for dir in &dirs {
            dir.write_le(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WadData;

    #[test]
    fn layout() {
        let mut b = WadBuilder::new();
        b.add_lump("PLAYPAL", vec![9; 6]).add_marker("E1M1");
        let bytes = b.build();
        assert_eq!(bytes.len(), HEADER_SIZE + 6 + 2 * DIRECTORY_SIZE);

        let wad = WadData::from_bytes(bytes).unwrap();
        assert_eq!(wad.header().dir_count, 2);
        assert_eq!(wad.header().dir_offset, 18);
        assert_eq!(wad.dirs()[0].lump_offset, 12);
        assert_eq!(wad.dirs()[1].lump_size, 0);
        assert_eq!(wad.lump_names().collect::<Vec<_>>(), vec!["PLAYPAL", "E1M1"]);
    }
}
