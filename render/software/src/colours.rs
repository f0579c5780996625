use std::collections::HashMap;
use std::fmt;

use render_trait::Colour;

const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Picks the colour a newly seen texture name is drawn in
pub type ColourAssigner = Box<dyn FnMut(&str) -> Colour>;

/// Flat wall colours keyed by middle texture name. A name gets its colour
/// the first time it is seen and keeps it for the life of the cache.
pub struct WallColours {
    cache: HashMap<String, Colour>,
    assign: ColourAssigner,
}

impl WallColours {
    /// Colours from a xorshift generator, so the same seed and the same
    /// order of first sightings gives the same colours
    pub fn new(seed: u64) -> Self {
        let mut state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self::with_assigner(move |_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            // keep away from the black background
            [
                (state >> 16) as u8 | 0x30,
                (state >> 24) as u8 | 0x30,
                (state >> 32) as u8 | 0x30,
                255,
            ]
        })
    }

    pub fn with_assigner(assign: impl FnMut(&str) -> Colour + 'static) -> Self {
        WallColours {
            cache: HashMap::new(),
            assign: Box::new(assign),
        }
    }

    pub fn colour_for(&mut self, texture: &str) -> Colour {
        if let Some(colour) = self.cache.get(texture) {
            return *colour;
        }
        let colour = (self.assign)(texture);
        self.cache.insert(texture.to_owned(), colour);
        colour
    }

    pub fn get(&self, texture: &str) -> Option<Colour> {
        self.cache.get(texture).copied()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for WallColours {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl fmt::Debug for WallColours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallColours").field("cache", &self.cache).finish()
    }
}
