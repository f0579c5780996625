use argh::FromArgs;
use level::log;

/// Render a level's walls from the player start, writing each frame and a
/// top down map of it as PNG
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to the WAD
    #[argh(option, default = "Default::default()")]
    pub wad: String,
    /// map marker to load, E1M1 or MAP01 style
    #[argh(option)]
    pub map: Option<String>,
    /// resolution width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// resolution height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// horizontal field of view in degrees
    #[argh(option)]
    pub fov: Option<f32>,
    /// number of frames to render
    #[argh(option, default = "1")]
    pub frames: usize,
    /// comma separated key names replayed one per frame, e.g. up,up,left
    #[argh(option, default = "Default::default()")]
    pub moves: String,
    /// directory the PNGs are written to. Nothing is written if not set
    #[argh(option)]
    pub out: Option<String>,
    /// map units per automap pixel
    #[argh(option)]
    pub automap_scale: Option<f32>,
    /// frame rate cap, 0 for none
    #[argh(option, default = "0")]
    pub fps: u32,
}

impl CLIOptions {
    pub fn move_keys(&self) -> Vec<&str> {
        self.moves
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let opts = CLIOptions::from_args(
            &["bspview"],
            &["--wad", "doom1.wad", "--map", "E1M2", "--frames", "3", "--moves", "up, left,,down", "--verbose", "debug"],
        )
        .unwrap();
        assert_eq!(opts.wad, "doom1.wad");
        assert_eq!(opts.map.as_deref(), Some("E1M2"));
        assert_eq!(opts.frames, 3);
        assert_eq!(opts.move_keys(), vec!["up", "left", "down"]);
        assert_eq!(opts.verbose, Some(log::LevelFilter::Debug));
        assert_eq!(opts.width, 0);
        assert!(opts.fov.is_none());
    }
}
