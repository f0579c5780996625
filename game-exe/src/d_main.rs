//! The main loop driver. Each frame applies at most one replayed command,
//! draws the player view and the automap, then hands both buffers on.

use std::error::Error;
use std::path::{Path, PathBuf};

use level::log::{debug, info};
use level::{MapData, Player};
use render_soft::{AutomapRenderer, SoftwareRenderer};
use render_target::DrawBuffer;
use render_trait::PlayViewRenderer;

use crate::input::InputCommand;
use crate::timestep::TimeStep;

pub struct LoopOptions {
    pub frames: usize,
    pub width: usize,
    pub height: usize,
    pub automap_scale: f32,
    pub fps: u32,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: usize,
    pub quit: bool,
}

/// Runs until `options.frames` are drawn or a quit command comes up.
/// `on_frame` gets the frame number with the view and automap buffers.
pub fn d_view_loop(
    map: &MapData,
    player: &mut Player,
    commands: &[InputCommand],
    options: &LoopOptions,
    mut on_frame: impl FnMut(usize, &DrawBuffer, &DrawBuffer) -> Result<(), Box<dyn Error>>,
) -> Result<LoopSummary, Box<dyn Error>> {
    let mut renderer = SoftwareRenderer::default();
    let automap = AutomapRenderer::new(options.automap_scale);
    let mut view = DrawBuffer::new(options.width, options.height);
    let mut overview = DrawBuffer::new(options.width, options.height);
    let mut timestep = TimeStep::new();

    for frame in 0..options.frames {
        match commands.get(frame) {
            Some(InputCommand::Quit) => {
                info!("Quit at frame {}", frame);
                return Ok(LoopSummary { frames: frame, quit: true });
            }
            Some(InputCommand::Move(cmd)) => {
                player.apply(*cmd);
                player.update_viewz(map);
                debug!("{:?}: now at {} facing {:?}", cmd, player.xy, player.angle);
            }
            None => {}
        }

        renderer.render_player_view(player, map, &mut view);
        automap.draw(map, player, &mut overview);
        on_frame(frame, &view, &overview)?;

        timestep.limit(options.fps);
        if let Some(fps) = timestep.frame_rate(frame + 1 == options.frames) {
            info!("{}", fps);
        }
    }

    Ok(LoopSummary {
        frames: options.frames,
        quit: false,
    })
}

/// `view_NNNN.png` and `automap_NNNN.png`
pub fn frame_paths(dir: &Path, frame: usize) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("view_{:04}.png", frame)),
        dir.join(format!("automap_{:04}.png", frame)),
    )
}
