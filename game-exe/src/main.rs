//! `bspview` loads one map from a WAD, places the camera on the player start,
//! and renders the walls it can see, frame by frame, to PNG files.

mod cli;
mod config;
mod d_main;
mod input;
mod timestep;

use std::error::Error;
use std::fs::create_dir_all;
use std::path::PathBuf;

use cli::*;
use level::log::{self, error, info, warn};
use level::{MapData, Player};
use math::Angle;
use simplelog::TermLogger;
use wad::WadData;

use crate::config::UserConfig;
use crate::d_main::{LoopOptions, d_view_loop, frame_paths};

const BASE_DIR: &str = "bspview/";

/// The main `game-exe` crate should take care of initialising a few things
fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    if user_config.wad.is_empty() {
        error!("No WAD given, pass --wad <path>");
        return Err("no WAD given".into());
    }

    let wad_path: PathBuf = user_config.wad.clone().into();
    let wad = WadData::new(&wad_path).inspect_err(|e| error!("{}", e))?;

    let map = MapData::load(&user_config.map, &wad).inspect_err(|e| {
        error!("{}", e);
        let maps = wad.map_names();
        if !maps.is_empty() {
            info!("Maps in {:?}: {}", wad_path, maps.join(", "));
        }
    })?;

    let fov = Angle::new(user_config.fov.clamp(1.0, 179.0));
    let Some(mut player) = Player::spawn(&map, user_config.player_thing, fov) else {
        error!(
            "{} has no thing of type {} to start on",
            map.name(),
            user_config.player_thing
        );
        return Err("no player start".into());
    };
    player.move_speed = user_config.move_speed;
    player.rotation_speed = user_config.rotation_speed;
    info!("Start at {} facing {:?}", player.xy, player.angle);

    let mut commands = Vec::new();
    for key in options.move_keys() {
        match user_config.input.command_for(key) {
            Some(cmd) => commands.push(cmd),
            None => warn!("No binding for key {:?}, ignored", key),
        }
    }

    let out_dir = options.out.as_ref().map(PathBuf::from);
    if let Some(dir) = &out_dir {
        create_dir_all(dir)?;
    }

    let loop_options = LoopOptions {
        frames: options.frames,
        width: user_config.width as usize,
        height: user_config.height as usize,
        automap_scale: user_config.automap_scale,
        fps: options.fps,
    };
    let summary = d_view_loop(&map, &mut player, &commands, &loop_options, |frame, view, automap| {
        if let Some(dir) = &out_dir {
            let (view_path, automap_path) = frame_paths(dir, frame);
            view.save_png(&view_path)?;
            automap.save_png(&automap_path)?;
        }
        Ok(())
    })?;

    info!(
        "Rendered {} frame(s){}",
        summary.frames,
        if summary.quit { ", quit early" } else { "" }
    );
    Ok(())
}
