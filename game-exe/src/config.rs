//! User configuration options.

use crate::input::InputConfig;
use crate::{BASE_DIR, CLIOptions};
use dirs::config_dir;
use level::log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, create_dir_all},
    io::{Read, Write},
    path::{Path, PathBuf},
};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> Option<PathBuf> {
    let mut dir = config_dir()?;
    dir.push(BASE_DIR);
    if let Err(e) = create_dir_all(&dir) {
        warn!(target: LOG_TAG, "Couldn't create {:?}: {}", dir, e);
        return None;
    }
    dir.push("user.toml");
    Some(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub wad: String,
    pub map: String,
    pub width: u32,
    pub height: u32,
    /// Degrees
    pub fov: f32,
    pub automap_scale: f32,
    /// Thing type the camera starts on
    pub player_thing: u16,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub input: InputConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        UserConfig {
            wad: String::new(),
            map: "E1M1".to_owned(),
            width: 640,
            height: 400,
            fov: 90.0,
            automap_scale: 10.0,
            player_thing: 1,
            move_speed: 8.0,
            rotation_speed: 4.0,
            input: InputConfig::default(),
        }
    }
}

impl UserConfig {
    /// Read the user config, or defaults if there is no usable config dir
    pub fn load() -> Self {
        match get_cfg_file() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!(target: LOG_TAG, "No config dir, using defaults");
                UserConfig::default()
            }
        }
    }

    /// A missing, empty, or corrupt file is replaced with the defaults
    pub fn load_from(path: &Path) -> Self {
        let mut buf = String::new();
        if let Ok(mut file) = File::open(path) {
            if file.read_to_string(&mut buf).is_ok() && !buf.is_empty() {
                match toml::from_str(&buf) {
                    Ok(data) => {
                        info!(target: LOG_TAG, "Loaded user config file");
                        return data;
                    }
                    Err(e) => warn!("Could not deserialise {:?} recreating config: {}", path, e),
                }
            }
        }
        let config = UserConfig::default();
        info!("Created default user config file");
        config.write_to(path);
        config
    }

    pub fn write(&self) {
        if let Some(path) = get_cfg_file() {
            self.write_to(&path);
        }
    }

    pub fn write_to(&self, path: &Path) {
        let data = match toml::to_string_pretty(self) {
            Ok(data) => data,
            Err(err) => {
                error!("Could not serialise config: {}", err);
                return;
            }
        };
        match File::create(path) {
            Ok(mut file) => {
                if let Err(err) = file.write_all(data.as_bytes()) {
                    error!("Could not write config: {}", err);
                } else {
                    info!("Saved user config to {:?}", path);
                }
            }
            Err(err) => error!("Could not write config: {}", err),
        }
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if !cli.wad.is_empty() && cli.wad != self.wad {
            cli.wad.clone_into(&mut self.wad);
            info!("WAD changed to: {}", &cli.wad);
        } else {
            self.wad.clone_into(&mut cli.wad);
        }

        if let Some(map) = &cli.map {
            if *map != self.map {
                map.clone_into(&mut self.map);
            }
        } else {
            cli.map = Some(self.map.clone());
        }

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(fov) = cli.fov {
            if fov != self.fov {
                self.fov = fov;
            }
        } else {
            cli.fov = Some(self.fov);
        }

        if let Some(scale) = cli.automap_scale {
            if scale != self.automap_scale {
                self.automap_scale = scale;
            }
        } else {
            cli.automap_scale = Some(self.automap_scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bspview_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn missing_file_gets_defaults() {
        let path = temp_file("missing");
        let _ = std::fs::remove_file(&path);
        let config = UserConfig::load_from(&path);
        assert_eq!(config, UserConfig::default());
        // and was written out
        assert_eq!(UserConfig::load_from(&path), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_is_recreated() {
        let path = temp_file("corrupt");
        std::fs::write(&path, "width = \"wide\"").unwrap();
        assert_eq!(UserConfig::load_from(&path), UserConfig::default());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("width = 640"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_file("partial");
        std::fs::write(&path, "fov = 60.0\n[input]\nkey_up = \"w\"\nkey_down = \"s\"\nkey_left = \"a\"\nkey_right = \"d\"\nkey_quit = \"q\"\n").unwrap();
        let config = UserConfig::load_from(&path);
        assert_eq!(config.fov, 60.0);
        assert_eq!(config.width, 640);
        assert_eq!(config.input.key_up, "w");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn cli_overrides_and_is_filled() {
        let mut config = UserConfig::default();
        let mut cli = CLIOptions::from_args(&["bspview"], &["--wad", "x.wad", "--width", "320"]).unwrap();
        config.sync_cli(&mut cli);
        assert_eq!(config.wad, "x.wad");
        assert_eq!(config.width, 320);
        assert_eq!(cli.height, 400);
        assert_eq!(cli.fov, Some(90.0));
        assert_eq!(cli.map.as_deref(), Some("E1M1"));
    }
}
