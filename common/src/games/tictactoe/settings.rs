use serde::{Deserialize, Serialize};

use crate::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use super::types::{FirstPlayerMode, Mark};

pub const MAX_BOARD_SIZE: usize = 20;
pub const SETTINGS_FILE_NAME: &str = "n_in_a_row.yaml";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameSettings {
    pub board_size: usize,
    pub win_count: usize,
    #[serde(default = "default_first_player")]
    pub first_player: FirstPlayerMode,
    #[serde(default = "default_human_mark")]
    pub human_mark: Mark,
}

fn default_first_player() -> FirstPlayerMode {
    FirstPlayerMode::Human
}

fn default_human_mark() -> Mark {
    Mark::X
}

impl GameSettings {
    pub fn computer_mark(&self) -> Option<Mark> {
        self.human_mark.opponent()
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: 3,
            win_count: 3,
            first_player: default_first_player(),
            human_mark: default_human_mark(),
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(format!(
                "board_size must be between 1 and {}",
                MAX_BOARD_SIZE
            ));
        }
        if self.win_count == 0 || self.win_count > self.board_size {
            return Err(format!(
                "win_count must be between 1 and {} (board size)",
                self.board_size
            ));
        }
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be X or O".to_string());
        }
        Ok(())
    }
}

pub fn get_settings_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, GameSettings, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}
