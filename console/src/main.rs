mod input;
mod render;

use std::io::{self, Write};
use clap::{Parser, ValueEnum};
use common::config::Validate;
use common::games::SessionRng;
use common::games::tictactoe::{
    FirstPlayerMode, GameError, GameSettings, Mark, SETTINGS_FILE_NAME, TurnController,
    get_settings_manager,
};
use common::log;
use common::logger::{self, LogTarget};
use input::ConsolePlayer;
use render::render_outcome;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FirstArg {
    Computer,
    Human,
    Random,
}

impl From<FirstArg> for FirstPlayerMode {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Computer => FirstPlayerMode::Computer,
            FirstArg::Human => FirstPlayerMode::Human,
            FirstArg::Random => FirstPlayerMode::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

#[derive(Parser)]
#[command(name = "n_in_a_row", about = "Play N-in-a-row against the computer")]
struct Args {
    /// Settings file; defaults to a file next to the executable.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    size: Option<usize>,

    #[arg(long)]
    win_count: Option<usize>,

    #[arg(long, value_enum)]
    first: Option<FirstArg>,

    #[arg(long, value_enum)]
    mark: Option<MarkArg>,

    /// Seed for the computer's random moves.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,

    /// Log computer decisions to stderr.
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn apply_to(&self, settings: &mut GameSettings) {
        if let Some(size) = self.size {
            settings.board_size = size;
        }
        if let Some(win_count) = self.win_count {
            settings.win_count = win_count;
        }
        if let Some(first) = self.first {
            settings.first_player = first.into();
        }
        if let Some(mark) = self.mark {
            settings.human_mark = mark.into();
        }
    }
}

fn default_settings_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(SETTINGS_FILE_NAME).to_string_lossy().into_owned();
    }
    SETTINGS_FILE_NAME.to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        logger::init_logger(Some("Game".to_string()), LogTarget::Stderr);
    }

    let settings_path = args.config.clone().unwrap_or_else(default_settings_path);
    let manager = get_settings_manager(&settings_path);
    let mut settings = manager.get_config()?;
    args.apply_to(&mut settings);
    settings.validate()?;

    if args.save_settings {
        manager.set_config(&settings)?;
        log!("Settings saved to {}", settings_path);
    }

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Starting {}x{} game, {} in a row, seed {}",
        settings.board_size,
        settings.board_size,
        settings.win_count,
        rng.seed()
    );

    let mut game = TurnController::new(&settings, rng)?;
    let stdin = io::stdin();
    let mut player = ConsolePlayer::new(stdin.lock(), io::stdout(), settings.human_mark);

    match game.run(&mut player) {
        Ok(outcome) => {
            let out = player.output();
            render_outcome(game.board(), outcome, game.winning_line(), out)?;
            out.flush()?;
        }
        Err(GameError::Abandoned) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_settings() {
        let args = Args::parse_from([
            "n_in_a_row",
            "--size",
            "10",
            "--win-count",
            "5",
            "--first",
            "computer",
            "--mark",
            "o",
        ]);
        let mut settings = GameSettings::default();
        args.apply_to(&mut settings);

        assert_eq!(settings.board_size, 10);
        assert_eq!(settings.win_count, 5);
        assert_eq!(settings.first_player, FirstPlayerMode::Computer);
        assert_eq!(settings.human_mark, Mark::O);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_args_keep_settings() {
        let args = Args::parse_from(["n_in_a_row", "--seed", "3"]);
        let mut settings = GameSettings::default();
        args.apply_to(&mut settings);
        assert_eq!(settings, GameSettings::default());
        assert_eq!(args.seed, Some(3));
    }
}
