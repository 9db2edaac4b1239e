// SPDX-License-Identifier: MIT
//
// Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dodjo_term::event_loop::LoopConfig;
use dodjo_term::input::Layout;
use dodjo_world::world::{DEFAULT_SIZE, MAX_SIZE};

/// Explore a world of chunks in the terminal.
#[derive(Parser, Debug)]
#[command(name = "dodjo", version, about)]
pub struct Cli {
    /// Directory holding the chunk decoration files
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Log file (stdout belongs to the renderer)
    #[arg(long, default_value = "dodjo.log")]
    pub log_file: PathBuf,

    /// Keyboard layout for movement and drop keys
    #[arg(long, value_enum, default_value_t = LayoutArg::Azerty)]
    pub layout: LayoutArg,

    /// Chunks per side of the square world
    #[arg(long, default_value_t = DEFAULT_SIZE,
          value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_SIZE)))]
    pub world_size: u8,

    /// Sleep after idle ticks, horizontal moves and hotbar keys (μs)
    #[arg(long, default_value_t = 10_000)]
    pub idle_us: u64,

    /// Sleep after a vertical move typed with a letter (μs)
    #[arg(long, default_value_t = 30_000)]
    pub typed_vertical_us: u64,

    /// Sleep after a vertical move entered with an arrow key (μs)
    #[arg(long, default_value_t = 50_000)]
    pub arrow_vertical_us: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// z/q/s/d to move, w to drop
    Azerty,
    /// w/a/s/d to move, x to drop
    Qwerty,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Azerty => Self::Azerty,
            LayoutArg::Qwerty => Self::Qwerty,
        }
    }
}

impl Cli {
    /// Loop settings selected on the command line.
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            layout: self.layout.into(),
            idle_us: self.idle_us,
            typed_vertical_us: self.typed_vertical_us,
            arrow_vertical_us: self.arrow_vertical_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_loop_defaults() {
        let cli = Cli::try_parse_from(["dodjo"]).unwrap();
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert_eq!(cli.log_file, PathBuf::from("dodjo.log"));
        assert_eq!(cli.world_size, 10);
        assert_eq!(cli.loop_config(), LoopConfig::default());
    }

    #[test]
    fn qwerty_layout() {
        let cli = Cli::try_parse_from(["dodjo", "--layout", "qwerty"]).unwrap();
        assert_eq!(cli.loop_config().layout, Layout::Qwerty);
    }

    #[test]
    fn pacing_overrides() {
        let cli = Cli::try_parse_from([
            "dodjo",
            "--idle-us",
            "1",
            "--typed-vertical-us",
            "2",
            "--arrow-vertical-us",
            "3",
        ])
        .unwrap();
        let config = cli.loop_config();
        assert_eq!((config.idle_us, config.typed_vertical_us, config.arrow_vertical_us), (1, 2, 3));
    }

    #[test]
    fn world_size_is_bounded() {
        assert!(Cli::try_parse_from(["dodjo", "--world-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["dodjo", "--world-size", "11"]).is_err());
        let cli = Cli::try_parse_from(["dodjo", "--world-size", "3"]).unwrap();
        assert_eq!(cli.world_size, 3);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(Cli::try_parse_from(["dodjo", "--layout", "dvorak"]).is_err());
    }
}
