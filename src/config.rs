use anyhow::{anyhow, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::common::Cell;
use crate::error::MIN_DIMENSION;

#[derive(Parser, Debug, Default)]
#[command(
    name = "maze-astar",
    about = "Random grid maze generation and A* shortest path search.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Maze height")]
    pub height: Option<usize>,

    #[arg(long, help = "Maze width")]
    pub width: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Probability that an interior cell is a wall")]
    pub wall_ratio: Option<f64>,

    #[arg(long, help = "Largest accepted maze height")]
    pub max_height: Option<usize>,

    #[arg(long, help = "Largest accepted maze width")]
    pub max_width: Option<usize>,

    #[arg(long, help = "Load the maze from a map file instead of generating it")]
    pub map_path: Option<String>,

    #[arg(long, help = "Start cell as `row,col`", value_parser = parse_cell)]
    pub start: Option<Cell>,

    #[arg(long, help = "Goal cell as `row,col`", value_parser = parse_cell)]
    pub goal: Option<Cell>,

    #[arg(long, help = "Path to write the JSON search report to")]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub height: usize,
    pub width: usize,
    pub seed: Option<u64>,
    pub wall_ratio: f64,
    pub max_height: usize,
    pub max_width: usize,
    pub map_path: Option<String>,
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
    pub output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            height: 20,
            width: 50,
            seed: None,
            wall_ratio: 1.0 / 3.0,
            max_height: 20,
            max_width: 50,
            map_path: None,
            start: None,
            goal: None,
            output_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = if let Some(config_file) = cli.config.as_ref() {
            let config_str = std::fs::read_to_string(config_file)
                .with_context(|| format!("cannot read config file: {config_file}"))?;
            Config::from_yaml_str(&config_str)
                .with_context(|| format!("error with config file: {config_file}"))?
        } else {
            Config::default()
        };
        config.override_from_command_line(cli)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(width) = cli.width {
            self.width = width;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(wall_ratio) = cli.wall_ratio {
            self.wall_ratio = wall_ratio;
        }
        if let Some(max_height) = cli.max_height {
            self.max_height = max_height;
        }
        if let Some(max_width) = cli.max_width {
            self.max_width = max_width;
        }
        if cli.map_path.is_some() {
            self.map_path = cli.map_path.clone();
        }
        if cli.start.is_some() {
            self.start = cli.start;
        }
        if cli.goal.is_some() {
            self.goal = cli.goal;
        }
        if cli.output_path.is_some() {
            self.output_path = cli.output_path.clone();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_height < MIN_DIMENSION || self.max_width < MIN_DIMENSION {
            return Err(anyhow!(
                "Maximum dimensions must be at least {MIN_DIMENSION}, got {}x{}",
                self.max_height,
                self.max_width
            ));
        }

        if !(0.0..=1.0).contains(&self.wall_ratio) {
            return Err(anyhow!(
                "Wall ratio must lie between 0.0 and 1.0, got {}",
                self.wall_ratio
            ));
        }

        // A loaded map carries its own dimensions.
        if self.map_path.is_none() {
            check_dimensions(self.height, self.width, self.max_height, self.max_width)?;
        }
        Ok(())
    }
}

pub fn check_dimensions(
    height: usize,
    width: usize,
    max_height: usize,
    max_width: usize,
) -> crate::error::Result<()> {
    crate::map::validate_dimensions(height, width)?;
    if height > max_height || width > max_width {
        return Err(crate::error::MazeError::DimensionsTooLarge {
            height,
            width,
            max_height,
            max_width,
        });
    }
    Ok(())
}

fn parse_cell(value: &str) -> Result<Cell, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got {value:?}"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid row {row:?}: {err}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid column {col:?}: {err}"))?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.height, config.width), (20, 50));
    }

    #[test]
    fn test_rejects_small_dimensions() {
        let cli = Cli {
            height: Some(4),
            ..Cli::default()
        };
        let err = Config::default().override_from_command_line(&cli).unwrap_err();
        match err.downcast_ref::<MazeError>() {
            Some(MazeError::InvalidDimensions { height, .. }) => assert_eq!(*height, 4),
            other => panic!("expected invalid dimensions, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_dimensions_above_limit() {
        let cli = Cli {
            width: Some(51),
            ..Cli::default()
        };
        assert!(Config::default().override_from_command_line(&cli).is_err());

        let lifted = Cli {
            width: Some(120),
            max_width: Some(200),
            ..Cli::default()
        };
        let config = Config::default().override_from_command_line(&lifted).unwrap();
        assert_eq!(config.width, 120);
    }

    #[test]
    fn test_yaml_config_with_command_line_override() {
        let yaml = "height: 10\nwidth: 12\nseed: 7\nstart: [1, 1]\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.height, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.start, Some((1, 1)));
        assert_eq!(config.max_width, 50);

        let cli = Cli {
            seed: Some(9),
            goal: Some((3, 4)),
            ..Cli::default()
        };
        let config = config.override_from_command_line(&cli).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.goal, Some((3, 4)));
        assert_eq!(config.height, 10);
    }

    #[test]
    fn test_load_config_file() {
        let cli = Cli {
            config: Some("config/maze.yaml".to_string()),
            height: Some(12),
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!((config.height, config.width), (12, 50));
    }

    #[test]
    fn test_yaml_rejects_unknown_field() {
        assert!(Config::from_yaml_str("heigth: 10\n").is_err());
    }

    #[test]
    fn test_rejects_bad_wall_ratio() {
        let config = Config {
            wall_ratio: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,4"), Ok((3, 4)));
        assert_eq!(parse_cell(" 1 , 12"), Ok((1, 12)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_arguments() {
        let cli = Cli::parse_from([
            "maze-astar",
            "--height",
            "8",
            "--start",
            "1,2",
            "--seed",
            "5",
        ]);
        assert_eq!(cli.height, Some(8));
        assert_eq!(cli.start, Some((1, 2)));
        assert_eq!(cli.seed, Some(5));
    }
}
