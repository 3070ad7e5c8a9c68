use maze_astar::algorithm::find_path;
use maze_astar::config::{check_dimensions, Cli, Config};
use maze_astar::map::Map;
use maze_astar::render::{render_map, render_maze};
use maze_astar::stat::{Report, Stats};

use anyhow::{anyhow, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }
    let config = Config::load(&cli)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let map = if let Some(map_path) = config.map_path.as_ref() {
        let map = Map::from_file(map_path).with_context(|| format!("error loading map: {map_path}"))?;
        check_dimensions(map.height, map.width, config.max_height, config.max_width)?;
        map
    } else {
        Map::generate(config.height, config.width, config.wall_ratio, &mut rng)?
    };

    let start = match config.start {
        Some(start) => start,
        None => map
            .random_open_cell(&mut rng)
            .ok_or_else(|| anyhow!("maze has no open interior cell for the start"))?,
    };
    let goal = match config.goal {
        Some(goal) => goal,
        None => map
            .random_open_cell(&mut rng)
            .ok_or_else(|| anyhow!("maze has no open interior cell for the goal"))?,
    };

    println!("Generated Maze:");
    print!("{}", render_maze(&map));
    println!("Start: {start:?}, End: {goal:?}");

    let mut stats = Stats::default();
    let result = find_path(&map, start, goal, &mut stats).context("search failed")?;
    match result.as_ref() {
        Some((path, _)) => {
            println!("\nMaze with Shortest Path:");
            print!("{}", render_map(&map, start, goal, Some(path.as_slice())));
        }
        None => println!("\nNo Path Found."),
    }
    stats.print();

    if let Some(output_path) = config.output_path.as_ref() {
        let report = Report {
            height: map.height,
            width: map.width,
            seed: config.seed,
            start,
            goal,
            found: result.is_some(),
            cost: result.as_ref().map(|(_, cost)| *cost),
            path: result.map(|(path, _)| path),
            stats,
        };
        report
            .write_json(output_path)
            .with_context(|| format!("error writing report: {output_path}"))?;
        info!("Report written to {output_path}");
    }

    Ok(())
}
