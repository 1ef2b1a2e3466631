// CLI entry point for the wilderness console game.
//
// Two modes share one rendering path (`render.rs`):
// - Human (default): reads lines from stdin. The first character of each
//   line is the action, `w`/`a`/`s`/`d` to move and `x` to quit. Anything
//   else is an idle action (still counts a step).
// - Bot (`--bot <steps>`): a random walk driven by an `Episode` and a
//   `GameRng` seeded from `--seed`, stopping at the exit or after `steps`.
//
// After every human action the agent's vision window is printed, scaled by
// `--x-scale`/`--y-scale`, followed by the stats line.
//
// Usage:
//   wilderness [OPTIONS]
//     --config <PATH>    JSON GameConfig (default: built-in constants)
//     --seed <N>         Map seed (default: 0)
//     --cols/--rows <N>  Override map size
//     --vision <N>       Override vision radius
//     --bot <STEPS>      Run the random-walk bot instead of reading stdin
//     --x-scale <N>      Horizontal repeat per tile (default: 4)
//     --y-scale <N>      Vertical repeat per row (default: 2)
//     -v, -vv, -vvv      Log at info, debug, trace (default: warn)

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use wilderness_prng::GameRng;
use wilderness_sim::agent::Agent;
use wilderness_sim::config::GameConfig;
use wilderness_sim::episode::Episode;
use wilderness_sim::sim::Simulation;
use wilderness_sim::types::{AgentId, Direction};

use render::{Scale, agent_overlays, render_window};

#[derive(Parser, Debug)]
#[command(name = "wilderness", about = "Find the hidden exit at the lowest terrain cost")]
struct Args {
    /// JSON game config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for map generation (and the bot's walk).
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long)]
    cols: Option<i32>,

    #[arg(long)]
    rows: Option<i32>,

    /// Vision radius in cells.
    #[arg(long)]
    vision: Option<i32>,

    /// Run the random-walk bot for at most this many steps.
    #[arg(long, value_name = "STEPS")]
    bot: Option<u64>,

    #[arg(long, default_value_t = 4)]
    x_scale: usize,

    #[arg(long, default_value_t = 2)]
    y_scale: usize,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(vision) = self.vision {
            config.vision = vision;
        }
        Ok(config)
    }

    fn scale(&self) -> Scale {
        Scale {
            x: self.x_scale,
            y: self.y_scale,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.game_config()?;
    match args.bot {
        Some(steps) => run_bot(config, args.seed, steps, args.scale()),
        None => run_human(&config, args.seed, args.scale()),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn print_view(sim: &Simulation, id: AgentId, scale: Scale) -> Result<()> {
    let window = sim.observe(id)?;
    let markers = sim.marker_positions();
    print!("{}", render_window(&window, &agent_overlays(&markers), scale));
    Ok(())
}

fn print_header(config: &GameConfig) {
    println!();
    println!(
        "Map size: {} x {}, vision={}",
        config.cols, config.rows, config.vision
    );
    println!("---------------------------------------");
}

fn run_human(config: &GameConfig, seed: u64, scale: Scale) -> Result<()> {
    let mut sim = Simulation::from_config(config, seed)?;
    let (x, y) = config.start_position();
    let id = sim.register_agent(Agent::new("Human One", x, y));

    println!("Human Engine");
    println!("------------------------------------");
    println!("Enter 'x' to quit. Move with 'W A S D'");
    print_view(&sim, id, scale)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let agent = sim.agent(id).context("registered agent missing")?;
        print_header(config);
        println!("{}", agent.stats_line());
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let key = line.trim().chars().next().unwrap_or(' ').to_ascii_lowercase();
        if key == 'x' {
            break;
        }

        sim.apply_action(id, Direction::from_key(key))?;
        print_view(&sim, id, scale)?;

        if sim.is_at_exit(id)? {
            let agent = sim.agent(id).context("registered agent missing")?;
            println!("Game complete! {} score = {}", agent, agent.score());
            return Ok(());
        }
    }

    println!("Game aborted!");
    Ok(())
}

fn run_bot(config: GameConfig, seed: u64, steps: u64, scale: Scale) -> Result<()> {
    let mut episode = Episode::new(config, seed)?;
    let mut rng = GameRng::new(seed.wrapping_add(1));

    println!("Bot explorer");
    println!("------------------------------------");
    for _ in 0..steps {
        let direction = Direction::from_action_index(rng.range_usize(0, Episode::action_count()));
        let outcome = episode.step(direction)?;
        if outcome.done {
            print_view(episode.simulation(), episode.agent_id(), scale)?;
            let agent = episode.agent()?;
            println!("{}", agent.stats_line());
            println!("Game complete! {} score = {}", agent, outcome.score);
            return Ok(());
        }
        if outcome.truncated {
            break;
        }
    }

    print_view(episode.simulation(), episode.agent_id(), scale)?;
    println!("{}", episode.agent()?.stats_line());
    println!("Game aborted!");
    Ok(())
}
