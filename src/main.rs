use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use treat_chase::config::{self, Config};
use treat_chase::driver;
use treat_chase::game::WorldSnapshot;
use treat_chase::logging::{self, LogTarget};

/// Command line options
#[derive(Debug, Default)]
struct Args {
    debug: bool,
    headless: Option<u64>,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;

    // Headless runs may log to stderr; the TUI needs it clean
    let target = if args.headless.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::File(Path::new(logging::LOG_FILE_PATH))
    };
    logging::init(args.debug, target).context("failed to initialize logging")?;

    let config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;

    if let Some(ticks) = args.headless {
        let snapshot = driver::run_headless(config, ticks, args.seed)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let snapshot = run_tui(config, args.seed)?;
    print_scores(&snapshot);
    Ok(())
}

fn run_tui(config: Config, seed: Option<u64>) -> Result<WorldSnapshot> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = driver::run_terminal(&mut terminal, config, seed);

    // Restore terminal even if the game loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn print_scores(snapshot: &WorldSnapshot) {
    println!("Final scores after {} rounds:", snapshot.tick);
    for player in &snapshot.players {
        println!("  {:<8} {:>4}", player.kind.display_name(), player.score);
    }
}

/// Parse command line arguments
fn parse_args(argv: &[String]) -> Result<Args> {
    let program = argv.first().map(String::as_str).unwrap_or("treat-chase");
    let mut args = Args::default();
    let mut rest = argv.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--debug" | "-d" => args.debug = true,
            "--headless" => {
                let value = rest.next().context("--headless requires a tick count")?;
                args.headless = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid tick count: {}", value))?,
                );
            }
            "--seed" | "-s" => {
                let value = rest.next().context("--seed requires a number")?;
                args.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed: {}", value))?,
                );
            }
            "--config" | "-c" => {
                let value = rest.next().context("--config requires a path")?;
                args.config = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_usage(program);
                std::process::exit(0);
            }
            other => {
                print_usage(program);
                bail!("unknown argument: {}", other);
            }
        }
    }

    Ok(args)
}

fn print_usage(program: &str) {
    println!("Treat Chase - collect treats against greedy and AI bots");
    println!();
    println!("Usage:");
    println!("  {}                        # Play in the terminal", program);
    println!("  {} --headless <ticks>     # Bots only, print final state as JSON", program);
    println!();
    println!("Options:");
    println!("  -s, --seed <n>       Reproducible treat spawns and AI moves");
    println!("  -c, --config <path>  Use this config file instead of the default");
    println!("  -d, --debug          Verbose logging ({})", logging::LOG_FILE_PATH);
    println!("  -h, --help           Show this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("treat-chase")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_arguments_plays_in_terminal() {
        let args = parse_args(&argv(&[])).unwrap();
        assert!(!args.debug);
        assert!(args.headless.is_none());
    }

    #[test]
    fn test_headless_with_seed() {
        let args = parse_args(&argv(&["--headless", "50", "--seed", "7", "-d"])).unwrap();
        assert_eq!(args.headless, Some(50));
        assert_eq!(args.seed, Some(7));
        assert!(args.debug);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&argv(&["--headless"])).is_err());
        assert!(parse_args(&argv(&["--seed", "abc"])).is_err());
        assert!(parse_args(&argv(&["--bogus"])).is_err());
    }
}
