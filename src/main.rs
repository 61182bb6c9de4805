//! Gridpilot - letter-grid word solver and pointer gesture driver
//!
//! Solves word-search boards and replays the solutions as absolute pointer
//! gestures on a paired host.

use anyhow::{anyhow, bail, Context};
use gridpilot::app::cli::{Cli, Commands, ConfigAction};
use gridpilot::app::config::Config;
use gridpilot::board::grid::Board;
use gridpilot::board::search::{self, WordFind};
use gridpilot::board::select;
use gridpilot::dict::lexicon::{self, DictionaryFile};
use gridpilot::gesture::calibration::CalibrationProfile;
use gridpilot::gesture::mapper::CellMapper;
use gridpilot::gesture::sequencer::GestureSequencer;
use gridpilot::pointer::motion::MotionController;
use gridpilot::pointer::state::{clamp_axis, PointerState, AXIS_MAX};
use gridpilot::pointer::transport::{HidGadgetTransport, PointerTransport, TraceTransport};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Solve {
            board,
            dict,
            calibration,
            top_left,
            bottom_right,
            device,
            limit,
            dry_run,
        } => {
            let corners = match (top_left, bottom_right) {
                (Some(tl), Some(br)) => Some((parse_corner(&tl)?, parse_corner(&br)?)),
                _ => None,
            };
            run_solve(
                board, dict, calibration, corners, device, limit, dry_run, &config,
            )?;
        }
        Commands::CompileDict { input, output } => {
            run_compile_dict(&input, output)?;
        }
        Commands::Calibrate { output, rows, cols } => {
            run_calibrate(output, rows, cols, &config)?;
        }
        Commands::Probe {
            buttons,
            x,
            y,
            wheel,
            device,
        } => {
            run_probe(buttons, x, y, wheel, device)?;
        }
        Commands::Config { action } => {
            run_config(action, cli.config)?;
        }
    }

    Ok(())
}

/// Parse an "x,y" coordinate pair.
fn parse_corner(text: &str) -> anyhow::Result<(i32, i32)> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("expected \"x,y\", got {text:?}"))?;
    Ok((
        x.trim().parse().with_context(|| format!("bad x in {text:?}"))?,
        y.trim().parse().with_context(|| format!("bad y in {text:?}"))?,
    ))
}

#[allow(clippy::too_many_arguments)]
fn run_solve(
    board: Option<String>,
    dict: Option<PathBuf>,
    calibration: Option<PathBuf>,
    corners: Option<((i32, i32), (i32, i32))>,
    device: Option<PathBuf>,
    limit: Option<usize>,
    dry_run: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let dict_path = dict.unwrap_or_else(Cli::default_dictionary_path);
    let dictionary = DictionaryFile::load(&dict_path).with_context(|| {
        format!(
            "cannot load dictionary {} (run `gridpilot compile-dict <word list>` first)",
            dict_path.display()
        )
    })?;
    info!(
        words = dictionary.metadata.word_count,
        source = %dictionary.metadata.source,
        "loaded dictionary"
    );

    let limit = limit.unwrap_or(config.solver.limit);

    // The mapper is only needed when gestures will actually be sent, but
    // calibration problems should surface before any solve attempt.
    let mapper = if dry_run {
        None
    } else {
        Some(build_mapper(calibration, corners, config)?)
    };

    match board {
        Some(board) => {
            let ranked = solve_board(&board, &dictionary, limit, config)?;
            print_words(&ranked);
            if let Some(mapper) = mapper {
                trace_words(device, mapper, config, &ranked)?;
            }
        }
        None => {
            let expected = config.grid.rows * config.grid.cols;
            let stdin = std::io::stdin();
            loop {
                print!("Enter {expected} letters (row-major, a-z), or 'quit': ");
                std::io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let line = line.trim();
                if line.is_empty() || line.eq_ignore_ascii_case("quit") {
                    break;
                }

                // A malformed board is reported and the prompt retried; it
                // never tears down the session.
                let ranked = match solve_board(line, &dictionary, limit, config) {
                    Ok(ranked) => ranked,
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                };
                print_words(&ranked);
                if let Some(mapper) = mapper.clone() {
                    trace_words(device.clone(), mapper, config, &ranked)?;
                }
            }
        }
    }

    Ok(())
}

fn solve_board(
    board: &str,
    dictionary: &DictionaryFile,
    limit: usize,
    config: &Config,
) -> anyhow::Result<Vec<WordFind>> {
    let board = Board::parse(board, config.grid.rows, config.grid.cols)?;
    let finds = search::find_words(&board, &dictionary.trie);
    Ok(select::rank_and_limit(finds, limit))
}

fn print_words(ranked: &[WordFind]) {
    println!("Found {} words:", ranked.len());
    for find in ranked {
        let cells: Vec<String> = find
            .path
            .iter()
            .map(|c| format!("({},{})", c.row, c.col))
            .collect();
        println!("  {} at {}", find.word, cells.join(" "));
    }
}

fn build_mapper(
    calibration: Option<PathBuf>,
    corners: Option<((i32, i32), (i32, i32))>,
    config: &Config,
) -> anyhow::Result<CellMapper> {
    if let Some(path) = calibration {
        let profile = CalibrationProfile::load(&path)?;
        return Ok(CellMapper::from_profile(&profile)?);
    }
    if let Some((top_left, bottom_right)) = corners {
        return Ok(CellMapper::interpolated(
            top_left,
            bottom_right,
            config.grid.rows,
            config.grid.cols,
        )?);
    }

    let default = Cli::default_calibration_path();
    if default.exists() {
        let profile = CalibrationProfile::load(&default)?;
        return Ok(CellMapper::from_profile(&profile)?);
    }
    bail!(
        "no calibration available: pass --calibration, or --top-left/--bottom-right, \
         or run `gridpilot calibrate` first"
    )
}

fn trace_words(
    device: Option<PathBuf>,
    mapper: CellMapper,
    config: &Config,
    ranked: &[WordFind],
) -> anyhow::Result<()> {
    match device {
        Some(path) => {
            let transport = HidGadgetTransport::open(&path)?;
            sequence(transport, mapper, config, ranked)
        }
        None => {
            warn!("no --device given; pointer states go to the trace log only");
            sequence(TraceTransport, mapper, config, ranked)
        }
    }
}

fn sequence<T: PointerTransport>(
    transport: T,
    mapper: CellMapper,
    config: &Config,
    ranked: &[WordFind],
) -> anyhow::Result<()> {
    let motion = MotionController::new(transport, config.pointer.clone())?;
    let mut sequencer = GestureSequencer::new(motion, mapper, config.gesture.clone())?;

    match sequencer.run(ranked) {
        Ok(report) => {
            info!(
                words = report.words_traced,
                states = report.stats.states_sent,
                failed = report.stats.sends_failed,
                interrupted = report.interrupted,
                "gesture run complete"
            );
            Ok(())
        }
        Err(e @ gridpilot::Error::StuckButton { .. }) => {
            // Force a release retry so the host is not left with a held
            // button, then surface the abort.
            warn!("{e}; retrying release");
            let mut motion = sequencer.into_motion();
            motion
                .release()
                .map_err(|retry| anyhow!("release retry also failed: {retry}"))?;
            info!("release retry delivered; remaining gestures aborted");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_compile_dict(input: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(Cli::default_dictionary_path);
    let (trie, stats) = lexicon::compile_word_list(input)?;
    if trie.is_empty() {
        bail!("{} contains no usable words", input.display());
    }

    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let dictionary = DictionaryFile::new(trie, source);

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    dictionary.save(&output)?;

    println!(
        "Compiled {} words ({} lines skipped) to {}",
        dictionary.metadata.word_count,
        stats.skipped(),
        output.display()
    );
    Ok(())
}

fn run_calibrate(
    output: Option<PathBuf>,
    rows: Option<usize>,
    cols: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let rows = rows.unwrap_or(config.grid.rows);
    let cols = cols.unwrap_or(config.grid.cols);
    let output = output.unwrap_or_else(Cli::default_calibration_path);

    println!("Calibrating a {rows}x{cols} grid.");
    println!("For each cell, enter the device coordinate as two integers: x y");

    let mut profile = CalibrationProfile::new(rows, cols);
    let stdin = std::io::stdin();
    for cell in 0..rows * cols {
        loop {
            print!("cell {} (row {}, col {}): ", cell, cell / cols, cell % cols);
            std::io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                bail!("calibration aborted at cell {cell}");
            }
            match parse_coordinate(line.trim()) {
                Ok((x, y)) => {
                    profile.set(cell, x, y);
                    break;
                }
                Err(e) => eprintln!("{e}"),
            }
        }
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    profile.save(&output)?;
    println!("Saved calibration profile to {}", output.display());
    Ok(())
}

/// Parse an "x y" pair within the absolute axis range.
fn parse_coordinate(line: &str) -> anyhow::Result<(u16, u16)> {
    let mut parts = line.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected two integers, got {line:?}");
    };
    let x: i32 = x.parse().with_context(|| format!("bad x {x:?}"))?;
    let y: i32 = y.parse().with_context(|| format!("bad y {y:?}"))?;
    if !(0..=AXIS_MAX).contains(&x) || !(0..=AXIS_MAX).contains(&y) {
        bail!("({x}, {y}) outside 0-{AXIS_MAX}");
    }
    Ok((x as u16, y as u16))
}

fn run_probe(
    buttons: u8,
    x: u16,
    y: u16,
    wheel: i8,
    device: Option<PathBuf>,
) -> anyhow::Result<()> {
    let state = PointerState::new(
        buttons,
        clamp_axis(x as i32),
        clamp_axis(y as i32),
        wheel,
    );
    println!(
        "Sending absolute pointer state: buttons={} x={} y={} wheel={}",
        state.buttons, state.x, state.y, state.wheel
    );

    match device {
        Some(path) => HidGadgetTransport::open(&path)?.send(state)?,
        None => TraceTransport.send(state)?,
    }
    Ok(())
}

fn run_config(action: ConfigAction, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = match &config_path {
                Some(path) => Config::load(path)?,
                None => Config::load_default()?,
            };
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let path = config_path.unwrap_or_else(Config::default_path);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
    }
    Ok(())
}
