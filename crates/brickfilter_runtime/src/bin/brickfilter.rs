//! brickfilter CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use brickfilter_runtime::{Repl, RuntimeConfig, Step};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    commands: Vec<String>,
    save: Option<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    yaw: Option<f64>,
    paint: Option<[u8; 3]>,
    seed: Option<u64>,
    assume_yes: bool,
    confirm_timeout: Option<u64>,
    log: Option<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "-y" | "--yes" => config.assume_yes = true,
            flag @ ("-c" | "--command") => {
                config.commands.push(value(args, &mut i, flag)?.to_string());
            }
            flag @ ("-o" | "--save") => {
                config.save = Some(PathBuf::from(value(args, &mut i, flag)?));
            }
            flag @ "--yaw" => {
                let raw = value(args, &mut i, flag)?;
                config.yaw = Some(raw.parse().map_err(|_| format!("invalid --yaw value: {raw}"))?);
            }
            flag @ "--paint" => {
                let raw = value(args, &mut i, flag)?;
                let channels = raw
                    .split(',')
                    .map(|c| c.trim().parse::<u8>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| format!("invalid --paint value: {raw}"))?;
                let [r, g, b] = channels.as_slice() else {
                    return Err(format!("--paint expects r,g,b, got {raw}").into());
                };
                config.paint = Some([*r, *g, *b]);
            }
            flag @ "--seed" => {
                let raw = value(args, &mut i, flag)?;
                config.seed = Some(raw.parse().map_err(|_| format!("invalid --seed value: {raw}"))?);
            }
            flag @ "--confirm-timeout" => {
                let raw = value(args, &mut i, flag)?;
                config.confirm_timeout = Some(
                    raw.parse()
                        .map_err(|_| format!("invalid --confirm-timeout value: {raw}"))?,
                );
            }
            flag @ "--log" => config.log = Some(value(args, &mut i, flag)?.to_string()),
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn runtime_config(cli: &CliConfig) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env().with_assume_yes(cli.assume_yes);
    if let Some(filter) = &cli.log {
        config = config.with_log_filter(filter.clone());
    }
    if let Some(yaw) = cli.yaw {
        config = config.with_yaw(yaw);
    }
    if let Some(paint) = cli.paint {
        config = config.with_paint(paint);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(secs) = cli.confirm_timeout {
        config = config.with_confirm_timeout(Duration::from_secs(secs));
    }
    config
}

/// Returns `Ok(false)` when a batch command failed.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(true);
    }

    if cli.show_version {
        println!("brickfilter {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    let config = runtime_config(&cli);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(std::io::stderr)
        .init();

    let mut repl = Repl::new(&config)?;

    for (i, file) in cli.files.iter().enumerate() {
        let count = repl.load_world(file, i > 0)?;
        println!("loaded {count} bricks from {}", file.display());
    }

    let mut ok = true;
    for command in &cli.commands {
        match repl.eval(command) {
            Ok(Step::Continue(lines)) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Ok(Step::Quit) => break,
            Err(e) => {
                eprintln!("\x1b[31mError: {}\x1b[0m", e.render());
                ok = false;
                if cli.batch_mode {
                    break;
                }
            }
        }
    }

    if let Some(path) = &cli.save {
        brickfilter_runtime::save_to_file(repl.host().world(), path)?;
        println!("saved {} bricks to {}", repl.host().world().len(), path.display());
    }

    if cli.batch_mode {
        return Ok(ok);
    }

    // Files or commands already set the context
    if !cli.files.is_empty() || !cli.commands.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(true)
}

fn print_help() {
    println!(
        "\x1b[1mbrickfilter\x1b[0m - Select and edit bricks with filter commands

\x1b[1mUSAGE:\x1b[0m
    brickfilter [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Save files to load into the world before starting

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                 Print help information
    -V, --version              Print version information
    -b, --batch                Run the given commands and exit (no REPL)
    -c, --command <CMD>        Run a command or :meta command (repeatable)
    -o, --save <FILE>          Save the world after running commands
    -y, --yes                  Confirm world-wide commands without asking
        --yaw <DEG>            Viewer yaw for relative axes
        --paint <R,G,B>        Viewer paint color
        --seed <N>             Seed for chance()
        --confirm-timeout <S>  Seconds to wait for a confirmation (default 30)
        --log <FILTER>         Log filter (default: $BRICKFILTER_LOG or warn)

\x1b[1mEXAMPLES:\x1b[0m
    brickfilter build.msgpack
    brickfilter -b -y build.msgpack -c 'all mat(glow) replace mat(plastic)' -o out.msgpack
    brickfilter --log brickfilter_engine=debug

\x1b[1mCOMMANDS:\x1b[0m
    [all] <filters...> [replace|copy|delete|count|extract] <transforms...>
    Type :help in the REPL for meta commands."
    );
}
