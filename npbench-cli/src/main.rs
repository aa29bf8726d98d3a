use std::env;
use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Error};
use clap::{value_t, values_t, App, AppSettings, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};

use npbench::{run_benchmarks, BenchConfig, BenchConfigUpdate};

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{:#}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("NPBENCH_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is npbench {}", env!("NPBENCH_VERSION"));
    info!(
        "  {} build - {}",
        env!("NPBENCH_PROFILE"),
        env!("NPBENCH_RUSTC_VERSION")
    );
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("npbench")
        .version(env!("NPBENCH_VERSION"))
        .about("Time-budgeted benchmarks for 3-SAT, TSP, vertex cover and knapsack")
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[seed] --seed=[SEED] 'Seed of the instance generator'")
        .arg_from_usage("[minutes] --minutes=[MINUTES] 'Global wall-clock budget in minutes'")
        .arg_from_usage(
            "[per-problem-max-seconds] --per-problem-max-seconds=[SECONDS] \
             'Wall-clock budget of each problem track'",
        )
        .arg_from_usage("--no-accelerator 'Never use an accelerated distance matrix backend'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'npbench -C help' for a list of options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .arg_from_usage(
            "[out] -o --out=[FILE] 'Write the JSON report to the specified file instead of stdout'",
        )
        .get_matches();

    if values_t!(matches, "config-option", String)
        .unwrap_or_default()
        .iter()
        .any(|option| option == "help")
    {
        print!("{}", BenchConfig::help());
        return Ok(0);
    }

    init_logging();
    banner();

    let mut config_update = BenchConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        info!("Reading config file '{}'", config_path);
        let config_contents = fs::read_to_string(config_path)
            .with_context(|| format!("could not read config file '{}'", config_path))?;
        config_update.merge(BenchConfigUpdate::from_toml(&config_contents)?);
    }

    for config_option in values_t!(matches, "config-option", String).unwrap_or_default() {
        config_update.merge(BenchConfigUpdate::from_toml(&config_option)?);
    }

    let mut flags = BenchConfigUpdate::new();
    if matches.is_present("seed") {
        flags.seed = Some(value_t!(matches, "seed", u64)?);
    }
    if matches.is_present("minutes") {
        flags.minutes = Some(value_t!(matches, "minutes", f64)?);
    }
    if matches.is_present("per-problem-max-seconds") {
        flags.per_problem_max_seconds = Some(value_t!(matches, "per-problem-max-seconds", f64)?);
    }
    if matches.is_present("no-accelerator") {
        flags.use_accelerator = Some(false);
    }
    config_update.merge(flags);

    let mut config = BenchConfig::default();
    config_update.apply(&mut config);

    let report = run_benchmarks(&config);
    let json = serde_json::to_string_pretty(&report)?;

    match matches.value_of("out") {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("could not write report to '{}'", path))?;
            info!("Wrote report to '{}'", path);
        }
        None => {
            let stdout = io::stdout();
            let mut locked_stdout = stdout.lock();
            writeln!(locked_stdout, "{}", json)?;
        }
    }

    Ok(0)
}
