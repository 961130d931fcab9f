//! Example program built on `cmdopts`
//!
//! Run with:
//! ```bash
//! cargo run -p cmdopts-demo -- -in a.txt -out b.txt -v
//! cargo run -p cmdopts-demo -- -h
//! ```
//!
//! Missing `-in`/`-out`, unknown tokens or a bad `-opt1` print diagnostics
//! and exit with status 1.

use cmdopts::Session;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let options = Session::new("Program that shows you how this thing works.");
    options.declare_required("-in", "an input file")?;
    options.declare_required("-out", "an output file")?;
    options.declare_switch("-super", "do the work in super mode.", false)?;
    options.declare_switch("-v", "enable verbose mode", false)?;
    options.declare_optional("-opt1", "this is optional", "5")?;
    options.attach_validator("-opt1", |_: &str, value: &str| value.parse::<i64>().is_ok())?;

    let left_overs = options.parse_env();
    tracing::debug!(?left_overs, "Parsed arguments");

    let input_file = options.get_value("-in")?;
    let output_file = options.get_value("-out")?;
    println!("input = {input_file}");
    println!("output = {output_file}");
    println!("opt1 = {}", options.get_value_as::<i64>("-opt1")?);

    if options.get_switch("-super") {
        println!("about to make whatever this is super :D");
    } else {
        println!("about to make whatever this is regular :|");
    }
    if options.get_switch("-v") {
        println!("program = {}", options.program_name());
        println!("left-overs = {left_overs:?}");
    }

    Ok(())
}
