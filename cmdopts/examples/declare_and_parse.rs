//! Example demonstrating option declaration, parsing and validation
//!
//! This example shows how to declare options, plug in a result handler that
//! does not exit, attach validators and read typed values.
//!
//! Run with `RUST_LOG=trace` to see every token the parser classifies.

use cmdopts::{ParseReport, ResultHandler, Session};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Helper function to print the four anomaly lists of a report
fn print_report(report: &ParseReport) {
    println!("  Unknown tokens:   {:?}", report.unknown);
    println!("  Missing required: {:?}", report.missing_required);
    println!("  Missing a value:  {:?}", report.valueless);
    for name in &report.invalid {
        println!(
            "  Invalid:          {} = {:?}",
            name,
            report.value_of(name).unwrap_or_default()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    println!("=== Command-Line Options Example ===\n");

    // Example 1: Declaring and parsing
    println!("Example 1: Declaring and parsing");
    println!("--------------------------------");

    let reports = Arc::new(Mutex::new(Vec::new()));
    let session = Session::with_extra_usage("Copies an input file to an output file.", "[FILES...]");
    session.set_result_handler(ResultHandler::collect(Arc::clone(&reports)))?;
    session.declare_required("-in", "an input file")?;
    session.declare_required("-out", "an output file")?;
    session.declare_switch("-v", "enable verbose mode", false)?;
    session.declare_optional("-retries", "number of attempts", "3")?;

    let left_overs = session.parse([
        "/usr/local/bin/copier",
        "-in",
        "a.txt",
        "-out",
        "b.txt",
        "-v",
        "extra.txt",
    ]);

    println!("Program name: {}", session.program_name());
    println!("Input:        {}", session.get_value("-in")?);
    println!("Output:       {}", session.get_value("-out")?);
    println!("Verbose:      {}", session.get_switch("-v"));
    println!("Retries:      {}", session.get_value_as::<u32>("-retries")?);
    println!("Left-overs:   {left_overs:?}");

    // Example 2: Validators and anomalies
    println!("\n\nExample 2: Validators and anomalies");
    println!("-----------------------------------");

    session.attach_validator("-retries", |_: &str, value: &str| {
        value.parse::<u32>().is_ok_and(|n| n <= 10)
    })?;
    let _ = session.parse(["copier", "-retries", "50", "--bogus", "-out"]);

    if let Some(report) = reports.lock().last() {
        print_report(report);
    }

    // Example 3: List values
    println!("\n\nExample 3: List values");
    println!("----------------------");

    let lists = Session::new("List values");
    lists.set_result_handler(ResultHandler::ignore())?;
    lists.declare_optional("-ports", "comma separated ports", "80,443")?;
    let _ = lists.parse(["server", "-ports", "8080,,8443,"]);
    println!("Ports: {:?}", lists.get_values_as::<u16>("-ports", ',')?);

    // Example 4: Usage text
    println!("\n\nExample 4: Usage text");
    println!("---------------------");
    session.print_usage(&mut std::io::stdout())?;

    println!("=== Example completed successfully! ===");
    Ok(())
}
