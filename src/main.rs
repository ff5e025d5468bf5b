use std::path::PathBuf;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use leros_driver::cli::{self, verbose};
use leros_driver::{Driver, DriverOptions};

/// Test driver for the Leros compiler backend and instruction-set simulator.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    styles = cli::get_styles(),
    arg_required_else_help = true,
)]
struct Args {
    /// Directory containing the LLVM tools (`llc`, `llvm-objcopy`)
    #[arg(long = "llp", value_name = "DIR")]
    llvm_path: PathBuf,

    /// Path to the simulator executable
    #[arg(long = "sim", value_name = "FILE")]
    sim_executable: PathBuf,

    /// Path to the test specification file
    #[arg(long = "test", value_name = "FILE")]
    test_file: PathBuf,

    /// Print logs during test execution
    #[command(flatten)]
    verbose: verbose::Verbosity,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // incomplete arguments print the usage screen and exit 1
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let log_level = cli::verbose_level_to_trace(args.verbose.log_level());
    cli::logging_setup(log_level, None::<&std::fs::File>);

    let driver = Driver::new(DriverOptions {
        toolchain_dir: args.llvm_path,
        sim_executable: args.sim_executable,
        spec_file: args.test_file,
    })?;

    tracing::debug!("loaded {} test specs", driver.specs().len());

    let summary = driver.run();
    println!(
        "{} passed, {} failed, {} errored",
        summary.passed, summary.failed, summary.errored
    );
    Ok(())
}
