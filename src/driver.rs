//! Test execution: compile, extract, simulate, verify.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;

use crate::errors::DriverError;
use crate::oracle;
use crate::regstate::{self, RegState};
use crate::spec::{self, TestSpec};

/// Register the test program reads its input from and leaves its result in.
const IO_REGISTER: u32 = 4;

/// Immutable run configuration, built once from the CLI arguments.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Directory holding `llc` and `llvm-objcopy`.
    pub toolchain_dir: PathBuf,
    /// Simulator executable.
    pub sim_executable: PathBuf,
    /// Test specification file.
    pub spec_file: PathBuf,
}

/// Aggregated outcome of a run, counted per iteration (per spec for errors
/// that fail a spec before its first iteration).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

/// Per-test artifact paths, derived from the source module by extension
/// substitution.
#[derive(Debug, Clone)]
struct TestArtifacts {
    source: PathBuf,
    object: PathBuf,
    binary: PathBuf,
}

impl TestArtifacts {
    fn derive(source: &Path) -> Self {
        let mut object = source.to_path_buf();
        object.set_extension("o");
        let mut binary = source.to_path_buf();
        binary.set_extension("bin");
        Self {
            source: source.to_path_buf(),
            object,
            binary,
        }
    }
}

pub struct Driver {
    options: DriverOptions,
    specs: Vec<TestSpec>,
}

impl Driver {
    /// Load the specification file and prepare a run. Unreadable files and
    /// malformed lines fail here, before any test executes.
    pub fn new(options: DriverOptions) -> Result<Self> {
        let specs = spec::load_specs(&options.spec_file)?;
        Ok(Self { options, specs })
    }

    pub fn specs(&self) -> &[TestSpec] {
        &self.specs
    }

    /// Run every spec in file order. One iteration's failure never stops the
    /// run; the summary carries the counts.
    pub fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for spec in &self.specs {
            self.run_spec(spec, &mut summary);
        }
        summary
    }

    fn run_spec(&self, spec: &TestSpec, summary: &mut RunSummary) {
        let oracle_fn = match oracle::lookup_oracle(&spec.oracle) {
            Ok(f) => f,
            Err(err) => {
                report_error(&err);
                summary.errored += 1;
                return;
            }
        };
        if spec.range_start >= spec.range_end {
            tracing::warn!(
                "empty input range for `{}`, nothing to do",
                spec.test_file.display()
            );
            return;
        }

        let artifacts = TestArtifacts::derive(&spec.test_file);
        for i in spec.inputs() {
            let input = RegState::from([(IO_REGISTER, i)]);
            let expected = RegState::from([(IO_REGISTER, oracle_fn(i))]);
            match self.execute(&artifacts, &input, &expected) {
                Ok(true) => summary.passed += 1,
                Ok(false) => summary.failed += 1,
                Err(err) => {
                    report_error(&err);
                    summary.errored += 1;
                }
            }
        }
    }

    /// Compile, extract and simulate one input, then verify the expected
    /// registers. Returns whether all of them matched.
    fn execute(
        &self,
        artifacts: &TestArtifacts,
        input: &RegState,
        expected: &RegState,
    ) -> Result<bool, DriverError> {
        // The tools drop derived artifacts next to their input, so each
        // command runs from the test module's directory.
        let work_dir = artifacts.source.parent().unwrap_or(Path::new("."));

        let mut compile = Command::new(self.options.toolchain_dir.join("llc"));
        compile
            .arg("-march=leros32")
            .arg(&artifacts.source)
            .arg("--filetype=obj")
            .current_dir(work_dir);
        run_tool("llc", &mut compile)?;

        let mut extract = Command::new(self.options.toolchain_dir.join("llvm-objcopy"));
        extract
            .arg(&artifacts.object)
            .arg("--dump-section")
            .arg(format!(".text={}", artifacts.binary.display()))
            .current_dir(work_dir);
        run_tool("llvm-objcopy", &mut extract)?;

        let regstate = regstate::encode_regstate(input);
        tracing::info!("calling simulator with initial register state `{regstate}`");
        let mut simulate = Command::new(&self.options.sim_executable);
        simulate
            .arg("--osmr")
            .arg("--je")
            .arg(format!("--rs={regstate}"))
            .arg("-f")
            .arg(&artifacts.binary)
            .current_dir(work_dir);
        let report = run_tool("sim", &mut simulate)?;

        let actual = regstate::decode_report(&report)?;
        let mut clean = true;
        for (reg, want) in expected {
            let got = *actual.get(reg).ok_or(DriverError::MissingRegister(*reg))?;
            if got != *want {
                clean = false;
                println!(
                    "{}: discrepancy on register {reg}: expected {want}, actual {got}",
                    ansi_term::Colour::Red.bold().paint("FAIL")
                );
            }
        }
        if clean {
            println!(
                "{}: all registers are as expected",
                ansi_term::Colour::Green.paint("ok")
            );
        }
        Ok(clean)
    }
}

fn report_error(err: &DriverError) {
    println!("{}: {err}", ansi_term::Colour::Red.bold().paint("ERROR"));
    if let DriverError::Tool { output, .. } = err {
        if !output.is_empty() {
            println!("{output}");
        }
    }
}

/// Run one external command to completion, capturing its output. A non-zero
/// exit becomes a `Tool` error carrying everything the command printed.
fn run_tool(tool: &str, command: &mut Command) -> Result<String, DriverError> {
    tracing::debug!("running {command:?}");
    let output = command.output().map_err(|source| DriverError::Spawn {
        tool: tool.to_string(),
        source,
    })?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let mut captured = stdout;
        captured.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(DriverError::Tool {
            tool: tool.to_string(),
            status: output.status,
            output: captured,
        });
    }
    Ok(stdout)
}
