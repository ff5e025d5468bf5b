//! Test driver for the Leros toolchain: compiles small test modules with the
//! LLVM backend, runs them on the instruction-set simulator and checks the
//! final register state against oracle functions evaluated in-process.

pub mod cli;
mod driver;
mod errors;
mod oracle;
mod regstate;
mod spec;

pub use driver::{Driver, DriverOptions, RunSummary};
pub use errors::DriverError;
pub use oracle::{lookup_oracle, oracle_names, OracleFn};
pub use regstate::{decode_report, encode_regstate, RegState, SPECIAL_REGISTERS};
pub use spec::{load_specs, TestSpec};
