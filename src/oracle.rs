//! Reference computations producing the expected register values.

use crate::errors::DriverError;

/// Deterministic, pure function from a test input to the expected result.
pub type OracleFn = fn(i64) -> i64;

/// Spec files may only name functions registered here.
const ORACLES: &[(&str, OracleFn)] = &[
    ("triangleNumber", triangle_number),
    ("arrayAddition", array_addition),
];

/// Look up an oracle by the name used in the specification file.
pub fn lookup_oracle(name: &str) -> Result<OracleFn, DriverError> {
    ORACLES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
        .ok_or_else(|| DriverError::UnknownOracle(name.to_string()))
}

/// Names of all registered oracles.
pub fn oracle_names() -> impl Iterator<Item = &'static str> {
    ORACLES.iter().map(|(n, _)| *n)
}

/// 1 + 2 + ... + n, zero for non-positive input.
fn triangle_number(n: i64) -> i64 {
    (1..=n).sum()
}

/// Element-wise sum of A[i] = i and B[i] = i - 1 over [0, n), reduced to a
/// scalar. Closed form n * (n - 1).
fn array_addition(n: i64) -> i64 {
    (0..n).map(|i| i + (i - 1)).sum()
}
