//! Test specification files: one test per line, `;`-separated fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::errors::DriverError;

/// One line of the specification file: an oracle name, the input range to
/// sweep and the test module exercised over it.
#[derive(Debug, Clone)]
pub struct TestSpec {
    /// Name of the registered oracle function.
    pub oracle: String,
    /// First input value, inclusive.
    pub range_start: i64,
    /// End of the input range, exclusive.
    pub range_end: i64,
    /// Step between input values, always positive.
    pub interval: i64,
    /// Test module path, resolved against the spec file's own directory.
    pub test_file: PathBuf,
}

impl TestSpec {
    /// Input values of the half-open range `[range_start, range_end)`,
    /// stepped by `interval`.
    pub fn inputs(&self) -> impl Iterator<Item = i64> + '_ {
        (self.range_start..self.range_end).step_by(self.interval as usize)
    }
}

const FIELD_COUNT: usize = 5;

/// Load all test specs from `path`, preserving file order. Blank lines are
/// skipped; any malformed line fails the whole load.
pub fn load_specs(path: &Path) -> Result<Vec<TestSpec>> {
    let path = path
        .canonicalize()
        .with_context(|| format!("could not locate test specification `{}`", path.display()))?;
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("could not read test specification `{}`", path.display()))?;
    let spec_dir = path.parent().unwrap_or(Path::new("."));

    let mut specs = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let spec = parse_line(line, spec_dir).map_err(|reason| DriverError::Parse {
            line: idx + 1,
            reason,
        })?;
        specs.push(spec);
    }
    Ok(specs)
}

fn parse_line(line: &str, spec_dir: &Path) -> Result<TestSpec, String> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} `;`-separated fields, got {}",
            fields.len()
        ));
    }
    let interval = parse_int(fields[3], "interval")?;
    if interval <= 0 {
        return Err(format!("interval must be positive, got {interval}"));
    }
    Ok(TestSpec {
        oracle: fields[0].to_string(),
        range_start: parse_int(fields[1], "range start")?,
        range_end: parse_int(fields[2], "range end")?,
        interval,
        test_file: spec_dir.join(fields[4]),
    })
}

fn parse_int(field: &str, what: &str) -> Result<i64, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("{what} `{field}` is not an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_spec(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.spec");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn parses_a_literal_line() {
        let (dir, path) = write_spec("triangleNumber;1;5;1;prog.ll\n");
        let specs = load_specs(&path).unwrap();
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.oracle, "triangleNumber");
        assert_eq!(spec.range_start, 1);
        assert_eq!(spec.range_end, 5);
        assert_eq!(spec.interval, 1);
        let spec_dir = dir.path().canonicalize().unwrap();
        assert_eq!(spec.test_file, spec_dir.join("prog.ll"));
    }

    #[test]
    fn preserves_file_order_and_skips_blank_lines() {
        let (_dir, path) = write_spec(
            "triangleNumber;0;4;1;a.ll\n\narrayAddition;2;8;2;sub/b.ll\n",
        );
        let specs = load_specs(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].oracle, "triangleNumber");
        assert_eq!(specs[1].oracle, "arrayAddition");
        assert!(specs[1].test_file.ends_with("sub/b.ll"));
    }

    #[test]
    fn load_is_all_or_nothing() {
        let (_dir, path) = write_spec("triangleNumber;0;4;1;a.ll\ntriangleNumber;0;4;a.ll\n");
        let err = load_specs(&path).unwrap_err();
        let err = err.downcast::<DriverError>().unwrap();
        assert!(matches!(err, DriverError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let (_dir, path) = write_spec("triangleNumber;zero;4;1;a.ll\n");
        assert!(load_specs(&path).is_err());
    }

    #[test]
    fn rejects_non_positive_interval() {
        let (_dir, path) = write_spec("triangleNumber;0;4;0;a.ll\n");
        assert!(load_specs(&path).is_err());
        let (_dir, path) = write_spec("triangleNumber;0;4;-2;a.ll\n");
        assert!(load_specs(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_specs(Path::new("/nonexistent/tests.spec")).is_err());
    }

    #[test]
    fn inputs_step_through_the_half_open_range() {
        let (_dir, path) = write_spec("triangleNumber;0;10;3;a.ll\n");
        let specs = load_specs(&path).unwrap();
        let inputs: Vec<_> = specs[0].inputs().collect();
        assert_eq!(inputs, [0, 3, 6, 9]);
    }
}
