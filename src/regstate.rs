//! Conversion between register maps and the simulator's textual formats.

use std::collections::BTreeMap;

use crate::errors::DriverError;

/// Registers the simulator reports by name rather than index. They are
/// bookkeeping, never part of the verified state.
pub const SPECIAL_REGISTERS: [&str; 4] = ["ACC", "ADDR", "PC", "INSTRUCTIONS EXECUTED"];

/// Register file snapshot, register index to value. Ordered so the encoded
/// wire string is deterministic.
pub type RegState = BTreeMap<u32, i64>;

/// Render a register state as the simulator's `--rs` argument: `index:value`
/// pairs joined by commas, no trailing separator.
pub fn encode_regstate(state: &RegState) -> String {
    state
        .iter()
        .map(|(reg, val)| format!("{}:{}", reg, val))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse the register report the simulator prints on exit.
///
/// Lines mentioning a special register are skipped wholesale. Every other
/// line holds whitespace-separated `index:value` pairs; a later occurrence
/// of an index overwrites an earlier one.
pub fn decode_report(report: &str) -> Result<RegState, DriverError> {
    let mut state = RegState::new();
    for line in report.lines() {
        if SPECIAL_REGISTERS.iter().any(|name| line.contains(name)) {
            continue;
        }
        for token in line.split_whitespace() {
            let malformed = || DriverError::Format {
                token: token.to_string(),
            };
            let (reg, val) = token.split_once(':').ok_or_else(malformed)?;
            let reg = reg.parse::<u32>().map_err(|_| malformed())?;
            let val = val.parse::<i64>().map_err(|_| malformed())?;
            state.insert(reg, val);
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_ordered_and_unterminated() {
        let state = RegState::from([(4, 10), (2, -1), (9, 0)]);
        assert_eq!(encode_regstate(&state), "2:-1,4:10,9:0");
        assert_eq!(encode_regstate(&RegState::new()), "");
    }

    #[test]
    fn encode_decode_round_trip() {
        // the report format separates pairs with whitespace where the `--rs`
        // string uses commas
        let state = RegState::from([(0, 7), (4, 42), (11, -3)]);
        let decoded = decode_report(&encode_regstate(&state).replace(',', " ")).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn decode_multi_line_report() {
        let report = "0:1 1:2\n4:10\n";
        let state = decode_report(report).unwrap();
        assert_eq!(state, RegState::from([(0, 1), (1, 2), (4, 10)]));
    }

    #[test]
    fn special_register_lines_are_dropped() {
        let report = "PC: 20\n4:10 5:7\nACC: 3 6:9\nINSTRUCTIONS EXECUTED: 13\n";
        let state = decode_report(report).unwrap();
        // the ACC line carried a well-formed pair for register 6; it must
        // still be dropped with the rest of the line
        assert_eq!(state, RegState::from([(4, 10), (5, 7)]));
    }

    #[test]
    fn later_duplicates_overwrite() {
        let state = decode_report("4:1\n4:2").unwrap();
        assert_eq!(state, RegState::from([(4, 2)]));
    }

    #[test]
    fn rejects_tokens_without_separator() {
        let err = decode_report("4:1 17").unwrap_err();
        assert!(matches!(err, DriverError::Format { token } if token == "17"));
    }

    #[test]
    fn rejects_non_numeric_pairs() {
        assert!(decode_report("a:1").is_err());
        assert!(decode_report("4:").is_err());
    }
}
