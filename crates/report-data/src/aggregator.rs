//! Group-and-average report strategies.
//!
//! [`GroupAverage`] is the generic driver: it buckets rows by one field,
//! averages a numeric field per bucket and orders the buckets by that average.
//! [`AverageGdpReport`] is its `country` / `gdp` configuration.

use std::borrow::Cow;

use indexmap::IndexMap;

use report_core::error::{ReportError, Result};
use report_core::formatting::{mean, round_half_away};
use report_core::models::{CellValue, ReportStrategy, RowRecord, TabularResult};
use tracing::debug;

/// Decimal places every average is rounded to.
pub const AVERAGE_DECIMALS: u32 = 2;

// ── GroupAverage ──────────────────────────────────────────────────────────────

/// Mean of `value_field` per distinct `group_field`, highest mean first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAverage {
    pub group_field: &'static str,
    pub value_field: &'static str,
    pub group_header: &'static str,
    pub value_header: &'static str,
}

impl GroupAverage {
    pub const fn new(
        group_field: &'static str,
        value_field: &'static str,
        group_header: &'static str,
        value_header: &'static str,
    ) -> Self {
        Self {
            group_field,
            value_field,
            group_header,
            value_header,
        }
    }

    /// Compute `(group, average)` pairs sorted by average, descending.
    ///
    /// Rows with an empty or absent group or value are skipped, and so are
    /// rows whose value does not parse as a number. Groups appear in the
    /// order of their first counted row; the sort is stable, so tied averages
    /// keep that order. Averages are rounded half away from zero to
    /// [`AVERAGE_DECIMALS`] places.
    pub fn averages<'a>(&self, rows: &'a [RowRecord]) -> Vec<(&'a str, f64)> {
        let mut groups: IndexMap<&'a str, Vec<f64>> = IndexMap::new();
        let mut dropped = 0usize;

        for (index, row) in rows.iter().enumerate() {
            let (Some(group), Some(raw)) = (row.get(self.group_field), row.get(self.value_field))
            else {
                continue;
            };
            if group.is_empty() || raw.is_empty() {
                continue;
            }

            match parse_value(self.value_field, raw) {
                Ok(value) => groups.entry(group).or_default().push(value),
                Err(e) => {
                    dropped += 1;
                    debug!(row = index, "Skipping row: {}", e);
                }
            }
        }

        let mut results: Vec<(&'a str, f64)> = groups
            .into_iter()
            .filter_map(|(group, values)| {
                // Adding 0.0 turns -0.0 into 0.0 so it ties with 0.0 below.
                mean(&values).map(|m| (group, round_half_away(m, AVERAGE_DECIMALS) + 0.0))
            })
            .collect();

        results.sort_by(|a, b| b.1.total_cmp(&a.1));

        debug!(
            "Averaged {} '{}' groups from {} rows ({} malformed '{}' values dropped)",
            results.len(),
            self.group_field,
            rows.len(),
            dropped,
            self.value_field,
        );

        results
    }
}

impl ReportStrategy for GroupAverage {
    fn generate(&self, rows: &[RowRecord]) -> TabularResult {
        let headers = vec![self.group_header.to_string(), self.value_header.to_string()];
        let rows = self
            .averages(rows)
            .into_iter()
            .map(|(group, average)| vec![CellValue::from(group), CellValue::Number(average)])
            .collect();

        TabularResult::new(headers, rows)
    }
}

/// Parse a numeric field value, ignoring surrounding whitespace.
///
/// Single underscores between digits are accepted as digit grouping
/// (`"1_000.5"`); any other underscore makes the value malformed.
pub fn parse_value(field: &str, raw: &str) -> Result<f64> {
    let malformed = || ReportError::MalformedValue {
        field: field.to_string(),
        value: raw.to_string(),
    };

    let digits = strip_digit_separators(raw.trim()).ok_or_else(malformed)?;
    digits.parse::<f64>().map_err(|_| malformed())
}

/// Remove `_` separators that sit between two ASCII digits.
///
/// Returns `None` when an underscore is leading, trailing, doubled or next to
/// a non-digit.
fn strip_digit_separators(s: &str) -> Option<Cow<'_, str>> {
    if !s.contains('_') {
        return Some(Cow::Borrowed(s));
    }

    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {}
            _ => return None,
        }
    }

    Some(Cow::Owned(s.replace('_', "")))
}

// ── AverageGdpReport ──────────────────────────────────────────────────────────

/// Average GDP per country, highest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageGdpReport;

impl AverageGdpReport {
    pub const NAME: &'static str = "average-gdp";

    const AVERAGE: GroupAverage = GroupAverage::new("country", "gdp", "Country", "Average GDP");

    pub fn new() -> Self {
        Self
    }
}

impl ReportStrategy for AverageGdpReport {
    fn generate(&self, rows: &[RowRecord]) -> TabularResult {
        Self::AVERAGE.generate(rows)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_csv_files;
    use std::path::Path;

    fn row(country: &str, gdp: &str) -> RowRecord {
        [("country", country), ("gdp", gdp)].into_iter().collect()
    }

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn headers() -> Vec<String> {
        vec!["Country".to_string(), "Average GDP".to_string()]
    }

    // ── generate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input() {
        let result = AverageGdpReport::new().generate(&[]);
        assert_eq!(result.headers, headers());
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_two_countries() {
        let rows = vec![row("A", "10"), row("A", "20"), row("B", "5")];
        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(
            result,
            TabularResult::new(
                headers(),
                vec![
                    vec![text("A"), CellValue::Number(15.0)],
                    vec![text("B"), CellValue::Number(5.0)],
                ]
            )
        );
    }

    #[test]
    fn test_non_numeric_rows_are_dropped() {
        let rows = vec![
            row("A", "10"),
            row("A", "not a number"),
            row("A", "20"),
            row("B", "1,000"),
        ];
        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(result.rows, vec![vec![text("A"), CellValue::Number(15.0)]]);
    }

    #[test]
    fn test_empty_or_absent_fields_are_skipped() {
        let no_gdp: RowRecord = [("country", "C")].into_iter().collect();
        let no_country: RowRecord = [("gdp", "50")].into_iter().collect();
        let rows = vec![row("", "100"), row("D", ""), no_gdp, no_country, row("E", "1")];

        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(result.rows, vec![vec![text("E"), CellValue::Number(1.0)]]);
    }

    #[test]
    fn test_sorted_descending() {
        let rows = vec![row("Low", "1"), row("High", "300"), row("Mid", "20")];
        let result = AverageGdpReport::new().generate(&rows);

        let order: Vec<String> = result.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(order, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = vec![
            row("Zeta", "10"),
            row("Alpha", "5"),
            row("Mu", "15"),
            row("Alpha", "15"),
            row("Beta", "10"),
        ];
        let result = AverageGdpReport::new().generate(&rows);

        let order: Vec<String> = result.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(order, vec!["Mu", "Zeta", "Alpha", "Beta"]);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 0.125 is exact in binary, so this is a true midpoint.
        let rows = vec![row("Pos", "0.125"), row("Neg", "-0.125")];
        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(
            result.rows,
            vec![
                vec![text("Pos"), CellValue::Number(0.13)],
                vec![text("Neg"), CellValue::Number(-0.13)],
            ]
        );
    }

    #[test]
    fn test_repeating_mean_rounds_to_two_places() {
        let rows = vec![row("A", "1"), row("A", "2"), row("A", "2")];
        let result = AverageGdpReport::new().generate(&rows);
        assert_eq!(result.rows[0][1], CellValue::Number(1.67));
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let rows = vec![row("First", "0"), row("Second", "-0.001")];
        let result = AverageGdpReport::new().generate(&rows);

        let order: Vec<String> = result.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(order, vec!["First", "Second"]);
        assert_eq!(result.rows[1][1], CellValue::Number(0.0));
    }

    #[test]
    fn test_whitespace_around_number_is_accepted() {
        let rows = vec![row("A", " 42.5 ")];
        let result = AverageGdpReport::new().generate(&rows);
        assert_eq!(result.rows[0][1], CellValue::Number(42.5));
    }

    #[test]
    fn test_country_name_preserved_verbatim() {
        let rows = vec![row("Кот-д’Ивуар", "70")];
        let result = AverageGdpReport::new().generate(&rows);
        assert_eq!(result.rows[0][0], text("Кот-д’Ивуар"));
    }

    #[test]
    fn test_every_row_has_header_width() {
        let rows = vec![row("A", "1"), row("B", "2"), row("C", "x")];
        let result = AverageGdpReport::new().generate(&rows);
        assert!(result.rows.iter().all(|r| r.len() == result.headers.len()));
    }

    #[test]
    fn test_reaggregating_output_is_stable() {
        let rows = vec![
            row("A", "10"),
            row("A", "21"),
            row("B", "7"),
            row("C", "1"),
            row("C", "2"),
            row("C", "2"),
        ];
        let report = AverageGdpReport::new();
        let first = report.generate(&rows);

        let fed_back: Vec<RowRecord> = first
            .rows
            .iter()
            .map(|r| {
                let gdp = r[1].as_number().unwrap().to_string();
                row(&r[0].to_string(), &gdp)
            })
            .collect();
        let second = report.generate(&fed_back);

        assert_eq!(first, second);
    }

    #[test]
    fn test_fixture_files() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");
        let rows =
            read_csv_files(&[data.join("economic1.csv"), data.join("economic2.csv")]).unwrap();

        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(result.headers, headers());
        assert_eq!(
            result.rows,
            vec![
                vec![text("United States"), CellValue::Number(25379.0)],
                vec![text("China"), CellValue::Number(17830.67)],
                vec![text("Japan"), CellValue::Number(4586.0)],
                vec![text("Germany"), CellValue::Number(4171.0)],
            ]
        );
    }

    #[test]
    fn test_header_only_fixture_gives_empty_report() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");
        let rows = read_csv_files(&[data.join("header_only.csv")]).unwrap();
        assert!(rows.is_empty());

        let result = AverageGdpReport::new().generate(&rows);
        assert_eq!(result.headers, headers());
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_huge_average_is_not_rounded_to_infinity() {
        let rows = vec![row("Big", "1e307"), row("Small", "1")];
        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(
            result.rows,
            vec![
                vec![text("Big"), CellValue::Number(1e307)],
                vec![text("Small"), CellValue::Number(1.0)],
            ]
        );
    }

    #[test]
    fn test_grouped_digits_are_counted() {
        let rows = vec![row("A", "1_000"), row("A", "3_000"), row("B", "2_500.5")];
        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(
            result.rows,
            vec![
                vec![text("B"), CellValue::Number(2500.5)],
                vec![text("A"), CellValue::Number(2000.0)],
            ]
        );
    }

    #[test]
    fn test_special_values_ordering() {
        let rows = vec![
            row("Finite", "100"),
            row("NegInf", "-inf"),
            row("NotANumber", "nan"),
            row("PosInf", "inf"),
        ];
        let result = AverageGdpReport::new().generate(&rows);

        let order: Vec<String> = result.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(order, vec!["NotANumber", "PosInf", "Finite", "NegInf"]);
        assert!(result.rows[0][1].as_number().unwrap().is_nan());
        assert_eq!(result.rows[1][1], CellValue::Number(f64::INFINITY));
        assert_eq!(result.rows[3][1], CellValue::Number(f64::NEG_INFINITY));
    }

    #[test]
    fn test_nan_poisons_its_group_mean() {
        let rows = vec![row("A", "10"), row("A", "NaN"), row("B", "1e300")];
        let result = AverageGdpReport::new().generate(&rows);

        assert_eq!(result.rows[0][0], text("A"));
        assert!(result.rows[0][1].as_number().unwrap().is_nan());
    }

    // ── GroupAverage ──────────────────────────────────────────────────────────

    #[test]
    fn test_group_average_other_fields() {
        let rows: Vec<RowRecord> = vec![
            [("continent", "Asia"), ("inflation", "2.0")].into_iter().collect(),
            [("continent", "Europe"), ("inflation", "6.0")].into_iter().collect(),
            [("continent", "Asia"), ("inflation", "1.0")].into_iter().collect(),
        ];
        let report = GroupAverage::new("continent", "inflation", "Continent", "Inflation");

        let result = report.generate(&rows);

        assert_eq!(result.headers, vec!["Continent", "Inflation"]);
        assert_eq!(
            result.rows,
            vec![
                vec![text("Europe"), CellValue::Number(6.0)],
                vec![text("Asia"), CellValue::Number(1.5)],
            ]
        );
    }

    // ── parse_value ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("gdp", "25462").unwrap(), 25462.0);
        assert_eq!(parse_value("gdp", "-3.5").unwrap(), -3.5);
        assert_eq!(parse_value("gdp", "1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_value_digit_grouping() {
        assert_eq!(parse_value("gdp", "1_000").unwrap(), 1000.0);
        assert_eq!(parse_value("gdp", " 25_462.5 ").unwrap(), 25462.5);
        assert_eq!(parse_value("gdp", "1_0e1_0").unwrap(), 10e10);
    }

    #[test]
    fn test_parse_value_misplaced_underscore() {
        for raw in ["_1000", "1000_", "1__000", "1_.5", "1._5", "1e_5", "_"] {
            assert!(parse_value("gdp", raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_parse_value_special_values() {
        assert!(parse_value("gdp", "nan").unwrap().is_nan());
        assert_eq!(parse_value("gdp", "inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_value("gdp", "-Infinity").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_value_malformed() {
        let err = parse_value("gdp", "25,462").unwrap_err();
        match err {
            ReportError::MalformedValue { field, value } => {
                assert_eq!(field, "gdp");
                assert_eq!(value, "25,462");
            }
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }
}
