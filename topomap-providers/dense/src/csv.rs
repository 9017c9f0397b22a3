//! Headerless comma-separated point parsing.
use std::io::BufRead;

use crate::errors::DenseMatrixProviderError;

/// Row-major values read from CSV text together with their dimension.
#[derive(Debug, PartialEq)]
pub(crate) struct CsvRows {
    pub(crate) dimension: usize,
    pub(crate) values: Vec<f64>,
}

/// Reads one point per non-blank line. The first point fixes the dimension
/// and every later row must match it. Row numbers in errors count points,
/// not physical lines.
pub(crate) fn read_rows<R: BufRead>(reader: R) -> Result<CsvRows, DenseMatrixProviderError> {
    let mut dimension = None;
    let mut values = Vec::new();
    let mut row = 0_usize;
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let start = values.len();
        for (column, field) in trimmed.split(',').enumerate() {
            let field = field.trim();
            let value = field
                .parse::<f64>()
                .map_err(|_| DenseMatrixProviderError::InvalidNumber {
                    row,
                    column,
                    value: field.to_owned(),
                })?;
            values.push(value);
        }
        let width = values.len() - start;
        match dimension {
            None => dimension = Some(width),
            Some(expected) if expected != width => {
                return Err(DenseMatrixProviderError::InvalidRowLength {
                    row,
                    expected,
                    actual: width,
                });
            }
            Some(_) => {}
        }
        row += 1;
    }
    let dimension = dimension.ok_or(DenseMatrixProviderError::EmptyInput)?;
    Ok(CsvRows { dimension, values })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn skips_blank_lines_and_trims_fields() {
        let text = "\n 1.0, 2.0 \n\n3,4\r\n   \n-5e-1 ,0\n";
        let rows = read_rows(text.as_bytes()).expect("text is valid");
        assert_eq!(rows.dimension, 2);
        assert_eq!(rows.values, vec![1.0, 2.0, 3.0, 4.0, -0.5, 0.0]);
    }

    #[rstest]
    #[case::nothing("")]
    #[case::only_blank_lines("\n  \n\t\n")]
    fn empty_text_is_rejected(#[case] text: &str) {
        let err = read_rows(text.as_bytes()).expect_err("empty input must fail");
        assert!(matches!(err, DenseMatrixProviderError::EmptyInput));
    }

    #[test]
    fn reports_position_of_unparsable_field() {
        let err = read_rows("1,2\n\n3,abc\n".as_bytes()).expect_err("bad field must fail");
        match err {
            DenseMatrixProviderError::InvalidNumber { row, column, value } => {
                assert_eq!((row, column, value.as_str()), (1, 1, "abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_field_is_unparsable() {
        let err = read_rows("1,,2\n".as_bytes()).expect_err("empty field must fail");
        assert!(matches!(
            err,
            DenseMatrixProviderError::InvalidNumber { row: 0, column: 1, .. }
        ));
    }

    #[rstest]
    #[case::shorter("1,2,3\n4,5\n", 3, 2)]
    #[case::longer("1\n2,3\n", 1, 2)]
    fn first_row_fixes_the_dimension(
        #[case] text: &str,
        #[case] expected: usize,
        #[case] actual: usize,
    ) {
        let err = read_rows(text.as_bytes()).expect_err("ragged rows must fail");
        match err {
            DenseMatrixProviderError::InvalidRowLength {
                row,
                expected: e,
                actual: a,
            } => assert_eq!((row, e, a), (1, expected, actual)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_finite_literals_parse_for_later_validation() {
        let rows = read_rows("inf,1\n".as_bytes()).expect("literals parse");
        assert!(rows.values[0].is_infinite());
    }
}
