use std::collections::HashMap;
use std::iter;
use std::ops::Range;

use lib::prelude::*;
use thiserror::Error;

lib::entry!(
    solve,
    input = "d03.txt",
    labels = ["sum of part numbers", "sum of gear ratios"],
    expect = (4361, 467835),
);

fn solve(mut input: IStr) -> Result<(u64, u64)> {
    let rows = input.lines::<IStr>().collect::<Result<Vec<_>, _>>()?;
    let located = |error: Error| locate(&rows, error);

    let schematic = tokenize(rows.iter().map(IStr::as_data)).map_err(located)?;

    log::debug!(
        "{} rows, {} numbers, {} symbols",
        rows.len(),
        schematic.numbers.len(),
        schematic.symbols.len()
    );

    let gears = gears(&schematic.symbols, &schematic.numbers).map_err(located)?;

    Ok((
        sum_part_numbers(&schematic.numbers, &schematic.symbols)?,
        sum_gear_ratios(&gears)?,
    ))
}

#[derive(Debug, Error)]
enum Error {
    #[error("number `{digits}` does not fit in 64 bits")]
    Parse {
        row: usize,
        col: usize,
        digits: BString,
    },
    #[error("gear ratio {a} * {b} does not fit in 64 bits")]
    Ratio { row: usize, col: usize, a: u64, b: u64 },
    #[error("{0} does not fit in 64 bits")]
    Sum(&'static str),
}

impl Error {
    /// The row and the columns on it this error refers to, if any.
    fn span(&self) -> Option<(usize, Range<usize>)> {
        match *self {
            Error::Parse {
                row,
                col,
                ref digits,
            } => Some((row, col..col + digits.len())),
            Error::Ratio { row, col, .. } => Some((row, col..col + 1)),
            Error::Sum(..) => None,
        }
    }
}

/// Attach where in the input `error` is, so that it's reported with a line
/// and column.
fn locate(rows: &[IStr], error: Error) -> anyhow::Error {
    let row = error
        .span()
        .and_then(|(row, span)| Some((rows.get(row)?, span)));

    match row {
        Some((row, span)) => row.error(span, error).into(),
        None => error.into(),
    }
}

/// A maximal run of digits on one row, with inclusive column bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberToken {
    row: usize,
    start: usize,
    end: usize,
    value: u64,
}

impl NumberToken {
    /// Test if the given cell is within one row and one column of any digit
    /// of this number.
    #[inline]
    fn touches(&self, row: usize, col: usize) -> bool {
        self.row.abs_diff(row) <= 1 && col + 1 >= self.start && col <= self.end + 1
    }
}

/// Any character which is neither a digit nor `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SymbolToken {
    row: usize,
    col: usize,
    glyph: u8,
}

/// Symbols keyed by `(row, col)`.
type Symbols = HashMap<(usize, usize), SymbolToken>;

#[derive(Debug)]
struct Schematic {
    /// Numbers in row-major order.
    numbers: Vec<NumberToken>,
    symbols: Symbols,
}

/// A `*` touching exactly two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gear {
    symbol: SymbolToken,
    ratio: u64,
}

/// Scan rows left to right, top to bottom, collecting numbers and symbols.
fn tokenize<'a, I>(rows: I) -> Result<Schematic, Error>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut numbers = Vec::new();
    let mut symbols = Symbols::new();

    for (row, line) in rows.into_iter().enumerate() {
        let mut run = None::<(usize, u64)>;

        // NB: the trailing `None` flushes a run which ends the row.
        let cells = line.iter().copied().map(Some).chain(iter::once(None));

        for (col, b) in cells.enumerate() {
            if let Some(d @ b'0'..=b'9') = b {
                let (start, value) = run.get_or_insert((col, 0));

                let Some(v) = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(d - b'0')))
                else {
                    return Err(parse_error(row, *start, line));
                };

                *value = v;
                continue;
            }

            if let Some((start, value)) = run.take() {
                numbers.push(NumberToken {
                    row,
                    start,
                    end: col - 1,
                    value,
                });
            }

            if let Some(glyph) = b.filter(|&b| b != b'.') {
                symbols.insert((row, col), SymbolToken { row, col, glyph });
            }
        }
    }

    Ok(Schematic { numbers, symbols })
}

fn parse_error(row: usize, col: usize, line: &[u8]) -> Error {
    let digits = &line[col..];
    let len = digits
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());

    Error::Parse {
        row,
        col,
        digits: BString::from(&digits[..len]),
    }
}

/// Test if any symbol touches the given number.
fn is_part_number(number: &NumberToken, symbols: &Symbols) -> bool {
    let rows = number.row.saturating_sub(1)..=number.row + 1;

    rows.flat_map(|row| {
        (number.start.saturating_sub(1)..=number.end + 1).map(move |col| (row, col))
    })
    .any(|at| symbols.contains_key(&at))
}

/// Values of all part numbers in scan order.
fn part_numbers(numbers: &[NumberToken], symbols: &Symbols) -> Vec<u64> {
    numbers
        .iter()
        .filter(|n| is_part_number(n, symbols))
        .map(|n| n.value)
        .collect()
}

/// Find every `*` which touches exactly two numbers.
///
/// The order of the returned gears is unspecified.
fn gears(symbols: &Symbols, numbers: &[NumberToken]) -> Result<Vec<Gear>, Error> {
    let mut gears = Vec::new();

    for symbol in symbols.values().filter(|s| s.glyph == b'*') {
        // Numbers are sorted by row, so only the band around the symbol
        // needs to be inspected.
        let lo = numbers.partition_point(|n| n.row + 1 < symbol.row);
        let hi = numbers.partition_point(|n| n.row <= symbol.row + 1);

        let mut it = numbers[lo..hi]
            .iter()
            .filter(|n| n.touches(symbol.row, symbol.col));

        let (Some(a), Some(b), None) = (it.next(), it.next(), it.next()) else {
            continue;
        };

        let ratio = a.value.checked_mul(b.value).ok_or(Error::Ratio {
            row: symbol.row,
            col: symbol.col,
            a: a.value,
            b: b.value,
        })?;

        gears.push(Gear {
            symbol: *symbol,
            ratio,
        });
    }

    Ok(gears)
}

fn sum_part_numbers(numbers: &[NumberToken], symbols: &Symbols) -> Result<u64, Error> {
    checked_sum(part_numbers(numbers, symbols), "sum of part numbers")
}

fn sum_gear_ratios(gears: &[Gear]) -> Result<u64, Error> {
    checked_sum(gears.iter().map(|g| g.ratio), "sum of gear ratios")
}

fn checked_sum<I>(values: I, what: &'static str) -> Result<u64, Error>
where
    I: IntoIterator<Item = u64>,
{
    values
        .into_iter()
        .try_fold(0u64, u64::checked_add)
        .ok_or(Error::Sum(what))
}

#[cfg(test)]
mod tests {
    use lib::env::Size;

    use super::*;

    const EXAMPLE: &str = "\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    fn scan(rows: &[&str]) -> Schematic {
        tokenize(rows.iter().map(|r| r.as_bytes())).unwrap()
    }

    fn sums(rows: &[&str]) -> (u64, u64) {
        let s = scan(rows);
        let gears = gears(&s.symbols, &s.numbers).unwrap();

        (
            sum_part_numbers(&s.numbers, &s.symbols).unwrap(),
            sum_gear_ratios(&gears).unwrap(),
        )
    }

    fn number(row: usize, start: usize, end: usize, value: u64) -> NumberToken {
        NumberToken {
            row,
            start,
            end,
            value,
        }
    }

    #[test]
    fn test_example() {
        let output = solve(IStr::new(EXAMPLE.as_bytes(), Size::ZERO)).unwrap();
        assert_eq!(output, (4361, 467835));
    }

    #[test]
    fn test_idempotent() {
        let input = IStr::new(EXAMPLE.as_bytes(), Size::ZERO);
        assert_eq!(solve(input).unwrap(), solve(input).unwrap());
    }

    #[test]
    fn test_row_order_matters() {
        assert_eq!(sums(&["12...", "..*..", "....."]), (12, 0));
        assert_eq!(sums(&["..*..", ".....", "12..."]), (0, 0));
    }

    #[test]
    fn test_tokenize_numbers() {
        let s = scan(&[
            "467..114..",
            "...*......",
            "..35..633.",
            ".......982",
            ".......9..",
        ]);

        assert_eq!(
            s.numbers,
            [
                number(0, 0, 2, 467),
                number(0, 5, 7, 114),
                number(2, 2, 3, 35),
                number(2, 6, 8, 633),
                number(3, 7, 9, 982),
                number(4, 7, 7, 9),
            ]
        );
    }

    #[test]
    fn test_tokenize_symbols() {
        let s = scan(&[".....#123,", ".........!", "", "...."]);

        let mut symbols = s.symbols.into_values().collect::<Vec<_>>();
        symbols.sort_by_key(|s| (s.row, s.col));

        assert_eq!(
            symbols,
            [
                SymbolToken {
                    row: 0,
                    col: 5,
                    glyph: b'#'
                },
                SymbolToken {
                    row: 0,
                    col: 9,
                    glyph: b','
                },
                SymbolToken {
                    row: 1,
                    col: 9,
                    glyph: b'!'
                },
            ]
        );

        assert_eq!(s.numbers, [number(0, 6, 8, 123)]);
    }

    #[test]
    fn test_carriage_return_is_not_a_symbol() {
        let output = solve(IStr::new(b"..12..\r\n..*...\r\n", Size::ZERO)).unwrap();
        assert_eq!(output, (12, 0));
    }

    #[test]
    fn test_part_numbers() {
        let s = scan(&[
            "467..114..",
            "...*......",
            "..35..633.",
            "......#...",
            "617%......",
            ".....+.58.",
            "..592.....",
            "......755.",
            "...$./....",
            ".664.598..",
        ]);

        assert_eq!(
            part_numbers(&s.numbers, &s.symbols),
            [467, 35, 633, 617, 592, 755, 664, 598]
        );
    }

    #[test]
    fn test_part_numbers_edges() {
        let s = scan(&[".......@...", "........982", ".370.......", "...*......."]);
        assert_eq!(part_numbers(&s.numbers, &s.symbols), [982, 370]);

        let s = scan(&["...........", "........982", ".370.......", "...%......."]);
        assert_eq!(part_numbers(&s.numbers, &s.symbols), [370]);

        let s = scan(&["...........", "......9....", "+.....)...*"]);
        assert_eq!(part_numbers(&s.numbers, &s.symbols), [9]);
    }

    #[test]
    fn test_duplicate_values_are_kept() {
        let s = scan(&["12.12", "..#.."]);
        assert_eq!(part_numbers(&s.numbers, &s.symbols), [12, 12]);
    }

    #[test]
    fn test_is_part_number() {
        let s = scan(&[
            "..........",
            "...*......",
            "..........",
            "......#...",
            "...*......",
        ]);

        assert!(is_part_number(&number(0, 0, 2, 467), &s.symbols));
        assert!(!is_part_number(&number(0, 5, 7, 114), &s.symbols));
        assert!(is_part_number(&number(2, 6, 8, 633), &s.symbols));
        assert!(!is_part_number(&number(7, 0, 2, 1), &s.symbols));
    }

    #[test]
    fn test_no_symbols() {
        assert_eq!(sums(&["...........", "....982....", "..........."]), (0, 0));
    }

    #[test]
    fn test_row_edges() {
        assert_eq!(sums(&["1........2", "..........", "3........4"]), (0, 0));
        assert_eq!(sums(&["1........2", "#........#"]), (3, 0));
        assert_eq!(sums(&["1", "*", "2"]), (3, 2));
    }

    #[test]
    fn test_gear_with_one_number() {
        assert_eq!(sums(&[".12*#", "....."]), (12, 0));
    }

    #[test]
    fn test_gear_with_three_numbers() {
        assert_eq!(sums(&["1.2", ".*.", "..3"]), (6, 0));
    }

    #[test]
    fn test_interval_boundary() {
        assert_eq!(sums(&["..12*"]), (12, 0));
        assert_eq!(sums(&["..12*34"]), (46, 408));
        assert_eq!(sums(&["12...", "..*..", "...34"]), (46, 408));
        assert_eq!(sums(&["12....", "...*..", ".....3"]), (0, 0));
    }

    #[test]
    fn test_long_number_spanning_gear() {
        assert_eq!(sums(&["12345", "..*..", "..7.."]), (12352, 86415));
    }

    #[test]
    fn test_gears() {
        let s = scan(&["123", ".*.", "456"]);

        assert_eq!(
            gears(&s.symbols, &s.numbers).unwrap(),
            [Gear {
                symbol: SymbolToken {
                    row: 1,
                    col: 1,
                    glyph: b'*',
                },
                ratio: 123 * 456,
            }]
        );
    }

    #[test]
    fn test_number_overflow() {
        let error = tokenize([&b"..123456789012345678901234*"[..]]).unwrap_err();

        assert_eq!(
            error.to_string(),
            "number `123456789012345678901234` does not fit in 64 bits"
        );
        assert_eq!(error.span(), Some((0, 2..26)));
    }

    #[test]
    fn test_number_overflow_position() {
        let input = IStr::new(b"..\n..99999999999999999999*\n", Size::ZERO);
        let error = solve(input).unwrap_err();

        assert_eq!(
            error.to_string(),
            "number `99999999999999999999` does not fit in 64 bits"
        );

        let error = lib::cli::error_context("inputs/d03.txt", input, error);
        assert_eq!(error.to_string(), "inputs/d03.txt:2:2-22");
    }

    #[test]
    fn test_largest_numbers() {
        let input = IStr::new(b"4000000000*4000000000\n", Size::ZERO);
        assert_eq!(solve(input).unwrap(), (8000000000, 16000000000000000000));
    }

    #[test]
    fn test_gear_ratio_overflow() {
        let s = scan(&["10000000000*10000000000"]);
        let error = gears(&s.symbols, &s.numbers).unwrap_err();

        assert_eq!(
            error.to_string(),
            "gear ratio 10000000000 * 10000000000 does not fit in 64 bits"
        );

        let input = IStr::new(b"10000000000*10000000000\n", Size::ZERO);
        let error = lib::cli::error_context("inputs/d03.txt", input, solve(input).unwrap_err());
        assert_eq!(error.to_string(), "inputs/d03.txt:1:11-12");
    }

    #[test]
    fn test_sum_overflow() {
        let s = scan(&["18000000000000000000*18000000000000000000"]);

        let error = sum_part_numbers(&s.numbers, &s.symbols).unwrap_err();
        assert_eq!(error.to_string(), "sum of part numbers does not fit in 64 bits");

        let gears = [
            Gear {
                symbol: SymbolToken {
                    row: 0,
                    col: 0,
                    glyph: b'*',
                },
                ratio: u64::MAX,
            };
            2
        ];

        let error = sum_gear_ratios(&gears).unwrap_err();
        assert_eq!(error.to_string(), "sum of gear ratios does not fit in 64 bits");
    }
}
