use lib::prelude::*;
use thiserror::Error;

lib::entry!(
    solve,
    input = "d01.txt",
    labels = ["calibration sum", "calibration sum with words"],
    expect = (209, 281),
);

const WORDS: [&[u8]; 9] = [
    b"one", b"two", b"three", b"four", b"five", b"six", b"seven", b"eight", b"nine",
];

#[derive(Debug, Error)]
enum Error {
    #[error("no digit or spelled out digit in `{0}`")]
    NoDigits(BString),
}

fn solve(mut input: IStr) -> Result<(u32, u32)> {
    let mut o1 = 0;
    let mut o2 = 0;

    while let Some(line) = input.try_line::<&BStr>()? {
        o1 += calibration(line, digit).unwrap_or_default();
        o2 += calibration(line, digit_or_word)
            .ok_or_else(|| Error::NoDigits(BString::from(line.as_bytes())))?;
    }

    Ok((o1, o2))
}

/// Combine the first and last digit found by `at`, which is tried at every
/// offset of the line so that overlapping words like `eightwo` match twice.
fn calibration(line: &[u8], at: fn(&[u8]) -> Option<u32>) -> Option<u32> {
    let first = (0..line.len()).find_map(|i| at(&line[i..]))?;
    let last = (0..line.len()).rev().find_map(|i| at(&line[i..]))?;
    Some(first * 10 + last)
}

fn digit(s: &[u8]) -> Option<u32> {
    match s {
        [d @ b'0'..=b'9', ..] => Some(u32::from(d - b'0')),
        _ => None,
    }
}

fn digit_or_word(s: &[u8]) -> Option<u32> {
    digit(s).or_else(|| (1..).zip(WORDS).find_map(|(n, w)| s.starts_with(w).then_some(n)))
}
