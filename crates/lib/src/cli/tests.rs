use core::time::Duration;
use std::path::Path;

use super::{run, Answers, Mode, Opts, Output, OutputEq, OutputKind, Report};
use crate::env::Size;
use crate::input::{IStr, IStrError};

#[test]
fn test_parse_opts() {
    let opts = Opts::parse_from(["--bench", "--count", "10", "--input", "other.txt"]).unwrap();

    assert!(matches!(opts.mode, Mode::Bench));
    assert_eq!(opts.count, Some(10));
    assert_eq!(opts.input_path(), Some(Path::new("other.txt")));
    assert!(!opts.json);
}

#[test]
fn test_parse_opts_errors() {
    let error = Opts::parse_from(["--bench", "--bench"]).unwrap_err();
    assert_eq!(error.to_string(), "duplicate `--bench` arguments");

    let error = Opts::parse_from(["--frobnicate"]).unwrap_err();
    assert_eq!(error.to_string(), "unsupported argument: --frobnicate");

    let error = Opts::parse_from(["--count", "many"]).unwrap_err();
    assert_eq!(error.to_string(), "bad argument to `--count`");

    let error = Opts::parse_from(["--input"]).unwrap_err();
    assert_eq!(error.to_string(), "missing argument to `--input`");
}

#[test]
fn test_parse_stops_at_separator() {
    let opts = Opts::parse_from(["--json", "--", "--frobnicate"]).unwrap();
    assert!(opts.json);
}

#[test]
fn test_report() {
    let samples = (1..=100).map(Duration::from_millis).collect::<Vec<_>>();
    let report = Report::from_sorted(&samples);

    assert_eq!(report.count, 100);
    assert_eq!(report.min, Duration::from_millis(1));
    assert_eq!(report.max, Duration::from_millis(100));
    assert_eq!(report.p50, Duration::from_millis(51));
    assert_eq!(report.p99, Duration::from_millis(100));
    assert_eq!(report.avg, Duration::from_micros(50500));

    let empty = Report::from_sorted(&[]);
    assert_eq!(empty.count, 0);
    assert_eq!(empty.avg, Duration::ZERO);
}

fn answers<T>(kind: OutputKind, value: T) -> String
where
    T: Answers,
{
    let mut out = Vec::new();
    let mut o = Output::new(&mut out, kind);
    let mut labels = ["first", "second"].into_iter();

    value
        .visit(&mut |answer| o.answer(labels.next().unwrap_or("answer"), answer))
        .unwrap();

    String::from_utf8(out).unwrap()
}

#[test]
fn test_answers() {
    assert_eq!(
        answers(OutputKind::Normal, (4361u64, 467835u64)),
        "first: 4361\nsecond: 467835\n"
    );

    assert_eq!(
        answers(OutputKind::Json, (8u32, None::<u32>)),
        concat!(
            "{\"type\":\"answer\",\"data\":{\"label\":\"first\",\"value\":\"8\"}}\n",
            "{\"type\":\"answer\",\"data\":{\"label\":\"second\",\"value\":\"-\"}}\n",
        )
    );
}

#[test]
fn test_output_eq() {
    assert!((13u32, 30u64).output_eq(&(13, 30)));
    assert!(!(13u32, 30u64).output_eq(&(13, 31)));
    assert!(Some(1u8).output_eq(&Some(1)));
    assert!(!None::<u8>.output_eq(&Some(1)));
}

fn parse_number(mut input: IStr) -> Result<u32, IStrError> {
    input.next::<u32>()
}

#[test]
fn test_run_bench() {
    let opts = Opts::parse_from(["--bench", "--warmup", "0", "--count", "3"]).unwrap();
    let input = IStr::new(b"42\n", Size::ZERO);

    run(&opts, "inputs/test.txt", input, &[], Some(42), parse_number).unwrap();

    let error = run(&opts, "inputs/test.txt", input, &[], Some(41), parse_number).unwrap_err();
    assert_eq!(error.to_string(), "42 (value) != 41 (expected)");
}

#[test]
fn test_run_checks_expected() {
    let input = IStr::new(b"42\n", Size::ZERO);

    let error = run(&Opts::default(), "inputs/test.txt", input, &[], Some(41), parse_number)
        .unwrap_err();
    assert_eq!(error.to_string(), "42 (value) != 41 (expected)");

    // Other inputs have other answers.
    let opts = Opts::parse_from(["--input", "other.txt"]).unwrap();
    run(&opts, "other.txt", input, &[], Some(41), parse_number).unwrap();
}

#[test]
fn test_run_error_position() {
    let input = IStr::new(b"12\nabc\n", Size::ZERO);

    let solve = |mut input: IStr| -> Result<(u32, u32), IStrError> {
        Ok((input.next()?, input.next()?))
    };

    let error = run(
        &Opts::default(),
        "inputs/test.txt",
        input,
        &[],
        None::<(u32, u32)>,
        solve,
    )
    .unwrap_err();

    assert_eq!(error.to_string(), "inputs/test.txt:2:0-3");
    assert_eq!(
        error.root_cause().to_string(),
        "not an integer or integer overflow `abc`"
    );
}

#[test]
fn test_json_lines() {
    let mut out = Vec::new();
    let mut o = Output::new(&mut out, OutputKind::Json);

    o.info("warming up").unwrap();
    o.report(&Report::default()).unwrap();

    let out = String::from_utf8(out).unwrap();
    let mut lines = out.lines();

    assert_eq!(
        lines.next(),
        Some("{\"type\":\"message\",\"data\":{\"kind\":\"info\",\"output\":\"warming up\"}}")
    );
    assert!(lines
        .next()
        .unwrap()
        .starts_with("{\"type\":\"report\",\"data\":{\"count\":0,"));
    assert_eq!(lines.next(), None);
}
