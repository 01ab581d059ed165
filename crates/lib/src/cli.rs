//! Command line handling shared by all solvers.

mod answers;
mod bencher;
pub(crate) mod error;
mod output;
mod output_eq;
mod stdout_logger;

use core::fmt;
use core::ops::AddAssign;
use core::str::FromStr;
use core::time::Duration;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

pub use self::answers::Answers;
pub use self::bencher::Bencher;
pub use self::error::error_context;
use self::output::{Output, OutputKind};
pub use self::output_eq::OutputEq;

use crate::input::IStr;

static LOGGER: stdout_logger::StdoutLogger = stdout_logger::StdoutLogger;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Solve once and print the answers.
    #[default]
    Default,
    /// Solve repeatedly and print timings.
    Bench,
}

/// Options accepted by every solver.
#[derive(Debug, Default)]
pub struct Opts {
    pub mode: Mode,
    verbose: bool,
    /// Print JSON lines instead of text.
    json: bool,
    /// Warmup period in milliseconds.
    warmup: Option<u64>,
    /// Bench period in milliseconds.
    time_limit: Option<u64>,
    /// Bench this many samples instead of running for a period.
    count: Option<usize>,
    /// Read input from this path instead of the default one.
    input: Option<PathBuf>,
}

impl Opts {
    /// Parse options from the process arguments and set up logging.
    ///
    /// Nothing is logged in JSON mode, where stdout belongs to the runner.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args_os().skip(1))?;

        if !opts.json {
            log::set_max_level(if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            });

            log::set_logger(&LOGGER).map_err(|error| anyhow!("failed to set logger: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse options from the given arguments, stopping at `--`.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let mut opts = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "--bench" => {
                    if opts.mode == Mode::Bench {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "--verbose" => opts.verbose = true,
                "--json" => opts.json = true,
                "--warmup" => opts.warmup = Some(value(&mut args, arg)?),
                "--time-limit" => opts.time_limit = Some(value(&mut args, arg)?),
                "--count" => opts.count = Some(value(&mut args, arg)?),
                "--input" => opts.input = Some(value(&mut args, arg)?),
                "--" => break,
                other => bail!("unsupported argument: {other}"),
            }
        }

        Ok(opts)
    }

    /// Input path override, if any.
    #[inline]
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

/// Parse the value following `flag`.
fn value<T>(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = args
        .next()
        .with_context(|| format!("missing argument to `{flag}`"))?;

    let value = value
        .to_str()
        .with_context(|| format!("non-utf8 argument to `{flag}`"))?;

    value
        .parse()
        .with_context(|| format!("bad argument to `{flag}`"))
}

/// Run `solve` over `input` as the options say.
///
/// `labels` name the answers in the order they're produced. Answers are
/// checked against `expected` unless the input was given with `--input`.
/// Errors get the position they refer to in `path` attached.
pub fn run<T, O, C, E>(
    opts: &Opts,
    path: &'static str,
    input: IStr,
    labels: &[&str],
    expected: Option<C>,
    mut solve: T,
) -> Result<()>
where
    T: FnMut(IStr) -> Result<O, E>,
    O: fmt::Debug + Answers + OutputEq<C>,
    C: fmt::Debug,
    anyhow::Error: From<E>,
{
    let expected = expected.filter(|_| opts.input.is_none());
    let mut solve = move || solve(input).map_err(|error| error_context(path, input, error));

    if opts.mode == Mode::Bench {
        return Bencher::new().iter(opts, expected.as_ref(), solve);
    }

    let value = solve()?;

    if let Some(expected) = &expected {
        if !value.output_eq(expected) {
            bail!("{value:?} (value) != {expected:?} (expected)");
        }
    }

    let stdout = std::io::stdout();
    let mut o = Output::new(stdout.lock(), opts.output_kind());
    let mut labels = labels.iter().copied();

    value.visit(&mut |answer| o.answer(labels.next().unwrap_or("answer"), answer))?;
    Ok(())
}

/// Timings collected by a benchmark.
#[derive(Default, Debug, Deserialize, Serialize)]
pub struct Report {
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl Report {
    /// Summarize samples, which must be sorted.
    fn from_sorted(samples: &[Duration]) -> Self {
        let count = samples.len();

        let avg = match u32::try_from(count) {
            Ok(0) | Err(..) => Duration::ZERO,
            Ok(n) => samples.iter().sum::<Duration>() / n,
        };

        Self {
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
            p50: percentile(samples, 50),
            p95: percentile(samples, 95),
            p99: percentile(samples, 99),
        }
    }
}

fn percentile(samples: &[Duration], p: usize) -> Duration {
    let index = (samples.len() * p / 100).min(samples.len().saturating_sub(1));
    samples.get(index).copied().unwrap_or_default()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count: {}, min: {:?}, max: {:?}, avg: {:?}, 50th: {:?}, 95th: {:?}, 99th: {:?}",
            self.count, self.min, self.max, self.avg, self.p50, self.p95, self.p99
        )
    }
}

/// Used by the runner to total up reports.
impl AddAssign<&Report> for Report {
    fn add_assign(&mut self, other: &Report) {
        self.count += other.count;
        self.min += other.min;
        self.max += other.max;
        self.avg += other.avg;
        self.p50 += other.p50;
        self.p95 += other.p95;
        self.p99 += other.p99;
    }
}

#[cfg(test)]
mod tests;
