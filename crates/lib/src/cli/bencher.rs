use core::fmt;
use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::cli::{Opts, Output, OutputEq, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default time limit in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

/// Times a solver over and over.
#[derive(Default)]
pub struct Bencher {
    samples: Vec<Duration>,
}

impl Bencher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bench `solve`, checking every result against `expected`, and print a
    /// [Report].
    ///
    /// In JSON mode a failure is also printed as an error message, since the
    /// runner only reads stdout.
    pub fn iter<T, O, C>(&mut self, opts: &Opts, expected: Option<&C>, solve: T) -> Result<()>
    where
        T: FnMut() -> Result<O>,
        O: fmt::Debug + OutputEq<C>,
        C: fmt::Debug,
    {
        let stdout = std::io::stdout();
        let mut o = Output::new(stdout.lock(), opts.output_kind());

        let result = self.collect(&mut o, opts, expected, solve);

        if let Err(error) = &result {
            if opts.json {
                o.error(error)?;
            }
        }

        result
    }

    fn collect<T, O, C>(
        &mut self,
        o: &mut Output<impl Write>,
        opts: &Opts,
        expected: Option<&C>,
        mut solve: T,
    ) -> Result<()>
    where
        T: FnMut() -> Result<O>,
        O: fmt::Debug + OutputEq<C>,
        C: fmt::Debug,
    {
        let warmup = Duration::from_millis(opts.warmup.unwrap_or(DEFAULT_WARMUP));
        let time_limit = Duration::from_millis(opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT));

        let mut sample = || -> Result<Duration> {
            let start = Instant::now();
            let value = solve()?;
            let elapsed = start.elapsed();

            if let Some(expected) = expected {
                if !value.output_eq(expected) {
                    bail!("{value:?} (value) != {expected:?} (expected)");
                }
            }

            let _ = black_box(value);
            Ok(elapsed)
        };

        if !warmup.is_zero() {
            o.info(format_args!("warming up ({warmup:?})..."))?;
            let start = Instant::now();

            while start.elapsed() < warmup {
                sample()?;
            }
        }

        self.samples.clear();

        match opts.count {
            Some(count) => {
                o.info(format_args!("running benches {count} time(s)..."))?;

                for _ in 0..count.max(1) {
                    self.samples.push(sample()?);
                }
            }
            None => {
                o.info(format_args!("running benches ({time_limit:?})..."))?;
                let start = Instant::now();

                // At least one sample, even with a zero time limit.
                loop {
                    self.samples.push(sample()?);

                    if start.elapsed() >= time_limit {
                        break;
                    }
                }
            }
        }

        self.samples.sort();
        log::debug!("collected {} samples", self.samples.len());

        o.report(&Report::from_sorted(&self.samples))?;
        Ok(())
    }
}
