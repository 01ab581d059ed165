//! Build every solver and run it, printing answers and a total of the bench
//! reports.
//!
//! Arguments after `--` are passed on to each solver, for example
//! `-- --bench --count 10`.

use std::ffi::OsString;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use lib::cli::Report;
use serde::Deserialize;

/// Package holding the solvers to run.
const PACKAGE: &str = "y2023";

#[derive(Default)]
struct Opts {
    quiet: bool,
    verbose: bool,
    args: Vec<OsString>,
}

impl Opts {
    fn parse() -> Result<Self> {
        let mut opts = Self::default();
        let mut args = std::env::args_os().skip(1);

        for arg in args.by_ref() {
            match arg.to_str() {
                Some("-q" | "--quiet") => opts.quiet = true,
                Some("-V" | "--verbose") => opts.verbose = true,
                Some("--") => break,
                Some(other) => bail!("unsupported argument: {other}"),
                None => bail!("non-utf8 argument"),
            }
        }

        opts.args.extend(args);
        Ok(opts)
    }

    fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}

/// A line of cargo's `--message-format json` output. Only artifacts are of
/// interest.
#[derive(Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
enum CargoMessage {
    CompilerArtifact {
        target: Target,
        executable: Option<PathBuf>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

/// A line printed by a solver in `--json` mode.
#[derive(Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
enum Line {
    Answer { label: String, value: String },
    Message { kind: String, output: String },
    Report(Report),
}

struct Solver {
    name: String,
    path: PathBuf,
}

fn main() -> Result<()> {
    let opts = Opts::parse()?;

    let mut total = Report::default();
    let mut failed = 0usize;

    for solver in build()? {
        if !run(&opts, &solver, &mut total)? {
            failed += 1;
        }
    }

    println!("total: {total}");

    if failed > 0 {
        bail!("{failed} solver(s) failed");
    }

    Ok(())
}

/// Build the solvers in release mode, returning them sorted by name.
fn build() -> Result<Vec<Solver>> {
    let mut child = Command::new("cargo")
        .args(["build", "--release", "-p", PACKAGE, "--message-format", "json"])
        .stdout(Stdio::piped())
        .spawn()
        .context("spawning cargo")?;

    let stdout = child.stdout.take().context("missing stdout")?;
    let messages = serde_json::Deserializer::from_reader(BufReader::new(stdout));
    let mut solvers = Vec::new();

    for message in messages.into_iter::<CargoMessage>() {
        let CargoMessage::CompilerArtifact { target, executable } = message? else {
            continue;
        };

        if target.kind != ["bin"] {
            continue;
        }

        solvers.push(Solver {
            name: target.name,
            path: executable.context("missing executable")?,
        });
    }

    if !child.wait()?.success() {
        bail!("cargo build failed");
    }

    solvers.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(solvers)
}

/// Run one solver, returning whether it succeeded.
fn run(opts: &Opts, solver: &Solver, total: &mut Report) -> Result<bool> {
    let name = &solver.name;

    let mut child = Command::new(&solver.path)
        .args(&opts.args)
        .arg("--json")
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning {name}"))?;

    let stdout = child.stdout.take().context("missing stdout")?;
    let lines = serde_json::Deserializer::from_reader(BufReader::new(stdout));

    for line in lines.into_iter::<Line>() {
        match line? {
            Line::Answer { label, value } => {
                if !opts.quiet {
                    println!("{name}: {label}: {value}");
                }
            }
            Line::Report(report) => {
                if !opts.quiet {
                    println!("{name}: {report}");
                }

                *total += &report;
            }
            Line::Message { kind, output } => {
                if opts.is_verbose() || kind == "error" {
                    println!("{name}: {kind}: {output}");
                }
            }
        }
    }

    let status = child.wait()?;

    if opts.is_verbose() || !status.success() {
        println!("{name}: {status}");
    }

    Ok(status.success())
}
