//! xoid: Command-line tool for inspecting ASN.1 object identifiers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::io::Read;
use std::path::PathBuf;
use xoid_lib::{known, Oid};

#[derive(Parser)]
#[command(
    name = "xoid",
    about = "Parse and inspect ASN.1 object identifiers",
    long_about = "xoid parses dotted-decimal object identifiers (OIDs) such as\n\
                  1.2.840.113549.1.1.11 and reports their canonical form, arcs,\n\
                  and encoded length. Arcs of any size are accepted.\n\n\
                  Where an OID is expected, a well-known name such as\n\
                  `sha256WithRSAEncryption` or `CN` is also accepted.",
    after_help = "EXAMPLES:\n\
                  \n  xoid show 1.2.840.113549.1.1.11\
                  \n  xoid show --json --all 2.5.29.17\
                  \n  xoid child 1.3.6.1.5.5.7.3 1\
                  \n  xoid parent 2.5.4.3\
                  \n  xoid length 1.2.840.113549\
                  \n  xoid eq 1.2.3 1.2.03\
                  \n  xoid check oids.txt\
                  \n  echo 2.5.4.3 | xoid show"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display OID information
    #[command(after_help = "EXAMPLES:\n\
                      \n  xoid show 1.2.840.113549.1.1.11\
                      \n  xoid show --all 1000000000000000000000.1\
                      \n  xoid show --json serverAuth\
                      \n  echo 2.5.4.3 | xoid show")]
    Show {
        /// OID in dotted-decimal form or a well-known name. Reads from stdin if omitted.
        oid: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Show the per-arc breakdown and hash code
        #[arg(long)]
        all: bool,
    },
    /// Append an arc to an OID and print the result
    Child {
        /// Parent OID
        oid: String,
        /// Arc to append (0 to 2147483647)
        #[arg(allow_negative_numbers = true)]
        id: i32,
    },
    /// Print the parent of an OID (exit code 1 if it has none)
    Parent {
        /// OID
        oid: String,
    },
    /// Print the minimal encoded length of an OID in bytes
    Length {
        /// OID
        oid: String,
    },
    /// Compare two OIDs (exit code 0 = equal, 1 = different)
    Eq {
        /// First OID
        a: String,
        /// Second OID
        b: String,
    },
    /// Parse one OID per line (exit code 0 = all valid, 1 = any invalid)
    #[command(after_help = "Each line is a dotted OID or a well-known name, as for the\n\
                      other commands. Blank lines and lines starting with '#' are skipped.\n\
                      \nEXAMPLES:\n\
                      \n  xoid check oids.txt\
                      \n  xoid check --failures-only oids.txt\
                      \n  cat oids.txt | xoid check")]
    Check {
        /// File with one OID or well-known name per line. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Only print failures
        #[arg(long)]
        failures_only: bool,
    },
}

/// Maximum size for OID inputs (10 MiB).
const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat file: {}", path.display()))?;
            if meta.len() > MAX_INPUT_BYTES {
                anyhow::bail!(
                    "File too large ({} bytes, max {} bytes): {}",
                    meta.len(),
                    MAX_INPUT_BYTES,
                    path.display()
                );
            }
            std::fs::read(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .take(MAX_INPUT_BYTES)
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    String::from_utf8(bytes).context("Input is not valid UTF-8")
}

/// Parse a dotted OID, falling back to a well-known name.
fn parse_oid(text: &str) -> Result<Oid> {
    let text = text.trim();
    match text.parse::<Oid>() {
        Ok(oid) => Ok(oid),
        Err(e) => known::by_name(text)
            .ok_or(e)
            .with_context(|| format!("Invalid OID: '{}'", text)),
    }
}

/// A single result from batch processing.
struct BatchResult {
    line: usize,
    pass: bool,
    detail: String,
}

/// Parse every non-blank, non-comment line in parallel, in input order.
fn check_lines(input: &str) -> Vec<BatchResult> {
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
        .collect();
    log::debug!("checking {} OID lines", lines.len());

    lines
        .par_iter()
        .map(|(line, text)| match parse_oid(text) {
            Ok(oid) => BatchResult {
                line: *line,
                pass: true,
                detail: match known::short_name(&oid) {
                    Some(name) => format!("{} OK ({})", oid, name),
                    None => format!("{} OK", oid),
                },
            },
            Err(e) => BatchResult {
                line: *line,
                pass: false,
                detail: format!("FAIL ({:#})", e),
            },
        })
        .collect()
}

/// Print batch results, returning the number of failures.
fn run_batch(input: &str, failures_only: bool) -> usize {
    let results = check_lines(input);

    let mut failures = 0;
    for r in &results {
        if !r.pass {
            failures += 1;
        }
        if failures_only && r.pass {
            continue;
        }
        if r.pass {
            println!("{}: {}", r.line, r.detail);
        } else {
            eprintln!("{}: {}", r.line, r.detail);
        }
    }
    failures
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Show { oid, json, all } => {
            let text = match oid {
                Some(text) => text.clone(),
                None => read_input(None)?,
            };
            let oid = parse_oid(&text)?;

            if *json {
                println!("{}", xoid_lib::to_json(&oid)?);
            } else {
                print!("{}", xoid_lib::display_text(&oid, *all));
            }
        }
        Commands::Child { oid, id } => {
            let parent = parse_oid(oid)?;
            let child = parent
                .child(*id)
                .with_context(|| format!("Cannot append {} to {}", id, parent))?;
            println!("{}", child);
        }
        Commands::Parent { oid } => {
            let oid = parse_oid(oid)?;
            match oid.parent() {
                Some(parent) => println!("{}", parent),
                None => {
                    eprintln!("{} has no parent", oid);
                    std::process::exit(1);
                }
            }
        }
        Commands::Length { oid } => {
            let oid = parse_oid(oid)?;
            println!("{}", oid.aggregate_encoded_length());
        }
        Commands::Eq { a, b } => {
            let a = parse_oid(a)?;
            let b = parse_oid(b)?;
            if a != b {
                eprintln!("{} != {}", a, b);
                std::process::exit(1);
            }
            println!("{} == {}", a, b);
        }
        Commands::Check {
            file,
            failures_only,
        } => {
            let input = read_input(file.as_ref())?;
            let failures = run_batch(&input, *failures_only);
            if failures > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_names_like_other_commands() {
        let results = check_lines("2.5.4.3\nserverAuth\n# comment\n\n1.2.x\nno-such-name\n");
        let summary: Vec<(usize, bool)> = results.iter().map(|r| (r.line, r.pass)).collect();
        assert_eq!(summary, [(1, true), (2, true), (5, false), (6, false)]);
        assert_eq!(results[0].detail, "2.5.4.3 OK (CN)");
        assert_eq!(results[1].detail, "1.3.6.1.5.5.7.3.1 OK (serverAuth)");
        assert!(results[2].detail.starts_with("FAIL (Invalid OID: '1.2.x'"));
    }

    #[test]
    fn parse_oid_matches_check() {
        assert_eq!(parse_oid(" CN ").unwrap(), parse_oid("2.5.4.3").unwrap());
        assert!(parse_oid("").is_err());
    }
}
