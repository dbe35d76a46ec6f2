//! CLI command implementations.

use std::io::{self, BufRead};
use std::path::Path;

use serde::Serialize;
use terser::{parse_path, Level, Query, Resolved};

use crate::config::{Config, Format};
use crate::error::{Error, Result};

/// JSON shape for one parsed path.
#[derive(Serialize)]
struct ParsedPath<'a> {
    path: &'a str,
    canonical: String,
    query: &'a Query,
    resolved: Resolved,
}

fn parse_one(input: &str) -> Result<Query> {
    parse_path(input).map_err(|source| Error::Path {
        input: input.to_string(),
        source,
    })
}

/// Parse each path and print it in the requested format.
pub fn parse(paths: &[String], format: Option<Format>, config_path: Option<&Path>) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => Config::load(config_path)?.format,
    };

    let queries = paths
        .iter()
        .map(|p| parse_one(p))
        .collect::<Result<Vec<_>>>()?;

    match format {
        Format::Canonical => {
            for query in &queries {
                println!("{}", query);
            }
        }
        Format::Json => {
            let parsed: Vec<ParsedPath> = paths
                .iter()
                .zip(&queries)
                .map(|(path, query)| ParsedPath {
                    path,
                    canonical: query.to_string(),
                    query,
                    resolved: query.resolved(),
                })
                .collect();
            // A single path prints as an object, several as an array
            if let [one] = parsed.as_slice() {
                println!("{}", serde_json::to_string_pretty(one)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            }
        }
        Format::Table => {
            for (i, (path, query)) in paths.iter().zip(&queries).enumerate() {
                if i > 0 {
                    println!();
                }
                print_table(path, query);
            }
        }
    }

    Ok(())
}

fn print_table(path: &str, query: &Query) {
    println!("{}", path);
    println!("{:<14} {:<8} {:<8} {:<8} {:<8}", "LEVEL", "VALUE", "WRITTEN", "REPEAT", "WRITTEN");
    println!("{}", "-".repeat(50));

    println!(
        "{:<14} {:<8} {:<8} {:<8} {:<8}",
        Level::Segment,
        query.segment,
        yes_no(true),
        query.segment_repeat(),
        yes_no(query.has_segment_repeat())
    );
    for level in Level::NESTED {
        println!(
            "{:<14} {:<8} {:<8} {:<8} {:<8}",
            level,
            query.index(level),
            yes_no(query.has_level(level)),
            query.repeat(level),
            yes_no(query.has_repeat(level))
        );
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Validate paths, reading newline-separated paths from stdin when none are given.
pub fn check(paths: &[String], quiet: bool) -> Result<()> {
    let paths = if paths.is_empty() {
        read_stdin_paths()?
    } else {
        paths.to_vec()
    };

    let mut failed = 0;
    for path in &paths {
        match parse_path(path) {
            Ok(query) => {
                if !quiet {
                    println!("ok     {} ({})", path, query.depth());
                }
            }
            Err(e) => {
                failed += 1;
                println!("error  {}: {}", path, e);
            }
        }
    }

    if failed > 0 {
        return Err(Error::CheckFailed {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

fn read_stdin_paths() -> Result<Vec<String>> {
    let mut paths = Vec::new();
    for line in io::stdin().lock().split(b'\n') {
        let line = line?;
        // Strip line endings only; anything else is part of the path
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        if !line.is_empty() {
            // Invalid UTF-8 becomes U+FFFD, which the parser then rejects
            paths.push(String::from_utf8_lossy(line).into_owned());
        }
    }
    Ok(paths)
}

/// Show the effective configuration.
pub fn config(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    println!("# source: {}", config.source);
    print!("{}", config.to_toml()?);
    Ok(())
}
