use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::io::{self, BufRead, Write};

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday")),
        },
    }
}

/// One answer in an interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Pick(usize),
    Back,
    Quit,
}

/// Read one numbered answer (1-based on screen, 0-based in the result).
///
/// `b` steps back when `allow_back` is set. `q` or end of input quits.
pub(crate) fn read_choice<R: BufRead>(input: &mut R, count: usize, allow_back: bool) -> Result<Choice> {
    let back_hint = if allow_back { ", b = back" } else { "" };
    eprint!("\nChoose (1-{count}{back_hint}, q = quit): ");
    io::stderr().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Choice::Quit);
    }
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" => Ok(Choice::Quit),
        "b" | "back" if allow_back => Ok(Choice::Back),
        other => {
            let n: usize = other.parse().context("Invalid number")?;
            if n < 1 || n > count {
                bail!("Selection out of range");
            }
            Ok(Choice::Pick(n - 1))
        }
    }
}

pub(crate) fn print_options<'a>(title: &str, labels: impl IntoIterator<Item = &'a str>) {
    println!("\n{title}");
    for (i, label) in labels.into_iter().enumerate() {
        println!("  {}. {label}", i + 1);
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
