// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parsing of the initial entries file.
//!
//! The first non-empty line holds the number of entries that follow, every further non-empty
//! line a `key count` pair separated by whitespace.

use std::fs;
use std::path::Path;

use color_eyre::Help;
use color_eyre::eyre::{WrapErr, bail, eyre};
use treemap::{Count, Key};

pub fn read_entries(path: &Path) -> color_eyre::Result<Vec<(Key, Count)>> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read input file {}", path.display()))?;

    parse_entries(&text)
        .wrap_err_with(|| format!("invalid input file {}", path.display()))
        .note("expected the number of entries on the first line, then one `key count` pair per line")
}

/// Parses `text` into entries that are strictly ascending by key with positive counts.
pub fn parse_entries(text: &str) -> color_eyre::Result<Vec<(Key, Count)>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((line_no, header)) = lines.next() else {
        bail!("input is empty");
    };
    let declared: usize = header
        .parse()
        .map_err(|_| eyre!("line {line_no}: expected the number of entries, found `{header}`"))?;

    let mut entries = Vec::with_capacity(declared);
    for (line_no, line) in lines {
        entries.push(parse_entry(line_no, line)?);
    }

    if entries.len() != declared {
        tracing::warn!(
            declared,
            found = entries.len(),
            "number of entries does not match the declared count"
        );
    }

    normalize(entries)
}

fn parse_entry(line_no: usize, line: &str) -> color_eyre::Result<(Key, Count)> {
    let mut fields = line.split_whitespace();

    let (Some(key), Some(count), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("line {line_no}: expected `key count`, found `{line}`");
    };

    let key: Key = key
        .parse()
        .map_err(|_| eyre!("line {line_no}: key `{key}` is not an integer"))?;
    let count: Count = count
        .parse()
        .map_err(|_| eyre!("line {line_no}: count `{count}` is not an integer"))?;
    if count <= 0 {
        bail!("line {line_no}: count must be greater than 0, but was {count}");
    }

    Ok((key, count))
}

/// Sorts the entries by key and merges duplicate keys by adding up their counts.
fn normalize(mut entries: Vec<(Key, Count)>) -> color_eyre::Result<Vec<(Key, Count)>> {
    if entries.is_sorted_by(|a, b| a.0 < b.0) {
        return Ok(entries);
    }

    tracing::warn!("entries are not strictly ascending by key, sorting and merging duplicates");
    entries.sort_by_key(|&(key, _)| key);

    let mut merged: Vec<(Key, Count)> = Vec::with_capacity(entries.len());
    for (key, count) in entries {
        match merged.last_mut() {
            Some(last) if last.0 == key => {
                tracing::debug!(key, "merging duplicate key");
                last.1 = last
                    .1
                    .checked_add(count)
                    .ok_or_else(|| eyre!("count of key {key} overflows"))?;
            }
            _ => merged.push((key, count)),
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sorted_entries() {
        let entries = parse_entries("3\n1 5\n3 2\n7 9\n").unwrap();
        assert_eq!(entries, [(1, 5), (3, 2), (7, 9)]);
    }

    #[test]
    fn skips_blank_lines_and_extra_whitespace() {
        let entries = parse_entries("\n  2 \n\n-4\t10\n  8   1  \n\n").unwrap();
        assert_eq!(entries, [(-4, 10), (8, 1)]);
    }

    #[test]
    fn declared_count_mismatch_is_not_fatal() {
        let entries = parse_entries("5\n1 1\n2 2\n").unwrap();
        assert_eq!(entries, [(1, 1), (2, 2)]);
    }

    #[test]
    fn sorts_and_merges() {
        let entries = parse_entries("4\n9 1\n2 3\n9 4\n5 1\n").unwrap();
        assert_eq!(entries, [(2, 3), (5, 1), (9, 5)]);
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_entries("2\n1 1\n\nx 2\n").unwrap_err();
        assert_eq!(err.to_string(), "line 4: key `x` is not an integer");

        let err = parse_entries("2\n1 1\n2 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 3: count must be greater than 0, but was 0"
        );

        let err = parse_entries("1\n1 1 1\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected `key count`, found `1 1 1`");
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(parse_entries("\n\n").unwrap_err().to_string(), "input is empty");
        assert_eq!(
            parse_entries("1 5\n").unwrap_err().to_string(),
            "line 1: expected the number of entries, found `1 5`"
        );
    }

    #[test]
    fn merge_overflow() {
        let text = format!("2\n1 {}\n1 1\n", Count::MAX);
        assert_eq!(
            parse_entries(&text).unwrap_err().to_string(),
            "count of key 1 overflows"
        );
    }
}
