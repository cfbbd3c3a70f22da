// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use treemap::{Count, Error, Key, TreeMap};

use crate::command::Command;

const SEPARATOR: &str = "-----------Next Level-----------";

const BANNER: &str = " _______________________________________________________________
| commands (names are case-insensitive)                         |
|________________________|______________________________________|
| increase <id> <count>  | add <count> to <id>                  |
| reduce <id> <count>    | subtract <count>, removing at 0      |
| count <id>             | print the count of <id>              |
| inrange <id1> <id2>    | sum of counts in <id1>..=<id2>       |
| next <id>              | first entry after <id>               |
| previous <id>          | last entry before <id>               |
| levelorder             | print the tree level by level        |
| help                   | print this overview                  |
| quit                   | exit                                 |
|________________________|______________________________________|
";

/// Executes commands against a tree, writing one result line per command.
pub struct Session {
    tree: TreeMap,
    banner: bool,
}

impl Session {
    pub fn new(tree: TreeMap, banner: bool) -> Self {
        Self { tree, banner }
    }

    /// Processes `input` line by line until `quit` or end of input.
    ///
    /// Malformed lines are answered with an `Error!` line and the command overview, and the
    /// session carries on.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        if self.banner {
            output.write_all(BANNER.as_bytes())?;
            output.flush()?;
        }

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command, &mut output)?,
                Err(err) => {
                    tracing::debug!(line, %err, "rejected command");
                    writeln!(output, "Error! {err}")?;
                    output.write_all(BANNER.as_bytes())?;
                    ControlFlow::Continue(())
                }
            };
            output.flush()?;

            if flow.is_break() {
                break;
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<ControlFlow<()>> {
        tracing::trace!(?command, "executing command");

        match command {
            Command::Increase { id, amount } => write_count(out, self.tree.increase(id, amount))?,
            Command::Reduce { id, amount } => write_count(out, self.tree.reduce(id, amount))?,
            Command::Count { id } => writeln!(out, "{}", self.tree.count(id))?,
            Command::InRange { low, high } => write_count(out, self.tree.range_sum(low, high))?,
            Command::Next { id } => write_entry(out, self.tree.next(id))?,
            Command::Previous { id } => write_entry(out, self.tree.previous(id))?,
            Command::LevelOrder => self.write_level_order(out)?,
            Command::Help => out.write_all(BANNER.as_bytes())?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }

    fn write_level_order(&self, out: &mut impl Write) -> io::Result<()> {
        let mut level = None;

        for entry in self.tree.dump() {
            if level.is_some_and(|level| level != entry.level) {
                writeln!(out, "{SEPARATOR}")?;
            }
            level = Some(entry.level);

            write!(out, " key {} color {} parent ", entry.key, entry.color)?;
            match entry.parent {
                Some(parent) => writeln!(out, "{parent}")?,
                None => writeln!(out, "nil")?,
            }
        }

        if level.is_some() {
            writeln!(out, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

fn write_count(out: &mut impl Write, result: Result<Count, Error>) -> io::Result<()> {
    match result {
        Ok(count) => writeln!(out, "{count}"),
        Err(Error::InvalidRange { low, high }) => {
            writeln!(out, "Error! {low} shall not be greater than {high}")
        }
        Err(err) => writeln!(out, "Error! {err}"),
    }
}

fn write_entry(out: &mut impl Write, entry: Option<(Key, Count)>) -> io::Result<()> {
    let (key, count) = entry.unwrap_or((0, 0));
    writeln!(out, "{key} {count}")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(banner: bool) -> Session {
        let (tree, _) = TreeMap::from_sorted(&[(1, 5), (3, 2), (7, 9)]).unwrap();
        Session::new(tree, banner)
    }

    fn run(session: &mut Session, commands: &str) -> String {
        let mut output = Vec::new();
        session
            .run(Cursor::new(commands), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn scripted_session() {
        let output = run(
            &mut session(false),
            "increase 3 4\n\
             COUNT 3\n\
             reduce 1 10\n\
             count 1\n\
             inrange 0 10\n\
             inrange 10 0\n\
             next 3\n\
             previous 1\n\
             next 7\n\
             \n\
             quit\n\
             count 3\n",
        );

        assert_eq!(
            output,
            "6\n\
             6\n\
             0\n\
             0\n\
             15\n\
             Error! 10 shall not be greater than 0\n\
             7 9\n\
             0 0\n\
             0 0\n"
        );
    }

    #[test]
    fn malformed_lines_print_banner() {
        let output = run(&mut session(false), "bogus\nincrease 1 0\ncount 7\n");

        let expected = format!(
            "Error! unknown command `bogus`\n{BANNER}\
             Error! <count> must be greater than 0, but was 0\n{BANNER}\
             9\n"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn banner_on_start_and_help() {
        let output = run(&mut session(true), "help\n");
        assert_eq!(output, format!("{BANNER}{BANNER}"));
    }

    #[test]
    fn level_order() {
        let output = run(&mut session(false), "levelorder\n");

        assert_eq!(
            output,
            " key 3 color black parent nil\n\
             -----------Next Level-----------\n \
             key 1 color red parent 3\n \
             key 7 color red parent 3\n\
             -----------Next Level-----------\n"
        );
    }

    #[test]
    fn level_order_of_empty_tree() {
        let mut session = Session::new(TreeMap::new(), false);
        assert_eq!(run(&mut session, "levelorder\nnext 0\n"), "0 0\n");
    }

    #[test]
    fn overflow_is_reported() {
        let mut session = session(false);
        let output = run(&mut session, &format!("increase 7 {}\ncount 7\n", Count::MAX));
        assert_eq!(output, "Error! count overflow\n9\n");
    }
}
