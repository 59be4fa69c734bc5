// builtins.rs

use replhist::Position;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::repl::Shell;

pub const BUILTINS: [&str; 3] = ["echo", "exit", "history"];

const HISTORY_USAGE: &str =
    "history: usage: history [N] | -c | -r FILE | -w [FILE] | -s N | -p PREFIX";

/// What the prompt loop does after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The store changed wholesale; the editor's recall list is stale.
    Resync,
    Exit(i32),
}

pub fn run_line<W: Write>(tokens: &[String], shell: &Shell, out: &mut W) -> io::Result<Flow> {
    let Some((command, args)) = tokens.split_first() else {
        return Ok(Flow::Continue);
    };
    match command.as_str() {
        "echo" => {
            writeln!(out, "{}", args.join(" "))?;
            Ok(Flow::Continue)
        }
        "exit" => match args.first() {
            None => Ok(Flow::Exit(0)),
            Some(code) => match code.parse::<i32>() {
                Ok(code) => Ok(Flow::Exit(code)),
                Err(_) => {
                    writeln!(out, "exit: {}: numeric argument required", code)?;
                    Ok(Flow::Exit(2))
                }
            },
        },
        "history" => run_history(args, shell, out),
        other => {
            writeln!(out, "{}: command not found", other)?;
            Ok(Flow::Continue)
        }
    }
}

fn run_history<W: Write>(args: &[String], shell: &Shell, out: &mut W) -> io::Result<Flow> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] => list(shell, None, out),
        ["-c"] => {
            shell.history.borrow_mut().clear();
            Ok(Flow::Resync)
        }
        ["-r", file] => {
            if let Err(e) = shell.history.borrow_mut().load(file) {
                writeln!(out, "history: {}", e)?;
            }
            Ok(Flow::Resync)
        }
        ["-w"] => match &shell.histfile {
            Some(path) => save(shell, path.clone(), out),
            None => {
                writeln!(out, "history: HISTFILE not set")?;
                Ok(Flow::Continue)
            }
        },
        ["-w", file] => save(shell, PathBuf::from(file), out),
        ["-s", n] => match n.parse::<usize>() {
            Ok(n) => {
                shell.history.borrow_mut().set_capacity(n);
                Ok(Flow::Resync)
            }
            Err(_) => {
                writeln!(out, "history: {}: invalid capacity", n)?;
                Ok(Flow::Continue)
            }
        },
        ["-p", prefix] => search(shell, prefix, out),
        [n] => match n.parse::<usize>() {
            Ok(n) => list(shell, Some(n), out),
            Err(_) => {
                writeln!(out, "{}", HISTORY_USAGE)?;
                Ok(Flow::Continue)
            }
        },
        _ => {
            writeln!(out, "{}", HISTORY_USAGE)?;
            Ok(Flow::Continue)
        }
    }
}

fn list<W: Write>(shell: &Shell, last: Option<usize>, out: &mut W) -> io::Result<Flow> {
    let hist = shell.history.borrow();
    let start = last.map_or(0, |n| hist.len().saturating_sub(n));
    for (i, entry) in hist.iter().enumerate().skip(start) {
        writeln!(out, "{:>5}  {}", i + 1, entry)?;
    }
    Ok(Flow::Continue)
}

fn save<W: Write>(shell: &Shell, path: PathBuf, out: &mut W) -> io::Result<Flow> {
    if let Err(e) = shell.history.borrow_mut().save(&path) {
        writeln!(out, "history: cannot write: {}", e)?;
    }
    Ok(Flow::Resync)
}

// The newest entry is this very command, which is the search origin and so
// never matches itself.
fn search<W: Write>(shell: &Shell, prefix: &str, out: &mut W) -> io::Result<Flow> {
    let mut hist = shell.history.borrow_mut();
    if hist.is_empty() {
        return Ok(Flow::Continue);
    }
    hist.reset_pos(Position::Last);
    if hist.common_prefix_search(prefix, prefix.chars().count(), true) {
        if let Ok(entry) = hist.current() {
            writeln!(out, "{:>5}  {}", hist.cursor() + 1, entry)?;
        }
    } else {
        writeln!(out, "history: {}: no match", prefix)?;
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::split_words;
    use replhist::HistoryConfig;

    fn shell() -> Shell {
        Shell::new(&HistoryConfig::default())
    }

    // records the line first, as the prompt loop does
    fn run(shell: &Shell, line: &str) -> (Flow, String) {
        shell.record(line);
        let mut out = Vec::new();
        let flow = run_line(&split_words(line), shell, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn echo_and_unknown_commands() {
        let sh = shell();
        assert_eq!(run(&sh, "echo 'a  b' c"), (Flow::Continue, "a  b c\n".to_string()));
        assert_eq!(run(&sh, "frobnicate").1, "frobnicate: command not found\n");
    }

    #[test]
    fn exit_codes() {
        let sh = shell();
        assert_eq!(run(&sh, "exit").0, Flow::Exit(0));
        assert_eq!(run(&sh, "exit 3").0, Flow::Exit(3));
        let (flow, text) = run(&sh, "exit nope");
        assert_eq!(flow, Flow::Exit(2));
        assert!(text.contains("numeric argument required"));
    }

    #[test]
    fn history_lists_all_or_last_n() {
        let sh = shell();
        run(&sh, "echo one");
        run(&sh, "echo two");
        let (_, all) = run(&sh, "history");
        assert_eq!(all, "    1  echo one\n    2  echo two\n    3  history\n");
        let (_, tail) = run(&sh, "history 2");
        assert_eq!(tail, "    3  history\n    4  history 2\n");
    }

    #[test]
    fn history_clear_and_capacity() {
        let sh = shell();
        for l in ["echo a", "echo b", "echo c"] {
            run(&sh, l);
        }
        assert_eq!(run(&sh, "history -s 2").0, Flow::Resync);
        assert_eq!(sh.history.borrow().len(), 2);
        assert_eq!(sh.history.borrow().capacity(), 2);
        assert_eq!(run(&sh, "history -s x").1, "history: x: invalid capacity\n");
        assert_eq!(run(&sh, "history -c").0, Flow::Resync);
        assert!(sh.history.borrow().is_empty());
    }

    #[test]
    fn history_prefix_search_skips_the_command_itself() {
        let sh = shell();
        run(&sh, "git status");
        run(&sh, "ls");
        run(&sh, "git log");
        let (_, found) = run(&sh, "history -p git");
        assert_eq!(found, "    3  git log\n");
        let (_, missing) = run(&sh, "history -p cargo");
        assert_eq!(missing, "history: cargo: no match\n");
    }

    #[test]
    fn history_write_and_read_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("h.txt");
        let sh = shell();
        run(&sh, "echo saved");
        let line = format!("history -w '{}'", file.display());
        assert_eq!(run(&sh, &line).0, Flow::Resync);
        let written = std::fs::read_to_string(&file).unwrap();
        assert_eq!(written, format!("echo saved\n{}\n", line));

        let other = shell();
        run(&other, &format!("history -r '{}'", file.display()));
        let texts: Vec<String> = other.history.borrow().iter().map(|e| e.to_string()).collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[1..], ["echo saved".to_string(), line]);
    }

    #[test]
    fn history_write_without_histfile() {
        let sh = shell();
        assert_eq!(run(&sh, "history -w").1, "history: HISTFILE not set\n");
    }

    #[test]
    fn bad_history_arguments_print_usage() {
        let sh = shell();
        assert_eq!(run(&sh, "history -z 1 2").1, format!("{}\n", HISTORY_USAGE));
    }
}
