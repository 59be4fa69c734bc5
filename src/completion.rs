// completion.rs

use itertools::Itertools;
use replhist::HistoryStore;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::builtins::BUILTINS;

const HISTORY_FLAGS: [&str; 5] = ["-c", "-p", "-r", "-s", "-w"];

/// Command-name completion and hints, both fed by the history store.
pub struct ReplHelper {
    history: Rc<RefCell<HistoryStore>>,
}

impl ReplHelper {
    pub fn new(history: Rc<RefCell<HistoryStore>>) -> Self {
        Self { history }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        match line.split_once(' ') {
            None => {
                // builtins first, then commands seen in history
                let hist = self.history.borrow();
                let seen = hist.iter().filter_map(|e| e.as_str().split_whitespace().next());
                let names = BUILTINS
                    .iter()
                    .copied()
                    .chain(seen)
                    .filter(|name| name.starts_with(line))
                    .unique()
                    .sorted()
                    .map(str::to_string)
                    .collect();
                (0, names)
            }
            Some(("history", rest)) if !rest.contains(' ') => (
                line.len() - rest.len(),
                HISTORY_FLAGS
                    .iter()
                    .filter(|f| f.starts_with(rest))
                    .map(|f| f.to_string())
                    .collect(),
            ),
            Some(_) => (line.len(), Vec::new()),
        }
    }

    /// Remainder of the newest entry that extends `line`.
    fn history_hint(&self, line: &str) -> Option<String> {
        if line.is_empty() {
            return None;
        }
        let hist = self.history.borrow();
        let found = hist
            .iter()
            .rev()
            .find(|e| e.as_str().len() > line.len() && e.as_str().starts_with(line))?;
        Some(found.as_str()[line.len()..].to_string())
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;
    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, names) = self.candidates(&line[..pos]);
        let completions = names
            .into_iter()
            .map(|n| Pair {
                display: n.clone(),
                replacement: format!("{} ", n),
            })
            .collect();
        Ok((start, completions))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.history_hint(line)
    }
}

impl Highlighter for ReplHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{}\x1b[m", hint))
    }
}

impl Validator for ReplHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for ReplHelper {}
