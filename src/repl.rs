// repl.rs

use anyhow::Context;
use replhist::{HistoryConfig, HistoryStore};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::builtins::{run_line, Flow};
use crate::completion::ReplHelper;
use crate::parser::split_words;

/// How a submitted line changed the store.
#[derive(Debug, PartialEq, Eq)]
pub enum Recorded {
    /// Disabled recording or a repeat of the newest entry.
    Skipped,
    /// Plain append; the editor can mirror it with one entry.
    Appended,
    /// Dedup or eviction also removed entries; the editor must resync.
    Reshaped,
}

/// State shared between the prompt loop and the builtins.
pub struct Shell {
    pub history: Rc<RefCell<HistoryStore>>,
    pub histfile: Option<PathBuf>,
}

impl Shell {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            history: Rc::new(RefCell::new(HistoryStore::with_config(config))),
            histfile: config.path.clone(),
        }
    }

    pub fn record(&self, line: &str) -> Recorded {
        let mut hist = self.history.borrow_mut();
        let before = hist.len();
        if !hist.add(line) {
            Recorded::Skipped
        } else if hist.len() == before + 1 {
            Recorded::Appended
        } else {
            Recorded::Reshaped
        }
    }

    pub fn load_histfile(&self) {
        if let Some(path) = &self.histfile {
            if let Err(e) = self.history.borrow_mut().load(path) {
                warn!(error = %e, "could not read history file");
            }
        }
    }

    /// Merges into `HISTFILE`; failures only get logged.
    pub fn save_histfile(&self) {
        if let Some(path) = &self.histfile {
            if let Err(e) = self.history.borrow_mut().save(path) {
                warn!(error = %e, "history not saved");
            }
        }
    }
}

fn sync_editor(rl: &mut Editor<ReplHelper, DefaultHistory>, shell: &Shell) -> rustyline::Result<()> {
    rl.clear_history()?;
    for entry in shell.history.borrow().iter() {
        rl.add_history_entry(entry.as_str())?;
    }
    Ok(())
}

/// Runs the prompt until `exit` or end of input and returns the exit code.
pub fn start_repl(config: HistoryConfig) -> anyhow::Result<i32> {
    let shell = Shell::new(&config);
    shell.load_histfile();
    debug!(entries = shell.history.borrow().len(), "session started");

    let rl_config = Config::builder().completion_type(CompletionType::List).build();
    let mut rl: Editor<ReplHelper, DefaultHistory> =
        Editor::with_config(rl_config).context("creating line editor")?;
    rl.set_helper(Some(ReplHelper::new(Rc::clone(&shell.history))));
    sync_editor(&mut rl, &shell).context("seeding editor history")?;

    let mut stdout = std::io::stdout();
    let code = loop {
        match rl.readline("$ ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match shell.record(trimmed) {
                    Recorded::Appended => {
                        rl.add_history_entry(trimmed)?;
                    }
                    Recorded::Reshaped => sync_editor(&mut rl, &shell)?,
                    Recorded::Skipped => {}
                }
                let tokens = split_words(trimmed);
                match run_line(&tokens, &shell, &mut stdout) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Resync) => sync_editor(&mut rl, &shell)?,
                    Ok(Flow::Exit(code)) => break code,
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    Err(e) => {
                        shell.save_histfile();
                        return Err(e).context("writing output");
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break 0,
            Err(err) => {
                shell.save_histfile();
                return Err(err).context("reading input");
            }
        }
    };
    shell.save_histfile();
    Ok(code)
}
