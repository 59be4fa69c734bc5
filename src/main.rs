mod builtins;
mod completion;
mod parser;
mod repl;

use replhist::logging::init_logging;
use replhist::HistoryConfig;

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = HistoryConfig::from_env();
    tracing::debug!(?config, "history configuration");
    let code = repl::start_repl(config)?;
    std::process::exit(code);
}
