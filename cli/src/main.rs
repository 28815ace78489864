use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
pub mod output;
mod session;
#[macro_use]
mod test_macros;
use cli::{Args, StoreLocation};
use config::ConfigFile;
use db::{open_db, open_mem_db};
use session::{RustylineSource, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_tracing();

    let config = ConfigFile::resolve(args.config.as_deref())?;
    let db = match cli::resolve_store(args.db, config.as_ref()) {
        StoreLocation::File(path) => {
            tracing::info!(path = %path.display(), "opening store");
            open_db(&path)?
        }
        StoreLocation::Memory => open_mem_db()?,
    };

    let mut input = RustylineSource::new()?;
    let stdout = std::io::stdout();
    let mut session = Session::new(db, args.format);
    session.run(&mut input, &mut stdout.lock())?;
    Ok(())
}
