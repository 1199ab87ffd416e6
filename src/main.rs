use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::Level;

use fleetwiki::Tables;
use fleetwiki::emit::{DebugDump, JsonLines, LuaModule, ShipEmitter};

/// Convert a WhoCallTheFleet nedb export into KcWiki ship data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding ships.nedb, entities.nedb, ship_namesuffix.nedb and
    /// ship_classes.nedb
    #[clap(short, long, default_value = "./db")]
    db_dir: PathBuf,

    /// Output format written to stdout
    #[clap(short, long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// Log every converted ship
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Pretty-printed records
    Debug,
    /// One JSON object per line
    Json,
    /// KcWiki Lua data module
    Lua,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    let stdout = BufWriter::new(io::stdout().lock());
    let mut emitter: Box<dyn ShipEmitter> = match args.format {
        Format::Debug => Box::new(DebugDump::new(stdout)),
        Format::Json => Box::new(JsonLines::new(stdout)),
        Format::Lua => Box::new(LuaModule::new(stdout)),
    };

    let tables = Tables::standard();
    match fleetwiki::convert_database(&args.db_dir, &tables, emitter.as_mut()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report}");
            ExitCode::FAILURE
        }
    }
}
