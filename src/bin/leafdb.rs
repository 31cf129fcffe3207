//! LeafDB REPL Binary
//!
//! Line-oriented shell over a single database file.

use std::io::{self, BufRead, Write};

use clap::Parser;
use leafdb::config::FlushSync;
use leafdb::{Config, Session};
use tracing_subscriber::{fmt, EnvFilter};

const PROMPT: &str = "db > ";

/// LeafDB shell
#[derive(Parser, Debug)]
#[command(name = "leafdb")]
#[command(about = "Minimal persistent key-value store with a SQL-like shell")]
#[command(version)]
struct Args {
    /// Database file (created if missing)
    filename: String,

    /// Maximum number of resident pages
    #[arg(short, long, default_value = "100")]
    max_pages: u32,

    /// sync_data after every page flush
    #[arg(short, long)]
    sync: bool,
}

fn main() {
    // Logs go to stderr so the REPL output on stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,leafdb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("LeafDB v{}", leafdb::VERSION);
    tracing::info!("Database file: {}", args.filename);

    let flush_sync = if args.sync {
        FlushSync::EveryFlush
    } else {
        FlushSync::OsWriteBack
    };

    let config = Config::builder()
        .db_path(&args.filename)
        .max_pages(args.max_pages)
        .flush_sync(flush_sync)
        .build();

    let session = match Session::open(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(session) {
        tracing::error!("Session error: {}", e);
        std::process::exit(1);
    }
}

/// Prompt, read, execute, print until `.exit` or end of input
fn run(mut session: Session) -> leafdb::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = stdin.lock();
    let mut buf = Vec::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            tracing::info!("End of input");
            break;
        }

        // Invalid UTF-8 becomes U+FFFD rather than ending the session
        let line = String::from_utf8_lossy(&buf);
        let command = line.strip_suffix('\n').unwrap_or(&line);
        let command = command.strip_suffix('\r').unwrap_or(command);

        let output = session.execute_line(command)?;
        for text in &output.lines {
            writeln!(stdout, "{}", text)?;
        }
        if output.exit {
            break;
        }
    }

    stdout.flush()?;
    session.close()
}
