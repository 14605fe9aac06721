//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use charfetch_core::config::{DEFAULT_REQUEST_TIMEOUT_SECS, MAX_CHUNK_SIZE};
use charfetch_core::remote::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, SCAN_CHUNK_SIZE};
use charfetch_core::{DEFAULT_CONCURRENCY, OffsetMode, ServiceConfig};

/// Download the files of a remote directory listing in which a character
/// appears earliest.
///
/// Serves `POST /files` with a JSON body
/// `{"remote_file_server_url": "...", "lookup_character": "..."}`.
#[derive(Parser, Debug)]
#[command(name = "charfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Maximum concurrent scans or downloads per request (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Size in bytes of the chunks files are scanned in
    #[arg(long, default_value_t = SCAN_CHUNK_SIZE, value_parser = parse_chunk_size)]
    pub chunk_size: usize,

    /// How match offsets are measured: "chunk" (position inside the chunk) or "absolute" (position in the file)
    #[arg(long, default_value_t = OffsetMode::Chunk)]
    pub offset_mode: OffsetMode,

    /// Directory downloaded files are written to (default: working directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Deadline in seconds for a whole request
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout: u64,

    /// HTTP connect timeout in seconds
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout: u64,

    /// Longest pause in seconds between reads of a remote response
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub read_timeout: u64,
}

impl Args {
    /// Address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pipeline configuration derived from the flags.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            concurrency: usize::from(self.concurrency),
            chunk_size: self.chunk_size,
            offset_mode: self.offset_mode,
            output_dir: self.output_dir.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
            connect_timeout_secs: self.connect_timeout,
            read_timeout_secs: self.read_timeout,
        }
    }
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (1..=MAX_CHUNK_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("must be between 1 and {MAX_CHUNK_SIZE}"))
    }
}
