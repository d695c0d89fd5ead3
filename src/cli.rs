use clap::Parser;
use std::path::PathBuf;

use crate::server::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "heic-converter")]
#[command(author, version, about = "Convert HEIC/HEIF uploads to PNG or JPG in the browser")]
pub struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8501)]
    pub port: u16,

    /// Largest accepted upload in megabytes
    #[arg(long, default_value_t = 512)]
    pub max_upload_mb: usize,

    /// Number of finished archives kept available for download
    #[arg(long, default_value_t = 16)]
    pub keep_results: usize,

    /// Also write every archive into this directory
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Archive file name prefix (`<label>_<format>.zip`)
    #[arg(long, default_value = "heic_converted")]
    pub archive_label: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            max_upload_bytes: self.max_upload_mb.saturating_mul(1024 * 1024),
            keep_results: self.keep_results,
            save_dir: self.save_dir.clone(),
            archive_label: self.archive_label.clone(),
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "heic_converter_lib=debug,heic_converter=debug,tower_http=debug"
        } else {
            "heic_converter_lib=info,heic_converter=info,tower_http=info"
        }
    }
}
