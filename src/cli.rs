use clap::Parser;

use crate::wad::{ExtractOptions, OverwriteMode};

#[derive(Parser, Debug)]
#[command(name = "unwad")]
#[command(version)]
#[command(about = "Extract all files from Hotline Miami 1 & 2 WAD archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  unwad hlm2_data_desktop.wad            extract into the current directory\n  \
  unwad -d out hotlinemiami_v1.wad      extract into ./out\n  \
  unwad -l hlm2_data_desktop.wad         list entries and directory index")]
pub struct Cli {
    /// WAD archive to extract
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<String>,

    /// List entries (and the directory index) instead of extracting
    #[arg(short = 'l')]
    pub list: bool,

    /// Never overwrite existing files
    #[arg(short = 'n', conflicts_with = "overwrite")]
    pub never_overwrite: bool,

    /// Overwrite files WITHOUT prompting (default)
    ///
    /// Overwriting is already the default; the flag only restates it and
    /// excludes `-n`.
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Verbose decoding diagnostics
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.is_very_quiet() {
            "error"
        } else {
            "warn"
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            overwrite: if self.never_overwrite {
                OverwriteMode::Never
            } else {
                OverwriteMode::Always
            },
        }
    }
}
