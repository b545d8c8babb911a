//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cdnjs binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::options::RequestOptions;

/// cdnjs catalog command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cdnjs", about = "cdnjs library catalog CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Ask the server for pretty-printed JSON (output=human).
    #[arg(long, global = true, default_value = "false")]
    pub human_output: bool,

    /// Log requests to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Base URL of the cdnjs API.
    #[arg(long, global = true, env = "CDNJS_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every library in the catalog.
    List {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Search the catalog.
    Search {
        /// Free-text search term.
        term: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Get one library's metadata.
    Get {
        /// Library name (e.g., "jquery").
        name: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Get the files published for one version of a library.
    Assets {
        /// Library name.
        name: String,

        /// Library version (e.g., "3.7.1").
        version: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

/// Field selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Attributes to request, comma separated (e.g., "name,latest").
    #[arg(long, value_delimiter = ',', conflicts_with = "preset")]
    pub fields: Vec<String>,

    /// Preset field selection. Defaults to the command's own preset.
    #[arg(long)]
    pub preset: Option<Preset>,
}

/// Request option presets.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Let the server choose.
    Unspecified,
    /// name, version and versions.
    Minimal,
    /// Every known attribute.
    All,
}

impl From<Preset> for RequestOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Unspecified => RequestOptions::unspecified(),
            Preset::Minimal => RequestOptions::minimal(),
            Preset::All => RequestOptions::all(),
        }
    }
}

impl FieldArgs {
    /// Build request options, or `None` to use the operation's default.
    ///
    /// `human_output` forces a value so the flag can be applied.
    ///
    /// # Errors
    ///
    /// Only fails if a frozen preset is modified, which this method avoids.
    pub fn to_options(&self, default: Preset, human_output: bool) -> Result<Option<RequestOptions>> {
        let options = if !self.fields.is_empty() {
            let mut options = RequestOptions::new();
            options.set_fields(self.fields.iter().map(|f| f.trim()).filter(|f| !f.is_empty()))?;
            options
        } else if let Some(preset) = self.preset {
            preset.into()
        } else if human_output {
            RequestOptions::from(default)
        } else {
            return Ok(None);
        };

        if human_output {
            let mut options = options.to_mutable();
            options.set_human_readable(true)?;
            return Ok(Some(options));
        }

        Ok(Some(options))
    }
}
