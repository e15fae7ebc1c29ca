//! Command line argument parsing for the synfilter CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::synonym::config::{RuleFormat, SynonymFilterConfig, TokenizerKind};
use crate::error::Result;

/// synfilter - Multi-word synonym expansion for token streams
#[derive(Parser, Debug, Clone)]
#[command(name = "synfilter")]
#[command(about = "Expand multi-word synonyms in token streams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SynfilterArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SynfilterArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run text through the synonym filter and print the tokens
    Analyze(AnalyzeArgs),

    /// Compile a rule file and print dictionary statistics
    Compile(CompileArgs),
}

/// Options shared by every command that loads a rule file
#[derive(Parser, Debug, Clone)]
pub struct RuleArgs {
    /// Synonym rule file
    #[arg(short, long, value_name = "RULES_FILE")]
    pub rules: PathBuf,

    /// Filter configuration file (JSON); the flags below override it
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Rule file format
    #[arg(long, value_name = "FORMAT")]
    pub rule_format: Option<RuleFormatArg>,

    /// Tokenizer applied to rule phrases
    #[arg(long)]
    pub tokenizer: Option<TokenizerArg>,

    /// Map equivalent phrases to the first one instead of to each other
    #[arg(long)]
    pub no_expand: bool,

    /// Keep duplicate outputs of the same input
    #[arg(long)]
    pub no_dedup: bool,

    /// Match case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,
}

impl RuleArgs {
    /// Resolve the filter configuration from the config file and flags.
    pub fn filter_config(&self) -> Result<SynonymFilterConfig> {
        let mut config = match &self.config {
            Some(path) => SynonymFilterConfig::from_json_file(path)?,
            None => SynonymFilterConfig::default(),
        };
        if let Some(format) = self.rule_format {
            config.format = format.into();
        }
        if let Some(tokenizer) = self.tokenizer {
            config.tokenizer = tokenizer.into();
        }
        if self.no_expand {
            config.expand = false;
        }
        if self.no_dedup {
            config.dedup = false;
        }
        if self.ignore_case {
            config.ignore_case = true;
        }
        Ok(config)
    }
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub rules: RuleArgs,

    /// Text to analyze; read from standard input when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for compiling a rule file
#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    #[command(flatten)]
    pub rules: RuleArgs,
}

/// Rule file formats accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormatArg {
    /// `a, b => c` and `a, b, c` rules
    Solr,
    /// WordNet prolog facts
    Wordnet,
}

impl From<RuleFormatArg> for RuleFormat {
    fn from(arg: RuleFormatArg) -> Self {
        match arg {
            RuleFormatArg::Solr => RuleFormat::Solr,
            RuleFormatArg::Wordnet => RuleFormat::Wordnet,
        }
    }
}

/// Rule tokenizers accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerArg {
    /// Split on whitespace
    Whitespace,
    /// Whole phrase as one token
    Keyword,
}

impl From<TokenizerArg> for TokenizerKind {
    fn from(arg: TokenizerArg) -> Self {
        match arg {
            TokenizerArg::Whitespace => TokenizerKind::Whitespace,
            TokenizerArg::Keyword => TokenizerKind::Keyword,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
