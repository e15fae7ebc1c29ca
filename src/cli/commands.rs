//! Command implementations for the synfilter CLI.

use std::io::{self, Read};
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::Token;
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: SynfilterArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args),
        Command::Compile(compile_args) => compile(compile_args.clone(), &args),
    }
}

/// Run text through the synonym filter.
fn analyze(args: AnalyzeArgs, cli_args: &SynfilterArgs) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let result = analyze_text(&args.rules, &text)?;
    output_result("Analyzed tokens", &result, cli_args)
}

/// Tokenize `text` on whitespace and apply the configured synonym filter.
pub fn analyze_text(rules: &RuleArgs, text: &str) -> Result<AnalyzeResult> {
    let config = rules.filter_config()?;
    let filter = config.create_from_file(&rules.rules)?;

    let mut analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));
    let synonyms_enabled = filter.is_some();
    if let Some(filter) = filter {
        analyzer = analyzer.add_filter(Arc::new(filter));
    }
    let tokens: Vec<Token> = analyzer.analyze(text)?.collect();
    log::info!("analyzed {} bytes into {} tokens", text.len(), tokens.len());

    Ok(AnalyzeResult {
        text: text.to_string(),
        synonyms_enabled,
        tokens,
    })
}

/// Compile a rule file and report its statistics.
fn compile(args: CompileArgs, cli_args: &SynfilterArgs) -> Result<()> {
    let result = compile_rules(&args.rules)?;
    output_result("Compiled synonym dictionary", &result, cli_args)
}

/// Compile the rule file named by `rules`.
pub fn compile_rules(rules: &RuleArgs) -> Result<CompileResult> {
    let config = rules.filter_config()?;
    let reader = io::BufReader::new(std::fs::File::open(&rules.rules)?);
    let map = config.build_map_from_reader(reader)?;

    let fst_bytes = map.fst().map_or(0, |fst| fst.as_fst().size());

    Ok(CompileResult {
        rules: rules.rules.display().to_string(),
        format: config.format,
        entries: map.len(),
        words: map.words().len(),
        max_horizontal_context: map.max_horizontal_context(),
        fst_bytes,
        record_bytes: map.records().len(),
    })
}
