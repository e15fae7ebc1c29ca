//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::analysis::synonym::config::RuleFormat;
use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, SynfilterArgs};
use crate::error::Result;

/// Result structure for the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResult {
    pub text: String,
    /// `false` when the rules compiled to an empty dictionary
    pub synonyms_enabled: bool,
    pub tokens: Vec<Token>,
}

/// Dictionary statistics printed by the compile command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompileResult {
    pub rules: String,
    pub format: RuleFormat,
    pub entries: usize,
    pub words: usize,
    pub max_horizontal_context: usize,
    pub fst_bytes: usize,
    /// Size of the packed entry records the FST values point into
    pub record_bytes: usize,
}

/// Results that know how to print themselves for humans.
pub trait HumanOutput {
    /// Write the human-readable rendering.
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for AnalyzeResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if !self.synonyms_enabled {
            writeln!(out, "(empty synonym dictionary, tokens passed through)")?;
        }
        writeln!(
            out,
            "{:>4} {:>4} {:>4} {:>6} {:>6}  {:<8} text",
            "pos", "inc", "len", "start", "end", "type"
        )?;
        for token in &self.tokens {
            writeln!(
                out,
                "{:>4} {:>4} {:>4} {:>6} {:>6}  {:<8} {}",
                token.position,
                token.position_increment,
                token.position_length,
                token.start_offset,
                token.end_offset,
                token.token_type.as_str(),
                token.text
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for CompileResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Synonym Dictionary:")?;
        writeln!(out, "═══════════════════")?;
        writeln!(out, "Rules file: {} ({:?})", self.rules, self.format)?;
        writeln!(out, "Input phrases: {}", self.entries)?;
        writeln!(out, "Output phrases: {}", self.words)?;
        writeln!(out, "Max horizontal context: {}", self.max_horizontal_context)?;
        writeln!(out, "FST size: {}", format_bytes(self.fst_bytes as u64))?;
        writeln!(out, "Entry records: {}", format_bytes(self.record_bytes as u64))?;
        Ok(())
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &SynfilterArgs,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)?;
    out.flush()?;
    Ok(())
}

/// Render a result into `out`.
pub fn write_result<T: Serialize + HumanOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &SynfilterArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

/// Format bytes in human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::analysis::token::TokenType;

    fn args(extra: &[&str]) -> SynfilterArgs {
        let mut argv = vec!["synfilter"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["compile", "-r", "x"]);
        SynfilterArgs::try_parse_from(argv).unwrap()
    }

    fn analyze_result() -> AnalyzeResult {
        AnalyzeResult {
            text: "a b".to_string(),
            synonyms_enabled: true,
            tokens: vec![
                Token::with_offsets("a", 0, 0, 1),
                Token::with_offsets("ab", 0, 0, 3)
                    .with_position_increment(0)
                    .with_position_length(2)
                    .with_token_type(TokenType::Synonym),
            ],
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        write_result(&mut out, "Tokens", &analyze_result(), &args(&[])).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("pos"));
        assert!(lines[2].contains("synonym"));
        assert!(lines[2].ends_with(" ab"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_result(&mut out, "Tokens", &analyze_result(), &args(&["-f", "json"])).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["tokens"][1]["text"], "ab");
        assert_eq!(value["tokens"][1]["token_type"], "synonym");
        assert_eq!(value["tokens"][1]["position_length"], 2);
    }
}
