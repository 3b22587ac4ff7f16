//! Command-line front end: encode declarations, decode keys, run searches.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::search::{
    DecodedTypeRecord, MatchMode, PackageInterner, QualifiedTypeDeclarationPattern, SearchEngine,
    TypeDeclaration, TypeSuffix, decode_index_key, encode_index_key,
};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "type-decl-index")]
#[command(about = "Encode, decode and search type declaration index keys", long_about = None)]
pub struct Cli {
    /// Config file; defaults to the user config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the hex index key of every declaration in a JSON file.
    Encode {
        #[arg(long)]
        json: PathBuf,
    },
    /// Print a hex index key as a JSON record.
    Decode { key: String },
    /// Search the declarations in a JSON file.
    Search {
        /// Simple name fragment; `*` alone matches any name.
        name: String,
        #[arg(long)]
        decls: PathBuf,
        #[arg(short, long)]
        qualification: Option<String>,
        /// Suffix code: C, I, E, A, U (class|interface), D (class|enum), V (interface|@interface).
        #[arg(short, long, value_parser = parse_suffix)]
        suffix: Option<TypeSuffix>,
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(short = 'i', long)]
        ignore_case: bool,
        #[arg(long)]
        camel_case: bool,
        #[arg(long)]
        module: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Exact,
    Prefix,
    Pattern,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Exact => Self::Exact,
            ModeArg::Prefix => Self::Prefix,
            ModeArg::Pattern => Self::Pattern,
        }
    }
}

fn parse_suffix(value: &str) -> std::result::Result<TypeSuffix, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => TypeSuffix::from_code(code).map_err(|e| e.to_string()),
        _ => Err(format!("expected a one-character suffix code, got {:?}", value)),
    }
}

/// One declaration in an input file.
///
/// `kind` is a convenience that sets the kind bits of `modifiers`.
#[derive(Debug, Deserialize)]
pub struct DeclarationInput {
    #[serde(flatten)]
    pub declaration: TypeDeclaration,
    #[serde(default)]
    pub kind: Option<TypeSuffix>,
}

impl DeclarationInput {
    pub fn into_declaration(self) -> TypeDeclaration {
        match self.kind {
            Some(kind) => self.declaration.with_kind(kind),
            None => self.declaration,
        }
    }
}

/// Query options of the `search` command.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub name: String,
    pub qualification: Option<String>,
    pub suffix: Option<TypeSuffix>,
    pub mode: Option<MatchMode>,
    pub ignore_case: bool,
    pub camel_case: bool,
    pub module: Option<String>,
}

impl SearchRequest {
    /// Builds the query pattern, filling unset options from `config`.
    pub fn to_pattern(&self, config: &SearchConfig) -> Result<QualifiedTypeDeclarationPattern> {
        let mut builder = QualifiedTypeDeclarationPattern::builder()
            .type_suffix(self.suffix.unwrap_or(TypeSuffix::Type))
            .mode(self.mode.unwrap_or(config.default_mode))
            .case_sensitive(config.case_sensitive && !self.ignore_case);
        if self.name != "*" {
            builder = builder.simple_name(&self.name);
        }
        if let Some(qualification) = &self.qualification {
            builder = builder.qualification(qualification);
        }
        if self.camel_case {
            builder = builder.camel_case(false);
        }
        if let Some(module) = &self.module {
            builder = builder.module_name(module);
        }
        Ok(builder.build()?)
    }
}

pub fn load_declarations(path: &Path) -> Result<Vec<TypeDeclaration>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read declarations at {}", path.display()))?;
    let inputs: Vec<DeclarationInput> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse declarations at {}", path.display()))?;
    Ok(inputs
        .into_iter()
        .map(DeclarationInput::into_declaration)
        .collect())
}

pub fn execute_encode(declarations: &[TypeDeclaration]) -> String {
    let mut output = String::new();
    for decl in declarations {
        let _ = writeln!(output, "{}", to_hex(&encode_index_key(decl)));
    }
    output
}

pub fn execute_decode(hex_key: &str) -> Result<String> {
    let key = from_hex(hex_key)?;
    let record = decode_index_key(&key).context("Failed to decode index key")?;
    Ok(serde_json::to_string_pretty(&record)?)
}

pub fn execute_search(
    config: SearchConfig,
    declarations: &[TypeDeclaration],
    request: &SearchRequest,
) -> Result<String> {
    let pattern = request.to_pattern(&config)?;
    let keys: Vec<Vec<u8>> = declarations.iter().map(encode_index_key).collect();
    let engine = SearchEngine::new(config, Arc::new(PackageInterner::new()));

    let matches = engine.search(&pattern, &keys)?;
    let mut output = String::new();
    let _ = writeln!(output, "{}", pattern);

    if matches.is_empty() {
        let _ = writeln!(output, "No results found");
        let all = engine.search(&QualifiedTypeDeclarationPattern::blank_pattern(), &keys)?;
        let suggestions = engine.suggest(&pattern, &all, None);
        if !suggestions.is_empty() {
            let _ = writeln!(output, "Did you mean:");
            for suggestion in suggestions {
                let _ = writeln!(output, "  {}", suggestion.qualified_name);
            }
        }
        return Ok(output);
    }

    for record in &matches {
        let _ = writeln!(output, "{}", format_record(record));
    }
    Ok(output)
}

fn format_record(record: &DecodedTypeRecord) -> String {
    let mut line = format!(
        "{} {} [{}]",
        record.type_suffix,
        record.fully_qualified_name(),
        record.modifiers
    );
    if !record.module_name.is_empty() {
        let _ = write!(line, " module {}", record.module_name);
    }
    if record.secondary {
        line.push_str(" (secondary)");
    }
    line
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        bail!("hex key has odd length {}", s.len());
    }
    s.as_bytes()
        .chunks(2)
        .map(|chunk| {
            let digits = std::str::from_utf8(chunk).context("invalid hexadecimal characters")?;
            u8::from_str_radix(digits, 16).context("invalid hexadecimal characters")
        })
        .collect()
}
