use crate::adapters::csv_batch::process_csv;
use crate::config::{Command, RutConfig};
use crate::core::checksum::compute_check_digit;
use crate::core::formatter::format;
use crate::core::normalize::normalize;
use crate::core::tax_rounding::apply_row_level_tax_rounding;
use crate::domain::model::TaxRow;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

/// One line of `validate --json` output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationLine {
    pub input: String,
    pub valid: bool,
    pub raw: Option<String>,
    pub formatted: Option<String>,
    pub error: Option<String>,
}

/// Runs one subcommand, writing its primary output to `out`.
///
/// Returns `Ok(false)` when every step ran but some input was rejected; the
/// binary maps that to exit status 1.
pub fn run_command<W: Write>(command: Command, config: &RutConfig, out: &mut W) -> anyhow::Result<bool> {
    match command {
        Command::Validate { ruts, json } => validate(&ruts, json, config, out),
        Command::Format { ruts } => {
            for input in &ruts {
                writeln!(out, "{}", format(input))?;
            }
            Ok(true)
        }
        Command::CheckDigit { bodies } => check_digits(&bodies, out),
        Command::Batch { input, output } => batch(&input, output.as_deref(), config, out),
        Command::RoundTaxes { input } => round_taxes(&input, config, out),
    }
}

fn validate<W: Write>(ruts: &[String], json: bool, config: &RutConfig, out: &mut W) -> anyhow::Result<bool> {
    let validator = config.validator();
    let mut all_valid = true;

    for input in ruts {
        let parsed = validator.parse(input);
        all_valid &= parsed.is_ok();
        if json {
            let line = ValidationLine {
                input: input.clone(),
                valid: parsed.is_ok(),
                raw: parsed.as_ref().ok().map(|r| r.to_raw()),
                formatted: parsed.as_ref().ok().map(|r| r.to_string()),
                error: parsed.as_ref().err().map(|e| e.to_string()),
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            match parsed {
                Ok(rut) => writeln!(out, "✅ {} -> {}", input, rut)?,
                Err(e) => writeln!(out, "❌ {}: {}", input, e)?,
            }
        }
    }

    Ok(all_valid)
}

fn check_digits<W: Write>(bodies: &[String], out: &mut W) -> anyhow::Result<bool> {
    let mut all_numeric = true;

    for body in bodies {
        let digits = normalize(body);
        match compute_check_digit(&digits) {
            Some(d) => writeln!(out, "{}-{}", digits, d)?,
            None => {
                all_numeric = false;
                writeln!(out, "❌ {}: not a numeric body", body)?;
            }
        }
    }

    Ok(all_numeric)
}

fn batch<W: Write>(input: &str, output: Option<&str>, config: &RutConfig, out: &mut W) -> anyhow::Result<bool> {
    let hooks = config.hooks()?;
    let reader = BufReader::new(File::open(input).with_context(|| format!("Failed to open '{}'", input))?);

    let report = match output {
        Some(path) => {
            let writer =
                BufWriter::new(File::create(path).with_context(|| format!("Failed to create '{}'", path))?);
            process_csv(reader, writer, &hooks)?
        }
        None => process_csv(reader, &mut *out, &hooks)?,
    };

    eprintln!(
        "📊 {} records: {} valid, {} invalid, {} skipped",
        report.total, report.valid, report.invalid, report.skipped
    );
    Ok(report.invalid == 0)
}

fn round_taxes<W: Write>(input: &str, config: &RutConfig, out: &mut W) -> anyhow::Result<bool> {
    let file = File::open(input).with_context(|| format!("Failed to open '{}'", input))?;
    let mut rows: Vec<TaxRow> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("'{}' is not a JSON array of tax rows", input))?;

    if !config.rounding_enabled() {
        tracing::warn!("Tax rounding disabled in configuration; rows left unchanged");
    } else {
        let summary = apply_row_level_tax_rounding(&mut rows);
        if !summary.is_empty() {
            eprintln!("{}\n{}", summary.title(), summary.render());
        }
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    Ok(true)
}
