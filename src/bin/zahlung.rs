//! # zahlung CLI
//!
//! Checks pain documents and bank data, and turns JSON payment batches
//! into pain.001/pain.008 files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{info, warn};

use zahlung::core::*;
use zahlung::pain;

/// SEPA payment files: validation and generation.
#[derive(Parser, Debug)]
#[command(name = "zahlung", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Check that FILE is a well-formed pain.001/pain.008 document with MsgId and CtrlSum.
    #[arg(long, value_name = "FILE")]
    validate: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an IBAN and print its parts.
    Iban { value: String },
    /// Validate a BIC and print its parts.
    Bic { value: String },
    /// Derive a German IBAN from Bankleitzahl and account number.
    DeIban { blz: String, account: String },
    /// Build a pain file from a JSON batch of payment records.
    Generate {
        /// JSON batch file.
        #[arg(long)]
        input: PathBuf,
        /// Where to write the XML document.
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BatchKind {
    CreditTransfer,
    DirectDebit,
}

/// A batch of payments from an invoicing system.
#[derive(Debug, Deserialize)]
struct BatchFile {
    msg_id: String,
    kind: BatchKind,
    /// Execution date (credit transfer) or collection date (direct debit).
    date: NaiveDate,
    #[serde(default)]
    payment_info_id: Option<String>,
    /// Direct debit only.
    #[serde(default)]
    sequence_type: Option<String>,
    config: SepaConfig,
    records: Vec<PaymentRecord>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match (cli.validate, cli.command) {
        (Some(path), _) => validate_file(path),
        (None, Some(Commands::Iban { value })) => check_iban(&value),
        (None, Some(Commands::Bic { value })) => check_bic(&value),
        (None, Some(Commands::DeIban { blz, account })) => derive_iban(&blz, &account),
        (None, Some(Commands::Generate { input, output })) => generate(input, output),
        (None, None) => {
            eprintln!("nothing to do, try --validate <FILE> or --help");
            Ok(ExitCode::from(2))
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn validate_file(path: PathBuf) -> anyhow::Result<ExitCode> {
    let report = pain::inspect_file(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    println!("{}: {}", path.display(), report.status_line());
    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check_iban(value: &str) -> anyhow::Result<ExitCode> {
    match validate_iban(value) {
        Ok(iban) => {
            println!("valid IBAN: {}", iban.formatted());
            println!("country:    {}", iban.country_code());
            if let (Some(blz), Some(account)) = (iban.bank_code(), iban.account_number()) {
                println!("BLZ:        {blz}");
                println!("account:    {account}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("invalid IBAN: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn check_bic(value: &str) -> anyhow::Result<ExitCode> {
    match validate_bic(value) {
        Ok(bic) => {
            println!("valid BIC: {bic}");
            println!("bank:      {}", bic.bank_code());
            println!("country:   {}", bic.country_code());
            println!("location:  {}", bic.location_code());
            println!("branch:    {}", bic.branch_code());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("invalid BIC: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn derive_iban(blz: &str, account: &str) -> anyhow::Result<ExitCode> {
    match construct_german_iban(blz, account) {
        Ok(iban) => {
            println!("{}", iban.as_str());
            println!("{}", iban.formatted());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("cannot derive IBAN: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn generate(input: PathBuf, output: PathBuf) -> anyhow::Result<ExitCode> {
    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let batch: BatchFile = serde_json::from_str(&raw)
        .with_context(|| format!("cannot parse batch file {}", input.display()))?;

    let mut msg = SepaMessage::new(&batch.msg_id, &batch.config.name)?;
    let pmt_id = batch.payment_info_id.clone().unwrap_or_else(|| batch.msg_id.clone());
    let request = match batch.kind {
        BatchKind::CreditTransfer => batch.config.credit_transfer(pmt_id, batch.date).build(),
        BatchKind::DirectDebit => {
            let Some(seq) = batch.sequence_type.as_deref() else {
                bail!("direct debit batch needs a sequence_type");
            };
            batch.config.direct_debit(pmt_id, batch.date, seq)?.build()
        }
    };
    let block = msg.add_payment_info(request)?;

    let total = batch.records.len();
    let mut skipped = 0usize;
    for record in batch.records {
        let invoice = record.invoice_number.clone();
        if let Err(e) = msg.add_transaction(block, record.into()) {
            warn!(invoice = %invoice, error = %e, "skipping payment record");
            skipped += 1;
        }
    }

    if !msg.validate() {
        println!("no valid payment records in {} ({skipped} skipped)", input.display());
        return Ok(ExitCode::FAILURE);
    }

    msg.to_file(&output)?;
    info!(accepted = total - skipped, skipped, "batch converted");
    println!(
        "wrote {}: {} transaction(s), control sum {}, {skipped} skipped",
        output.display(),
        msg.number_of_transactions(),
        pain::format_amount(msg.control_sum())
    );
    Ok(ExitCode::SUCCESS)
}
