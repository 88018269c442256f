//! Structural checks on existing pain documents.

use std::path::Path;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rust_decimal::Decimal;

use super::{PAIN_001, PAIN_008};
use crate::core::{PaymentMethod, SepaError, ValidationError};

/// Result of inspecting a pain document.
#[derive(Debug, Clone, Default)]
pub struct DocumentReport {
    /// Default namespace of the root `Document` element.
    pub namespace: Option<String>,
    /// Message kind implied by the namespace.
    pub kind: Option<PaymentMethod>,
    pub msg_id: Option<String>,
    pub number_of_transactions: Option<usize>,
    pub control_sum: Option<Decimal>,
    /// Every problem found; empty for a valid document.
    pub problems: Vec<ValidationError>,
}

impl DocumentReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// One-line human-readable summary.
    pub fn status_line(&self) -> String {
        if self.is_valid() {
            let kind = match self.kind {
                Some(PaymentMethod::DirectDebit) => "pain.008 direct debit",
                _ => "pain.001 credit transfer",
            };
            format!(
                "OK: {kind} '{}', {} transaction(s), control sum {}",
                self.msg_id.as_deref().unwrap_or(""),
                self.number_of_transactions.unwrap_or(0),
                self.control_sum.map(super::format_amount).unwrap_or_default()
            )
        } else {
            let problems = self
                .problems
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            format!("INVALID: {problems}")
        }
    }

    fn problem(&mut self, field: &str, message: impl Into<String>) {
        self.problems.push(ValidationError::new(field, message));
    }
}

/// Read and inspect the document at `path`.
pub fn inspect_file(path: impl AsRef<Path>) -> Result<DocumentReport, SepaError> {
    let xml = std::fs::read_to_string(path)?;
    Ok(inspect_document(&xml))
}

/// Check that `xml` is well-formed, uses a pain.001/pain.008 namespace and
/// carries `MsgId` and `CtrlSum` in its group header.
///
/// Transaction count and amounts are cross-checked against `NbOfTxs` and
/// `CtrlSum` when those are present.
pub fn inspect_document(xml: &str) -> DocumentReport {
    let mut report = DocumentReport::default();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut tx_count = 0usize;
    let mut amount_sum = Decimal::ZERO;
    let mut well_formed = true;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if path.is_empty() {
                    if seen_root {
                        report.problem("Document", "more than one root element");
                        well_formed = false;
                        break;
                    }
                    seen_root = true;
                    read_root(e, &mut report);
                }
                let name = local_name(e);
                if name == "CdtTrfTxInf" || name == "DrctDbtTxInf" {
                    tx_count += 1;
                }
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                if path.is_empty() {
                    if seen_root {
                        report.problem("Document", "more than one root element");
                        well_formed = false;
                        break;
                    }
                    seen_root = true;
                    read_root(e, &mut report);
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(ref t)) => {
                let text = match t.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(e) => {
                        report.problem("Document", format!("invalid text content: {e}"));
                        well_formed = false;
                        break;
                    }
                };
                if path.is_empty() {
                    if !text.trim().is_empty() {
                        report.problem("Document", "text content outside the root element");
                        well_formed = false;
                        break;
                    }
                    continue;
                }
                read_text(&path, &text, &mut report, &mut amount_sum);
            }
            Ok(Event::Eof) => {
                if !path.is_empty() {
                    report.problem(
                        "Document",
                        format!("unexpected end of document inside <{}>", path.join("/")),
                    );
                    well_formed = false;
                }
                break;
            }
            Err(e) => {
                report.problem(
                    "Document",
                    format!("not well-formed at byte {}: {e}", reader.error_position()),
                );
                well_formed = false;
                break;
            }
            _ => {}
        }
    }

    if !well_formed {
        return report;
    }

    if !seen_root {
        report.problem("Document", "document has no root element");
        return report;
    }
    if report.kind.is_none() {
        report.problem(
            "Document.xmlns",
            format!(
                "expected namespace {PAIN_001} or {PAIN_008}, found {}",
                report.namespace.as_deref().unwrap_or("none")
            ),
        );
    }
    match report.msg_id.as_deref() {
        None => report.problem("GrpHdr.MsgId", "missing"),
        Some("") => report.problem("GrpHdr.MsgId", "empty"),
        Some(_) => {}
    }
    let control_sum = report.control_sum;
    match control_sum {
        None if !report.problems.iter().any(|p| p.field == "GrpHdr.CtrlSum") => {
            report.problem("GrpHdr.CtrlSum", "missing")
        }
        Some(sum) if sum != amount_sum => report.problem(
            "GrpHdr.CtrlSum",
            format!("control sum {sum} does not match sum of amounts {amount_sum}"),
        ),
        _ => {}
    }
    if let Some(n) = report.number_of_transactions {
        if n != tx_count {
            report.problem(
                "GrpHdr.NbOfTxs",
                format!("NbOfTxs {n} does not match {tx_count} transaction(s)"),
            );
        }
    }

    report
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn read_root(e: &BytesStart<'_>, report: &mut DocumentReport) {
    if local_name(e) != "Document" {
        report.problem(
            "Document",
            format!("root element is <{}>, expected <Document>", local_name(e)),
        );
    }
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"xmlns" {
            if let Ok(value) = attr.unescape_value() {
                report.namespace = Some(value.into_owned());
            }
        }
    }
    report.kind = match report.namespace.as_deref() {
        Some(PAIN_001) => Some(PaymentMethod::CreditTransfer),
        Some(PAIN_008) => Some(PaymentMethod::DirectDebit),
        _ => None,
    };
}

fn read_text(path: &[String], text: &str, report: &mut DocumentReport, amount_sum: &mut Decimal) {
    let Some(leaf) = path.last() else {
        return;
    };
    let in_group_header = path.len() >= 2 && path[path.len() - 2] == "GrpHdr";

    match leaf.as_str() {
        "MsgId" if in_group_header => report.msg_id = Some(text.to_string()),
        "NbOfTxs" if in_group_header => match text.parse::<usize>() {
            Ok(n) => report.number_of_transactions = Some(n),
            Err(_) => report.problem("GrpHdr.NbOfTxs", format!("'{text}' is not a number")),
        },
        "CtrlSum" if in_group_header => match Decimal::from_str(text) {
            Ok(sum) => report.control_sum = Some(sum),
            Err(_) => report.problem("GrpHdr.CtrlSum", format!("'{text}' is not a decimal")),
        },
        "InstdAmt" => match Decimal::from_str(text) {
            Ok(amount) => *amount_sum += amount,
            Err(_) => report.problem("InstdAmt", format!("'{text}' is not a decimal")),
        },
        _ => {}
    }
}
