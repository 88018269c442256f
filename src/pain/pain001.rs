use super::xml_utils::{XmlResult, XmlWriter, format_amount};
use super::{PAIN_001, write_group_header, write_remittance};
use crate::core::*;

/// Render a credit transfer message as pain.001.001.09.
pub(crate) fn write_pain001(msg: &SepaMessage) -> XmlResult {
    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(
        "Document",
        &[("xmlns", PAIN_001), ("xmlns:xsi", super::XSI_NS)],
    )?;
    w.start_element("CstmrCdtTrfInitn")?;

    write_group_header(&mut w, msg)?;

    for block in msg.payment_infos() {
        w.start_element("PmtInf")?;
        w.text_element("PmtInfId", &block.id)?;
        w.text_element("PmtMtd", block.method().code())?;
        if let Some(batch) = block.batch_booking {
            w.text_element("BtchBookg", if batch { "true" } else { "false" })?;
        }
        w.text_element("NbOfTxs", &block.number_of_transactions().to_string())?;
        w.text_element("CtrlSum", &format_amount(block.control_sum()))?;

        w.start_element("PmtTpInf")?;
        w.start_element("SvcLvl")?;
        w.text_element("Cd", "SEPA")?;
        w.end_element("SvcLvl")?;
        w.end_element("PmtTpInf")?;

        // pain.001.001.09 wraps the date in a date/date-time choice.
        w.start_element("ReqdExctnDt")?;
        w.text_element("Dt", &block.date.to_string())?;
        w.end_element("ReqdExctnDt")?;

        w.start_element("Dbtr")?;
        w.name_element(&block.party.name)?;
        w.end_element("Dbtr")?;
        w.account_element("DbtrAcct", &block.party)?;
        w.agent_element("DbtrAgt", &block.party)?;
        w.text_element("ChrgBr", "SLEV")?;

        for tx in &block.transactions {
            write_transaction(&mut w, tx)?;
        }

        w.end_element("PmtInf")?;
    }

    w.end_element("CstmrCdtTrfInitn")?;
    w.end_element("Document")?;
    w.into_string()
}

fn write_transaction(w: &mut XmlWriter, tx: &Transaction) -> Result<(), SepaError> {
    w.start_element("CdtTrfTxInf")?;

    w.start_element("PmtId")?;
    w.text_element("EndToEndId", &tx.end_to_end_id)?;
    w.end_element("PmtId")?;

    w.start_element("Amt")?;
    w.amount_element("InstdAmt", tx.amount, &tx.currency)?;
    w.end_element("Amt")?;

    if tx.counterparty.bic.is_some() {
        w.agent_element("CdtrAgt", &tx.counterparty)?;
    }
    w.start_element("Cdtr")?;
    w.name_element(&tx.counterparty.name)?;
    w.end_element("Cdtr")?;
    w.account_element("CdtrAcct", &tx.counterparty)?;

    write_remittance(w, tx)?;

    w.end_element("CdtTrfTxInf")?;
    Ok(())
}
