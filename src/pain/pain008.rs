use super::xml_utils::{XmlResult, XmlWriter, format_amount};
use super::{PAIN_008, write_group_header, write_remittance};
use crate::core::*;

/// Render a direct debit message as pain.008.001.08.
pub(crate) fn write_pain008(msg: &SepaMessage) -> XmlResult {
    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(
        "Document",
        &[("xmlns", PAIN_008), ("xmlns:xsi", super::XSI_NS)],
    )?;
    w.start_element("CstmrDrctDbtInitn")?;

    write_group_header(&mut w, msg)?;

    for block in msg.payment_infos() {
        let PaymentScheme::DirectDebit {
            creditor_id,
            sequence_type,
            local_instrument,
        } = &block.scheme
        else {
            return Err(SepaError::state(format!(
                "payment info '{}' is not a direct debit block",
                block.id
            )));
        };

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
        w.start_element("LclInstrm")?;
        w.text_element("Cd", local_instrument.code())?;
        w.end_element("LclInstrm")?;
        w.text_element("SeqTp", sequence_type.code())?;
        w.end_element("PmtTpInf")?;

        w.text_element("ReqdColltnDt", &block.date.to_string())?;

        w.start_element("Cdtr")?;
        w.name_element(&block.party.name)?;
        w.end_element("Cdtr")?;
        w.account_element("CdtrAcct", &block.party)?;
        w.agent_element("CdtrAgt", &block.party)?;
        w.text_element("ChrgBr", "SLEV")?;

        w.start_element("CdtrSchmeId")?;
        w.start_element("Id")?;
        w.start_element("PrvtId")?;
        w.start_element("Othr")?;
        w.text_element("Id", creditor_id.as_str())?;
        w.start_element("SchmeNm")?;
        w.text_element("Prtry", "SEPA")?;
        w.end_element("SchmeNm")?;
        w.end_element("Othr")?;
        w.end_element("PrvtId")?;
        w.end_element("Id")?;
        w.end_element("CdtrSchmeId")?;

        for tx in &block.transactions {
            write_transaction(&mut w, tx)?;
        }

        w.end_element("PmtInf")?;
    }

    w.end_element("CstmrDrctDbtInitn")?;
    w.end_element("Document")?;
    w.into_string()
}

fn write_transaction(w: &mut XmlWriter, tx: &Transaction) -> Result<(), SepaError> {
    let mandate = tx.mandate.as_ref().ok_or_else(|| {
        SepaError::state(format!(
            "direct debit transaction '{}' has no mandate",
            tx.end_to_end_id
        ))
    })?;

    w.start_element("DrctDbtTxInf")?;

    w.start_element("PmtId")?;
    w.text_element("EndToEndId", &tx.end_to_end_id)?;
    w.end_element("PmtId")?;

    w.amount_element("InstdAmt", tx.amount, &tx.currency)?;

    w.start_element("DrctDbtTx")?;
    w.start_element("MndtRltdInf")?;
    w.text_element("MndtId", &mandate.id)?;
    w.text_element("DtOfSgntr", &mandate.signing_date.to_string())?;
    w.end_element("MndtRltdInf")?;
    w.end_element("DrctDbtTx")?;

    w.agent_element("DbtrAgt", &tx.counterparty)?;
    w.start_element("Dbtr")?;
    w.name_element(&tx.counterparty.name)?;
    w.end_element("Dbtr")?;
    w.account_element("DbtrAcct", &tx.counterparty)?;

    write_remittance(w, tx)?;

    w.end_element("DrctDbtTxInf")?;
    Ok(())
}
