use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::{Account, SepaError};

pub type XmlResult = Result<String, SepaError>;

fn xml_io(e: std::io::Error) -> SepaError {
    SepaError::Xml(format!("XML write error: {e}"))
}

/// Indenting pull-style writer over an in-memory buffer.
///
/// Text content is escaped by quick-xml: `&`, `<` and `>` become entities.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, SepaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, SepaError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SepaError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SepaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SepaError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SepaError> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write an amount with its `Ccy` attribute, e.g. `<InstdAmt Ccy="EUR">12.50</InstdAmt>`.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<&mut Self, SepaError> {
        self.text_element_with_attrs(name, &format_amount(amount), &[("Ccy", currency)])
    }

    /// `<Nm>`; names are already cut to `Max70Text` when they enter a message.
    pub fn name_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.text_element("Nm", name)
    }

    /// `<{tag}><Id><IBAN>…</IBAN></Id></{tag}>`
    pub fn account_element(&mut self, tag: &str, account: &Account) -> Result<&mut Self, SepaError> {
        self.start_element(tag)?;
        self.start_element("Id")?;
        self.text_element("IBAN", account.iban.as_str())?;
        self.end_element("Id")?;
        self.end_element(tag)
    }

    /// Financial institution element. Without a BIC the SEPA
    /// `Othr/Id = NOTPROVIDED` form is written.
    pub fn agent_element(&mut self, tag: &str, account: &Account) -> Result<&mut Self, SepaError> {
        self.start_element(tag)?;
        self.start_element("FinInstnId")?;
        match &account.bic {
            Some(bic) => {
                self.text_element("BICFI", bic.as_str())?;
            }
            None => {
                self.start_element("Othr")?;
                self.text_element("Id", "NOTPROVIDED")?;
                self.end_element("Othr")?;
            }
        }
        self.end_element("FinInstnId")?;
        self.end_element(tag)
    }
}

/// Format an amount with exactly two fractional digits and no grouping.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_amount_cases() {
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(1500.5)), "1500.50");
        assert_eq!(format_amount(dec!(3000.50)), "3000.50");
        assert_eq!(format_amount(dec!(0.01)), "0.01");
        assert_eq!(format_amount(dec!(999999999.99)), "999999999.99");
        assert_eq!(format_amount(dec!(12.500)), "12.50");
    }

    #[test]
    fn text_is_escaped() {
        let mut w = XmlWriter::new().unwrap();
        w.text_element("Ustrd", "A & B <C>").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("<Ustrd>A &amp; B &lt;C&gt;</Ustrd>"));
    }
}
