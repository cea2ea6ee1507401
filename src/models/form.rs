use thiserror::Error;

use super::{ItemRow, QuotationHeader};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("missing form field: {0}")]
    MissingField(String),
    #[error("invalid number in field {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
}

/// Parsed body of the `/generate` and `/create_files` forms.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationForm {
    pub header: QuotationHeader,
    pub rows: Vec<ItemRow>,
    pub received: f64,
}

impl QuotationForm {
    /// Builds a form from url-encoded pairs. Item columns arrive as repeated
    /// `item_name[]`, `quantity[]` and `price[]` keys and are zipped by
    /// position.
    pub fn parse(pairs: &[(String, String)]) -> Result<Self, FormError> {
        let header = QuotationHeader {
            company_name: required(pairs, "company_name")?,
            company_address: required(pairs, "company_address")?,
            company_phone: required(pairs, "company_phone")?,
            company_email: required(pairs, "company_email")?,
            quotation_no: required(pairs, "quotation_no")?,
            date: required(pairs, "date")?,
            client_name: required(pairs, "client_name")?,
            client_address: required(pairs, "client_address")?,
            deposit_info: first(pairs, "deposit_info").unwrap_or_default().to_string(),
        };

        let received = match first(pairs, "received") {
            None => 0.0,
            Some(raw) if raw.trim().is_empty() => 0.0,
            Some(raw) => parse_number("received", raw)?,
        };

        let names = all(pairs, "item_name[]");
        let quantities = all(pairs, "quantity[]");
        let prices = all(pairs, "price[]");

        let mut rows = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let quantity = quantities
                .get(i)
                .ok_or_else(|| FormError::MissingField(format!("quantity[{}]", i)))?;
            let price = prices
                .get(i)
                .ok_or_else(|| FormError::MissingField(format!("price[{}]", i)))?;

            rows.push(ItemRow {
                name: name.to_string(),
                quantity: parse_number("quantity[]", quantity)?,
                price: parse_number("price[]", price)?,
            });
        }

        Ok(QuotationForm {
            header,
            rows,
            received,
        })
    }
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn all<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

fn required(pairs: &[(String, String)], key: &str) -> Result<String, FormError> {
    first(pairs, key)
        .map(str::to_string)
        .ok_or_else(|| FormError::MissingField(key.to_string()))
}

fn parse_number(field: &str, raw: &str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_pairs() -> Vec<(String, String)> {
        [
            ("company_name", "Acme Ltd"),
            ("company_address", "1 Main St"),
            ("company_phone", "555-0100"),
            ("company_email", "sales@acme.test"),
            ("quotation_no", "Q-001"),
            ("date", "2024-05-01"),
            ("client_name", "Globex"),
            ("client_address", "9 Side Rd"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn with(mut pairs: Vec<(String, String)>, extra: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        pairs
    }

    #[test]
    fn parses_header_and_item_rows() {
        let pairs = with(
            base_pairs(),
            &[
                ("received", "20"),
                ("deposit_info", "Bank transfer"),
                ("item_name[]", "Widget"),
                ("quantity[]", "2"),
                ("price[]", "10.0"),
                ("item_name[]", ""),
                ("quantity[]", ""),
                ("price[]", ""),
                ("item_name[]", "Gadget"),
                ("quantity[]", "1"),
                ("price[]", "25"),
            ],
        );

        let form = QuotationForm::parse(&pairs).unwrap();
        assert_eq!(form.header.company_name, "Acme Ltd");
        assert_eq!(form.header.deposit_info, "Bank transfer");
        assert_eq!(form.received, 20.0);
        assert_eq!(
            form.rows,
            vec![ItemRow::new("Widget", 2.0, 10.0), ItemRow::new("Gadget", 1.0, 25.0)]
        );
    }

    #[test]
    fn received_and_deposit_info_are_optional() {
        let form = QuotationForm::parse(&with(base_pairs(), &[("received", "")])).unwrap();
        assert_eq!(form.received, 0.0);
        assert_eq!(form.header.deposit_info, "");

        let form = QuotationForm::parse(&base_pairs()).unwrap();
        assert_eq!(form.received, 0.0);
        assert!(form.rows.is_empty());
    }

    #[test]
    fn missing_required_field_is_reported() {
        let pairs: Vec<_> = base_pairs()
            .into_iter()
            .filter(|(k, _)| k != "client_name")
            .collect();
        assert_eq!(
            QuotationForm::parse(&pairs),
            Err(FormError::MissingField("client_name".to_string()))
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let pairs = with(
            base_pairs(),
            &[("item_name[]", "Widget"), ("quantity[]", "two"), ("price[]", "10")],
        );
        assert!(matches!(
            QuotationForm::parse(&pairs),
            Err(FormError::InvalidNumber { .. })
        ));

        let pairs = with(base_pairs(), &[("received", "NaN")]);
        assert!(QuotationForm::parse(&pairs).is_err());
    }

    #[test]
    fn named_row_without_price_is_missing_field() {
        let pairs = with(base_pairs(), &[("item_name[]", "Widget"), ("quantity[]", "1")]);
        assert_eq!(
            QuotationForm::parse(&pairs),
            Err(FormError::MissingField("price[0]".to_string()))
        );
    }
}
