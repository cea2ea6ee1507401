use crate::core::{Cell, ColumnAlign, TableData};
use crate::models::{ComputedQuotation, SummaryKind};

pub mod labels {
    pub const TITLE: &str = "報價單";
    pub const CLIENT_NAME: &str = "客戶名稱:";
    pub const QUOTATION_NO: &str = "報價單號碼:";
    pub const CLIENT_ADDRESS: &str = "客戶地址:";
    pub const DATE: &str = "日期:";
    pub const ITEM: &str = "項目";
    pub const QUANTITY: &str = "數量";
    pub const UNIT_PRICE: &str = "單價";
    pub const AMOUNT: &str = "金額";
    pub const TOTAL: &str = "總計:";
    pub const RECEIVED: &str = "已收訂金:";
    pub const BALANCE: &str = "餘額:";
    pub const DEPOSIT_INFO: &str = "訂金資訊:";
    pub const CLOSING: &str = "Thank you for your business!";
}

pub fn summary_label(kind: SummaryKind) -> &'static str {
    match kind {
        SummaryKind::Total => labels::TOTAL,
        SummaryKind::Received => labels::RECEIVED,
        SummaryKind::Balance => labels::BALANCE,
    }
}

/// One line of the client/meta block: a client field on the left and a
/// document field on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaRow {
    pub label: &'static str,
    pub value: String,
    pub side_label: &'static str,
    pub side_value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub amount: f64,
}

/// Format-independent description of a quotation document.
#[derive(Debug, Clone)]
pub struct QuotationLayout {
    pub company_name: String,
    pub company_address: String,
    pub contact_line: String,
    pub title: &'static str,
    pub meta: Vec<MetaRow>,
    pub items: TableData,
    pub summary: Vec<SummaryRow>,
    pub deposit_line: String,
    pub closing: &'static str,
}

impl QuotationLayout {
    pub fn new(quotation: &ComputedQuotation) -> Self {
        let header = &quotation.header;

        let mut items = TableData::new(
            [labels::ITEM, labels::QUANTITY, labels::UNIT_PRICE, labels::AMOUNT]
                .iter()
                .map(|h| h.to_string())
                .collect(),
        )
        .with_column_widths(vec![8.0, 2.0, 3.0, 3.0])
        .with_alignment(vec![
            ColumnAlign::Left,
            ColumnAlign::Right,
            ColumnAlign::Right,
            ColumnAlign::Right,
        ]);
        for item in &quotation.items {
            items.add_row(vec![
                Cell::text(item.name.clone()),
                Cell::Quantity(item.quantity),
                Cell::Amount(item.price),
                Cell::Amount(item.amount),
            ]);
        }

        QuotationLayout {
            company_name: header.company_name.clone(),
            company_address: header.company_address.clone(),
            contact_line: format!(
                "Tel: {} Email: {}",
                header.company_phone, header.company_email
            ),
            title: labels::TITLE,
            meta: vec![
                MetaRow {
                    label: labels::CLIENT_NAME,
                    value: header.client_name.clone(),
                    side_label: labels::QUOTATION_NO,
                    side_value: header.quotation_no.clone(),
                },
                MetaRow {
                    label: labels::CLIENT_ADDRESS,
                    value: header.client_address.clone(),
                    side_label: labels::DATE,
                    side_value: header.date.clone(),
                },
            ],
            items,
            summary: quotation
                .summary()
                .iter()
                .map(|line| SummaryRow {
                    label: summary_label(line.kind),
                    amount: line.amount,
                })
                .collect(),
            deposit_line: format!("{} {}", labels::DEPOSIT_INFO, header.deposit_info),
            closing: labels::CLOSING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute_quotation;
    use crate::models::{ItemRow, QuotationHeader};

    #[test]
    fn layout_carries_items_and_totals() {
        let header = QuotationHeader {
            company_phone: "555".to_string(),
            company_email: "a@b.c".to_string(),
            deposit_info: "paid by cheque".to_string(),
            ..Default::default()
        };
        let computed = compute_quotation(
            header,
            vec![ItemRow::new("Widget", 2.0, 10.0), ItemRow::new("Gadget", 1.0, 25.0)],
            20.0,
        );
        let layout = QuotationLayout::new(&computed);

        assert_eq!(layout.contact_line, "Tel: 555 Email: a@b.c");
        assert_eq!(layout.items.rows.len(), 2);
        assert_eq!(layout.items.rows[0][3], Cell::Amount(20.0));
        assert_eq!(
            layout.summary,
            vec![
                SummaryRow { label: labels::TOTAL, amount: 45.0 },
                SummaryRow { label: labels::RECEIVED, amount: 20.0 },
                SummaryRow { label: labels::BALANCE, amount: 25.0 },
            ]
        );
        assert_eq!(layout.deposit_line, "訂金資訊: paid by cheque");
    }
}
