use serde::{Deserialize, Serialize};

/// Company, client and document fields shared by the preview page and both
/// exporters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotationHeader {
    pub company_name: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub client_name: String,
    pub client_address: String,
    pub quotation_no: String,
    pub date: String,
    pub deposit_info: String,
}

/// One submitted item row before pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub name: String,
    pub quantity: f64,
    pub price: f64,
}

impl ItemRow {
    pub fn new(name: impl Into<String>, quantity: f64, price: f64) -> Self {
        ItemRow {
            name: name.into(),
            quantity,
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Total,
    Received,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub kind: SummaryKind,
    pub amount: f64,
}

/// Priced quotation ready for preview or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedQuotation {
    pub header: QuotationHeader,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub received: f64,
    pub balance: f64,
}

impl ComputedQuotation {
    /// The totals block, in print order. Both exporters read their totals
    /// from here.
    pub fn summary(&self) -> [SummaryLine; 3] {
        [
            SummaryLine {
                kind: SummaryKind::Total,
                amount: self.total_amount,
            },
            SummaryLine {
                kind: SummaryKind::Received,
                amount: self.received,
            },
            SummaryLine {
                kind: SummaryKind::Balance,
                amount: self.balance,
            },
        ]
    }
}
