use crate::models::{ComputedQuotation, ItemRow, LineItem, QuotationHeader};

/// Prices a quotation: each item's amount is `quantity * price`, the total
/// sums those amounts and the balance is `total - received`.
///
/// Rows with an empty name are dropped before pricing. A negative balance
/// (overpayment) is kept as is.
pub fn compute_quotation(
    header: QuotationHeader,
    rows: Vec<ItemRow>,
    received: f64,
) -> ComputedQuotation {
    let items: Vec<LineItem> = rows
        .into_iter()
        .filter(|row| !row.name.is_empty())
        .map(|row| LineItem {
            amount: row.quantity * row.price,
            name: row.name,
            quantity: row.quantity,
            price: row.price,
        })
        .collect();

    let total_amount: f64 = items.iter().map(|item| item.amount).sum();

    ComputedQuotation {
        header,
        items,
        total_amount,
        received,
        balance: total_amount - received,
    }
}
