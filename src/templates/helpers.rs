use minijinja::Value;

use crate::core::{format_amount, format_quantity};

// Filters

pub fn money_filter(value: f64) -> Value {
    Value::from(format_amount(value))
}

pub fn quantity_filter(value: f64) -> Value {
    Value::from(format_quantity(value))
}
