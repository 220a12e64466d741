//! Display helpers for rupee amounts.

const THOUSAND: f64 = 1_000.0;
const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Group digits the Indian way: the last three together, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

/// Whole rupees with lakh/crore grouping, e.g. `₹ 12,34,567`.
pub fn format_inr(value: f64) -> String {
    let rupees = value.abs().round() as u64;
    let grouped = group_indian(&rupees.to_string());
    if value < 0.0 && rupees > 0 {
        format!("-₹ {grouped}")
    } else {
        format!("₹ {grouped}")
    }
}

/// Chart-axis style: `₹1.2Cr`, `₹3.4L`, otherwise thousands as `₹25K`.
pub fn format_inr_compact(value: f64) -> String {
    if value >= CRORE {
        format!("₹{:.1}Cr", value / CRORE)
    } else if value >= LAKH {
        format!("₹{:.1}L", value / LAKH)
    } else {
        format!("₹{:.0}K", value / THOUSAND)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
