//! Reminder derivation from extracted agreement fields.
//!
//! This is a pure function of one `StructuredInfo`: identical input always
//! yields an identical, identically ordered output. Reminders always reflect
//! the most recently uploaded document only; the caller replaces the whole
//! set on every successful upload.

use crate::domain::models::Reminder;
use crate::domain::models::ReminderKind;
use crate::domain::models::StructuredInfo;

/// Derives the ordered reminder list for one agreement.
///
/// Evaluation order is fixed: due date, rent amount, lease duration, security
/// deposit. A reminder is emitted only when its source field is present and
/// not the "N/A" sentinel; with none of the four fields set the result is
/// empty.
pub fn derive_reminders(info: &StructuredInfo) -> Vec<Reminder> {
    let mut reminders = vec![];

    if let Some(due) = StructuredInfo::known(&info.due_date) {
        reminders.push(Reminder {
            kind: ReminderKind::Rent,
            title: "Rent Due Date".to_string(),
            description: format!("Rent is due on day {due} of each month."),
            date: due.to_string(),
        });
    }

    if let Some(amount) = StructuredInfo::known(&info.rent_amount) {
        reminders.push(Reminder {
            kind: ReminderKind::Amount,
            title: "Monthly Rent Amount".to_string(),
            description: format!("Monthly rent is {}.", format_currency(amount)),
            date: amount.to_string(),
        });
    }

    if let Some(duration) = StructuredInfo::known(&info.duration) {
        reminders.push(Reminder {
            kind: ReminderKind::Lease,
            title: "Lease Duration".to_string(),
            description: format!("The lease term is {duration}."),
            date: duration.to_string(),
        });
    }

    if let Some(deposit) = StructuredInfo::known(&info.security_deposit_amount) {
        reminders.push(Reminder {
            kind: ReminderKind::Deposit,
            title: "Security Deposit".to_string(),
            description: format!("A deposit of {} is held.", format_currency(deposit)),
            date: deposit.to_string(),
        });
    }

    return reminders;
}

/// Renders a monetary string as US-dollar currency.
///
/// Strips everything except digits, decimal points, and a leading minus sign
/// before parsing; when the remainder does not parse as a number the original
/// string passes through unchanged.
pub fn format_currency(raw: &str) -> String {
    match parse_amount(raw) {
        Some(value) => format_usd(value),
        None => raw.to_string(),
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_ascii_digit() || c == '.' {
            cleaned.push(c);
        } else if c == '-' && cleaned.is_empty() {
            cleaned.push(c);
        }
    }
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    return cleaned.parse::<f64>().ok();
}

fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let remainder = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let whole = grouped.chars().rev().collect::<String>();

    let sign = if negative { "-" } else { "" };
    return format!("{sign}${whole}.{remainder:02}");
}
