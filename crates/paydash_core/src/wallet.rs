use std::fmt;

use chrono::TimeZone;

use crate::format::stringify;
use crate::{FieldFormatter, Record};

const CLIENT_ID: &str = "client_id";

const ACCOUNT_FIELDS: &[(&str, &str)] = &[
    ("Client ID", "client_id"),
    ("Bank Name", "bank_name"),
    ("Virtual Account", "virtual_accountNo"),
    ("IFSC", "IFSC_code"),
    ("Account Holder", "Accountholder_name"),
    ("Approval Date", "Approval_date"),
    ("Status", "status"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetail {
    pub label: &'static str,
    pub value: String,
}

fn belongs_to(record: &Record, subject: &str) -> bool {
    record
        .get(CLIENT_ID)
        .value()
        .is_some_and(|value| !value.is_null() && stringify(value) == subject)
}

/// Top-ups credited to `subject`, in server order.
pub fn wallet_topups(topups: &[Record], subject: &str) -> Vec<Record> {
    topups
        .iter()
        .filter(|record| belongs_to(record, subject))
        .cloned()
        .collect()
}

/// Labelled bank details for the first account registered to `subject`.
pub fn account_details<Tz>(
    banks: &[Record],
    subject: &str,
    formatter: &FieldFormatter<Tz>,
) -> Vec<AccountDetail>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(bank) = banks.iter().find(|record| belongs_to(record, subject)) else {
        return Vec::new();
    };
    ACCOUNT_FIELDS
        .iter()
        .map(|&(label, field)| AccountDetail {
            label,
            value: formatter.format(field, bank.get(field)),
        })
        .collect()
}
