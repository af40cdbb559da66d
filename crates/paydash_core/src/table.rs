use std::fmt;

use chrono::{Local, TimeZone};

use crate::{infer_fields, FieldCatalog, FieldFormatter, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: FieldCatalog,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What a renderer hands back for a batch of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// The batch held no records.
    NoData,
    Table(TableView),
}

impl TableOutcome {
    pub fn table(&self) -> Option<&TableView> {
        match self {
            TableOutcome::Table(view) => Some(view),
            TableOutcome::NoData => None,
        }
    }
}

/// Renders schema-less record batches into rows of display strings.
#[derive(Debug, Clone)]
pub struct TableRenderer<Tz: TimeZone = Local> {
    formatter: FieldFormatter<Tz>,
}

impl Default for TableRenderer<Local> {
    fn default() -> Self {
        Self::new(FieldFormatter::default())
    }
}

impl<Tz> TableRenderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn new(formatter: FieldFormatter<Tz>) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &FieldFormatter<Tz> {
        &self.formatter
    }

    pub fn render(&self, records: &[Record]) -> TableOutcome {
        if records.is_empty() {
            return TableOutcome::NoData;
        }
        let columns = infer_fields(records);
        let headers = columns.iter().map(column_header).collect();
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|name| self.formatter.format(name, record.get(name)))
                    .collect()
            })
            .collect();
        TableOutcome::Table(TableView {
            columns,
            headers,
            rows,
        })
    }
}

/// Field name with its first character upper-cased.
pub fn column_header(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uppercases_only_first_character() {
        assert_eq!(column_header("recharge_date"), "Recharge_date");
        assert_eq!(column_header("approvalRefNumber"), "ApprovalRefNumber");
        assert_eq!(column_header("Sr_No"), "Sr_No");
        assert_eq!(column_header(""), "");
    }
}
