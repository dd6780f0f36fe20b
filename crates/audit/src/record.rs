//! Relational change records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

/// Tables of the relational store the mirror describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditTable {
    Rooms,
    /// Room snapshot attached to one reservation.
    InvRoom,
    Reservation,
    Invoice,
    /// Invoice line items; the store names this table `InvItemDB`.
    InvoiceItem,
    /// Service catalog.
    MasterItem,
}

impl AuditTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditTable::Rooms => "Rooms",
            AuditTable::InvRoom => "InvRoom",
            AuditTable::Reservation => "Reservation",
            AuditTable::Invoice => "Invoice",
            AuditTable::InvoiceItem => "InvItemDB",
            AuditTable::MasterItem => "MasterItem",
        }
    }
}

impl core::fmt::Display for AuditTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub value: Value,
}

/// `WHERE column = value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeKey {
    pub column: String,
    pub value: Value,
}

impl ChangeKey {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// One row-level change.
///
/// Inserts carry every column; updates carry the `SET` columns plus a key;
/// deletes carry only a key, or none for a whole-table delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub action: ChangeAction,
    pub table: AuditTable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ChangeKey>,
    pub recorded_at: DateTime<Utc>,
}

impl ChangeRecord {
    fn new(action: ChangeAction, table: AuditTable, key: Option<ChangeKey>) -> Self {
        Self {
            action,
            table,
            columns: Vec::new(),
            key,
            recorded_at: Utc::now(),
        }
    }

    pub fn insert(table: AuditTable) -> Self {
        Self::new(ChangeAction::Insert, table, None)
    }

    pub fn update(table: AuditTable, key: ChangeKey) -> Self {
        Self::new(ChangeAction::Update, table, Some(key))
    }

    pub fn delete(table: AuditTable, key: ChangeKey) -> Self {
        Self::new(ChangeAction::Delete, table, Some(key))
    }

    /// Delete every row of `table`.
    pub fn delete_all(table: AuditTable) -> Self {
        Self::new(ChangeAction::Delete, table, None)
    }

    /// Append a column value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn column(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.value)
    }

    /// Parameterized statement text, e.g. `DELETE FROM Invoice WHERE InvoiceId = ?`.
    pub fn statement(&self) -> String {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        let mut sql = match self.action {
            ChangeAction::Insert => format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                names.join(", "),
                vec!["?"; names.len()].join(", ")
            ),
            ChangeAction::Update => {
                let sets: Vec<String> = names.iter().map(|n| format!("{n} = ?")).collect();
                format!("UPDATE {} SET {}", self.table, sets.join(", "))
            }
            ChangeAction::Delete => format!("DELETE FROM {}", self.table),
        };
        if let Some(key) = &self.key {
            sql.push_str(&format!(" WHERE {} = ?", key.column));
        }
        sql
    }

    /// Statement parameters in placeholder order.
    pub fn params(&self) -> Vec<Value> {
        self.columns
            .iter()
            .map(|c| c.value.clone())
            .chain(self.key.iter().map(|k| k.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_renders_all_columns() {
        let record = ChangeRecord::insert(AuditTable::Invoice)
            .with("InvoiceId", "inv-1")
            .with("totalAmount", 300_000u64)
            .with("status", "DRAFT");
        assert_eq!(
            record.statement(),
            "INSERT INTO Invoice (InvoiceId, totalAmount, status) VALUES (?, ?, ?)"
        );
        assert_eq!(record.params(), vec![json!("inv-1"), json!(300_000), json!("DRAFT")]);
        assert_eq!(record.column("status"), Some(&json!("DRAFT")));
    }

    #[test]
    fn update_puts_key_last() {
        let record = ChangeRecord::update(AuditTable::Invoice, ChangeKey::new("InvoiceId", "inv-1"))
            .with("totalAmount", 10u64);
        assert_eq!(
            record.statement(),
            "UPDATE Invoice SET totalAmount = ? WHERE InvoiceId = ?"
        );
        assert_eq!(record.params(), vec![json!(10), json!("inv-1")]);
    }

    #[test]
    fn deletes_with_and_without_key() {
        let keyed = ChangeRecord::delete(AuditTable::InvoiceItem, ChangeKey::new("InvoiceId", "inv-1"));
        assert_eq!(keyed.statement(), "DELETE FROM InvItemDB WHERE InvoiceId = ?");

        let all = ChangeRecord::delete_all(AuditTable::MasterItem);
        assert_eq!(all.statement(), "DELETE FROM MasterItem");
        assert!(all.params().is_empty());
    }

    #[test]
    fn record_serializes_with_screaming_action() {
        let record = ChangeRecord::delete_all(AuditTable::MasterItem);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["action"], json!("DELETE"));
        assert_eq!(value["table"], json!("MasterItem"));
        assert!(value.get("columns").is_none());
    }
}
