use crate::structs::int64;
use crate::structs::table_reference::TableReference;
use crate::structs::table_schema::TableSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    Table,
    View,
    External,
    MaterializedView,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    pub query: String,
}

// https://cloud.google.com/bigquery/docs/reference/rest/v2/tables#Table
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    pub table_reference: TableReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchema>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub num_bytes: Option<i64>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub num_rows: Option<i64>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub table_type: Option<TableType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Table {
    pub fn is_view(&self) -> bool {
        self.table_type == Some(TableType::View)
    }
}
