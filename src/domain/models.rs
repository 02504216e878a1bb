use async_graphql::SimpleObject;
use serde::Serialize;

/// Text substituted for any branch field the source file leaves blank.
pub const UNKNOWN: &str = "Unknown";

/// A row of the branch directory as loaded from disk.
///
/// Every field is populated: blanks are replaced with [`UNKNOWN`] at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRecord {
    pub branch: String,
    pub bank_name: String,
    pub ifsc: String,
}

impl BranchRecord {
    pub fn new(
        branch: impl Into<String>,
        bank_name: impl Into<String>,
        ifsc: impl Into<String>,
    ) -> Self {
        Self {
            branch: branch.into(),
            bank_name: bank_name.into(),
            ifsc: ifsc.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct Bank {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct Branch {
    pub branch: String,
    pub bank: Option<Bank>,
    pub ifsc: String,
}

impl From<&BranchRecord> for Branch {
    fn from(record: &BranchRecord) -> Self {
        let bank_name = if record.bank_name.is_empty() {
            UNKNOWN.to_string()
        } else {
            record.bank_name.clone()
        };

        Self {
            branch: record.branch.clone(),
            bank: Some(Bank { name: bank_name }),
            ifsc: record.ifsc.clone(),
        }
    }
}
