use crate::domain::models::Branch;

use super::dataset::BranchDataset;

/// Reshapes every record into its API form, preserving dataset order.
pub fn resolve_branches(dataset: &BranchDataset) -> Vec<Branch> {
    dataset.records().iter().map(Branch::from).collect()
}
