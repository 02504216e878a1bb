use std::sync::Arc;

use crate::{
    api::graphql::{build_schema, BranchSchema},
    infrastructure::config::Config,
    services::dataset::BranchDataset,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dataset: Arc<BranchDataset>,
    pub schema: BranchSchema,
}

impl AppState {
    pub fn new(config: Arc<Config>, dataset: Arc<BranchDataset>) -> Self {
        let schema = build_schema(Arc::clone(&dataset));
        Self {
            config,
            dataset,
            schema,
        }
    }
}
