pub mod api;
pub mod telemetry;

pub mod domain {
    pub mod models;
}

pub mod infrastructure {
    pub mod config;
    pub mod state;
}

pub mod services {
    pub mod branches;
    pub mod dataset;
    pub mod errors;
}
