//! Per-kind adapters from the Databricks API to the handler contract.

mod apps;
mod model_endpoints;

pub use apps::AppsHandler;
pub use model_endpoints::ModelEndpointsHandler;
