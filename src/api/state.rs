use std::sync::Arc;

use crate::config::Config;
use crate::gateway::{AttemptExecutor, Gateway, InstanceRegistry};
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: Arc<Gateway>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: Config,
        registry: InstanceRegistry,
        executor: Arc<dyn AttemptExecutor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(Gateway::new(registry, executor)),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
