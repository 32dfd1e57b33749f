use market_data::MarketSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketSource>) -> Self {
        Self { source }
    }
}
