use std::sync::Arc;

use crate::application::ports::{Classifier, LabelDecoder};
use crate::application::services::CategorizationService;
use crate::presentation::config::Settings;

pub struct AppState<C, D>
where
    C: Classifier,
    D: LabelDecoder,
{
    pub categorization_service: Arc<CategorizationService<C, D>>,
    pub settings: Settings,
}

impl<C, D> Clone for AppState<C, D>
where
    C: Classifier,
    D: LabelDecoder,
{
    fn clone(&self) -> Self {
        Self {
            categorization_service: Arc::clone(&self.categorization_service),
            settings: self.settings.clone(),
        }
    }
}
