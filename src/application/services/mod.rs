mod categorization_service;

pub use categorization_service::{CategorizationError, CategorizationService};
