mod health;
mod pages;
mod upload;

pub use health::{HealthResponse, health_handler};
pub use pages::{data_categorizer_handler, menu_handler, name_assign_handler};
pub use upload::{WARNING_HEADER, upload_handler};
