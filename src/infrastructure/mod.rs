pub mod model;
pub mod observability;
pub mod tabular;
