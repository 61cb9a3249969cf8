pub mod error;
pub mod http;
pub mod traits;

// Re-export
pub use error::ApiError;
pub use http::HttpDashboardRepository;
pub use traits::{BrandRepository, SheetRepository};
