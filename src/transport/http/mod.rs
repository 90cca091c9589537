pub mod error;
pub mod guards;
pub mod router;
pub mod types;
pub mod validation;
pub mod handlers {
    pub mod health;
    pub mod restaurants;
}

pub use error::ApiError;
pub use router::{create_app, create_router, ApiDoc};
pub use types::AppState;
