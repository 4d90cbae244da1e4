pub mod dashboard;
pub mod error;
pub mod health;

pub use error::AppError;
