//! Resource services.
//!
//! Each service borrows a [`TenableClient`](crate::TenableClient) and maps
//! one API area onto typed calls. Every call is a single request/response
//! round trip; nothing is retried or paged automatically.

mod analysis;
mod authentication;
mod current_user;
mod repository;

pub use analysis::AnalysisService;
pub use authentication::Authentication;
pub use current_user::CurrentUserService;
pub use repository::RepositoryService;
