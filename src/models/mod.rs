//! Tenable.sc API model types.

mod analysis;
mod envelope;
mod id;
mod repository;
mod user;

pub use analysis::*;
pub use envelope::Envelope;
pub use id::ResourceId;
pub use repository::*;
pub use user::*;
