pub mod api;
pub mod auth;
pub mod department;
pub mod employee;
pub mod task;

pub use api::*;
pub use auth::*;
pub use department::*;
pub use employee::*;
pub use task::*;
