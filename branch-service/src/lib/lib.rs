pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::branch;
pub use outbound::repositories;
