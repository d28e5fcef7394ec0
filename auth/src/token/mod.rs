pub mod claims;
pub mod clock;
pub mod config;
pub mod engine;
pub mod errors;

pub use claims::Claims;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::TokenConfig;
pub use engine::IssuedToken;
pub use engine::TokenEngine;
pub use errors::TokenError;
