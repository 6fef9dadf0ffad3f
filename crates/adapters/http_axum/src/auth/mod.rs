//! Authentication: bearer tokens, password hashing and actor extraction.

mod actor;
mod jwt;
mod password;

pub use actor::CurrentActor;
pub use jwt::{Claims, TokenConfig, TokenManager};
pub use password::BcryptPasswordHasher;
