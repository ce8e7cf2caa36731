//! Admin authentication: accounts, password hashing, and the session gate.

pub mod password;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

pub use repository::{MemoryUserRepository, NewUser, User, UserRepository, UserView};
pub use router::auth_router;
pub use service::{AuthError, AuthService, InitAdminOutcome};
pub use session::{SessionStore, SESSION_COOKIE};
