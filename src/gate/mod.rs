pub mod password;
pub mod session;

pub use password::{GateError, PasswordGate, PasswordResponse};
pub use session::{SessionState, SessionStore};
