mod jwt;
mod registry;
mod remote;

pub use jwt::JwtVerifier;
pub use registry::{TokenVerifier, TokenVerifiers, VerifierId};
pub use remote::RemoteVerifier;

use crate::error::AppError;

pub(crate) fn rejected() -> AppError {
    AppError::unauthorized("User verification failed")
}
