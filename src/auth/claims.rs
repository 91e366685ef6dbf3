use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload. Tokens carry no expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,  // user ID
    pub iat: usize, // issued at (unix timestamp)
}
