//! Domain entities representing core business objects.

pub mod activation_token;
pub mod verification_code;

// Re-export commonly used types
pub use activation_token::{
    ActivationToken, MAX_SEND_COUNT, RESEND_COOLDOWN_SECONDS, TOKEN_EXPIRY_MINUTES,
};
pub use verification_code::{VerificationCode, DEFAULT_CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
