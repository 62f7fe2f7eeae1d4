//! Verification code endpoints

pub mod generate;
pub mod verify;

pub use generate::generate_code;
pub use verify::verify_code;
