//! Activation link endpoints

pub mod generate;
pub mod resend;
pub mod verify;

pub use generate::generate_activation;
pub use resend::resend_activation;
pub use verify::verify_activation;
