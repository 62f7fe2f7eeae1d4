//! Request and response payloads for the HTTP surface

pub mod requests;
pub mod responses;

pub use requests::{
    GenerateActivationRequest, GenerateCodeRequest, ResendActivationRequest,
    VerifyActivationRequest, VerifyCodeRequest,
};
pub use responses::{
    ActivationResponse, HealthChecks, HealthResponse, MessageResponse, RedeemResponse,
};
