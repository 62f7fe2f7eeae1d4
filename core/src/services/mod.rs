//! Business services containing the engines and their orchestration.

pub mod activation;
pub mod clock;
pub mod delivery;
pub mod rate_limit;
pub mod random;
pub mod verification;

// Re-export commonly used types
pub use activation::{ActivationClaims, GeneratedActivation, TokenEngine};
pub use clock::{Clock, SystemClock};
pub use delivery::{DeliveryConfig, DeliveryService, Mailer};
pub use rate_limit::{RateLimitStatus, RateLimiter, RateLimiterConfig};
pub use random::{OsRandom, SecureRandom};
pub use verification::{CodeEngine, CodeEngineConfig};
