pub mod manager;
pub mod provider;
pub mod session;
pub mod verifier;

pub use manager::LifecycleManager;
pub use provider::{ConfidentialityProvider, SimulatedFheProvider};
pub use session::Session;
pub use verifier::{ConditionVerifier, DelayedVerifier, ImmediateVerifier};
