//! Identity provider clients

pub mod firebase_verifier;
pub mod mock_verifier;

pub use firebase_verifier::FirebaseIdentityVerifier;
pub use mock_verifier::MockIdentityVerifier;
