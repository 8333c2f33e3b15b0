pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Actor, Claims, Identity, NewIdentity};
pub use errors::{AuthError, RepositoryError, VerifierError};
pub use ports::{IdentityRepository, IdentityVerifier};
pub use services::AuthService;
pub use value_objects::{Credential, ValueObjectError};
