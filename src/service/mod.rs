//! Generic entity access: CRUD primitives, validation, write hooks and per-entity facades.

mod credentials;
mod crud;
mod facade;
mod hook;
mod validation;
pub use credentials::{hash_password, verify_password, CredentialHook};
pub use crud::{CrudService, Page, DEFAULT_LIMIT, MAX_LIMIT};
pub use facade::{EntityFacade, ListParams};
pub use hook::{WriteHook, WriteMode};
pub use validation::RequestValidator;
