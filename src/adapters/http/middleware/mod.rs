pub mod cors;
pub mod request_id;

pub use cors::cors;
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
