pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ApiError, ErrorResponse};
pub use domain::{FormKind, StatusCheck};
pub use infra::config::Config;
pub use storage::{
    DocumentStore, MemoryDocumentStore, MemoryRelationalStore, PgDocumentStore, RelationalStore,
    SupabaseStore,
};
