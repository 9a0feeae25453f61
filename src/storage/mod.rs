pub mod document;
pub mod relational;

pub use document::{DocumentStore, DocumentStoreError, MemoryDocumentStore, PgDocumentStore};
pub use relational::{MemoryRelationalStore, RelationalStore, RelationalStoreError, SupabaseStore};

/// Accepts `[A-Za-z_][A-Za-z0-9_]*`, safe to splice into SQL or a URL path as a name.
pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
