// Adapters layer: concrete implementations for external systems (filesystem, Firestore REST).

pub mod http;
pub mod storage;
