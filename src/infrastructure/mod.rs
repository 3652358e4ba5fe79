pub mod in_memory_backend;
pub mod transport;
