//! Response cache adapters

pub mod memory;
pub mod redis;

pub use memory::MemoryResponseCache;
pub use redis::RedisResponseCache;
