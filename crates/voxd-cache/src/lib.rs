#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod memory;
pub mod redis_store;

pub use memory::MemoryCacheStore;
pub use redis_store::RedisCacheStore;
