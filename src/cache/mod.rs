// 缓存模块
// 键值存储抽象，以及花名册/会话两个带时间戳的缓存槽

pub mod keys;
pub mod operations;
pub mod store;

// 重新导出常用类型
pub use operations::{CacheStore, Cached, Slot};
pub use store::{KvStore, MemoryStore, RedisStore};
