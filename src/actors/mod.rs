// Actor模块 - 使用Actor模式管理领域状态
//
// 存储只被一个Actor任务持有，其他组件通过Handle发送消息
// 所有修改按顺序执行，不需要Arc<Mutex<T>>

pub mod store_actor;

pub use store_actor::{StoreActor, StoreCommand, StoreHandle};
