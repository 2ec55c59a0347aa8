//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有稀缺资源（浏览器会话、已回复集合），驱动唯一的控制循环。
//! 只做调度、计时与错误恢复，不做具体业务判断。

pub mod engage_loop;

pub use engage_loop::{cooldown_for, App};
