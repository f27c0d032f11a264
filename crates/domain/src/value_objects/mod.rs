//! 值对象模块
//!
//! 值对象是不可变的、无身份标识的领域概念

pub mod period;

pub use period::{Period, PeriodError};
