//! 资源客户端
//!
//! REST 端点到类型化函数的一一映射，不做序列化之外的处理。
//! 创建接口在发送前做必填校验，其余错误原样返回。

mod jobs;
mod materials;
mod spare_parts;

pub use jobs::Jobs;
pub use materials::Materials;
pub use spare_parts::SpareParts;

#[cfg(test)]
mod tests;
