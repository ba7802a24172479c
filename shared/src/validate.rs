//! 必填字段校验
//!
//! 只检查字段是否存在，不做跨字段校验；其余规则以服务端为准。

use crate::{NewJob, NewMaterial, NewSparePartUsage};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: i64 },
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

impl Validate for NewJob {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.title, "job title")
    }
}

impl Validate for NewMaterial {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "material name")
    }
}

impl Validate for NewSparePartUsage {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.part_name, "part name")?;
        if self.quantity_used < 1 {
            return Err(ValidationError::TooSmall {
                field: "quantity used",
                min: 1,
            });
        }
        Ok(())
    }
}
