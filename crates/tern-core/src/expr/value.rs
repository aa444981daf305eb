use super::{ApplyParameter, EnumType, Type};
use crate::{Error, Result};
use std::sync::Arc;
use uuid::Uuid;

/// A constant scalar, tuple or correlation token.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 8-bit integer
    I8(i8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Unsigned 8-bit integer
    U8(u8),

    /// Unsigned 16-bit integer
    U16(u16),

    /// Unsigned 32-bit integer
    U32(u32),

    /// Unsigned 64-bit integer
    U64(u64),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),

    /// Globally unique identifier
    Uuid(Uuid),

    /// Value of an enumerated type
    Enum(ValueEnum),

    /// A flat row of scalar values
    Tuple(Vec<Value>),

    /// The correlation token of an apply; only ever compared by identity
    #[cfg_attr(feature = "serde", serde(skip))]
    ApplyParameter(ApplyParameter),
}

/// A value of an enum type, stored as its numeric representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueEnum {
    pub ty: Arc<EnumType>,
    pub value: i64,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The natural static type of this value. Null values have no type of
    /// their own and report [`Type::Unit`].
    pub fn infer_ty(&self) -> Type {
        match self {
            Value::Null => Type::Unit,
            Value::Bool(_) => Type::Bool,
            Value::I8(_) => Type::I8,
            Value::I16(_) => Type::I16,
            Value::I32(_) => Type::I32,
            Value::I64(_) => Type::I64,
            Value::U8(_) => Type::U8,
            Value::U16(_) => Type::U16,
            Value::U32(_) => Type::U32,
            Value::U64(_) => Type::U64,
            Value::F64(_) => Type::F64,
            Value::String(_) => Type::String,
            Value::Uuid(_) => Type::Uuid,
            Value::Enum(value) => Type::Enum(value.ty.clone()),
            Value::Tuple(_) => Type::Tuple,
            Value::ApplyParameter(_) => Type::object("ApplyParameter"),
        }
    }

    /// Returns the numeric representation of integral and enum values.
    pub fn to_integer(&self) -> Option<i128> {
        Some(match *self {
            Value::I8(v) => v as i128,
            Value::I16(v) => v as i128,
            Value::I32(v) => v as i128,
            Value::I64(v) => v as i128,
            Value::U8(v) => v as i128,
            Value::U16(v) => v as i128,
            Value::U32(v) => v as i128,
            Value::U64(v) => v as i128,
            Value::Enum(ref v) => v.value as i128,
            _ => return None,
        })
    }

    /// Builds an integral value of the given type, failing when `integer` is
    /// out of range.
    pub fn from_integer(integer: i128, ty: &Type) -> Result<Value> {
        let out_of_range =
            || Error::expression_evaluation_failed(format!("{integer} is out of range for {ty}"));

        Ok(match ty.strip_nullable() {
            Type::I8 => Value::I8(i8::try_from(integer).map_err(|_| out_of_range())?),
            Type::I16 => Value::I16(i16::try_from(integer).map_err(|_| out_of_range())?),
            Type::I32 => Value::I32(i32::try_from(integer).map_err(|_| out_of_range())?),
            Type::I64 => Value::I64(i64::try_from(integer).map_err(|_| out_of_range())?),
            Type::U8 => Value::U8(u8::try_from(integer).map_err(|_| out_of_range())?),
            Type::U16 => Value::U16(u16::try_from(integer).map_err(|_| out_of_range())?),
            Type::U32 => Value::U32(u32::try_from(integer).map_err(|_| out_of_range())?),
            Type::U64 => Value::U64(u64::try_from(integer).map_err(|_| out_of_range())?),
            _ => {
                return Err(Error::expression_evaluation_failed(format!(
                    "{ty} is not an integral type"
                )))
            }
        })
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(Error::expression_evaluation_failed(format!(
                "expected bool; actual={self:?}"
            ))),
        }
    }

    /// Reads element `index` of a tuple value.
    pub fn tuple_element(&self, index: usize) -> Result<&Value> {
        match self {
            Value::Tuple(items) => items.get(index).ok_or_else(|| {
                Error::expression_evaluation_failed(format!(
                    "tuple index {index} out of bounds; len={}",
                    items.len()
                ))
            }),
            _ => Err(Error::expression_evaluation_failed(format!(
                "expected tuple; actual={self:?}"
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

/// `usize` is at most 64 bits wide on every supported target.
impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::U64(value as u64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<ApplyParameter> for Value {
    fn from(value: ApplyParameter) -> Self {
        Value::ApplyParameter(value)
    }
}

impl From<ValueEnum> for Value {
    fn from(value: ValueEnum) -> Self {
        Value::Enum(value)
    }
}
