use super::{Value, ValueEnum};
use crate::{Error, Result};
use std::sync::Arc;

/// Static type of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Unsigned 8-bit integer
    U8,

    /// Unsigned 16-bit integer
    U16,

    /// Unsigned 32-bit integer
    U32,

    /// Unsigned 64-bit integer
    U64,

    /// 64-bit floating point number
    F64,

    /// String type
    String,

    /// Globally unique identifier
    Uuid,

    /// An enumeration backed by an integral type
    Enum(Arc<EnumType>),

    /// A type that additionally admits null
    Nullable(Box<Type>),

    /// A flat row of scalar values
    Tuple,

    /// An instance of the named persistent entity type
    Entity(Arc<str>),

    /// The key of the named persistent entity type
    Key(Arc<str>),

    /// An instance of the named embedded structure type
    Structure(Arc<str>),

    /// Any other named host type (DTOs, anonymous types, opaque tokens)
    Object(Arc<str>),

    /// A sequence of items of the given type
    Sequence(Box<Type>),

    /// Unit type
    Unit,
}

/// An enumeration type and the integral type it is stored as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumType {
    pub name: Arc<str>,

    /// The integral type values of this enum are stored as.
    pub underlying: Type,

    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumVariant {
    pub name: Arc<str>,
    pub value: i64,
}

impl EnumType {
    /// Creates an enum type. The underlying type must be integral and every
    /// variant value must be representable in it.
    pub fn new<N: Into<Arc<str>>>(
        name: impl Into<Arc<str>>,
        underlying: Type,
        variants: impl IntoIterator<Item = (N, i64)>,
    ) -> Result<Arc<EnumType>> {
        let name = name.into();

        if !underlying.is_integral() {
            return Err(Error::invalid_expression(format!(
                "enum `{name}` must have an integral underlying type; actual={underlying}"
            )));
        }

        let variants = variants
            .into_iter()
            .map(|(variant, value)| {
                let variant: Arc<str> = variant.into();

                if !underlying.admits_integer(value as i128) {
                    return Err(Error::invalid_expression(format!(
                        "enum `{name}` variant `{variant}` = {value} does not fit in {underlying}"
                    )));
                }

                Ok(EnumVariant {
                    name: variant,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Arc::new(EnumType {
            name,
            underlying,
            variants,
        }))
    }

    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| &*variant.name == name)
    }

    /// Returns the value of the named variant.
    pub fn value(self: &Arc<Self>, name: &str) -> Option<Value> {
        self.variant(name).map(|variant| {
            Value::Enum(ValueEnum {
                ty: self.clone(),
                value: variant.value,
            })
        })
    }
}

impl Type {
    pub fn nullable(self) -> Type {
        match self {
            ty @ Type::Nullable(_) => ty,
            ty => Type::Nullable(Box::new(ty)),
        }
    }

    pub fn sequence(item: impl Into<Type>) -> Type {
        Type::Sequence(Box::new(item.into()))
    }

    pub fn object(name: impl Into<Arc<str>>) -> Type {
        Type::Object(name.into())
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Type::Nullable(_))
    }

    /// Returns the type with one level of nullability removed.
    pub fn strip_nullable(&self) -> &Type {
        match self {
            Type::Nullable(inner) => inner,
            ty => ty,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.strip_nullable(), Type::Bool)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.strip_nullable(), Type::Enum(_))
    }

    /// Returns the enum type, looking through nullability.
    pub fn as_enum(&self) -> Option<&Arc<EnumType>> {
        match self.strip_nullable() {
            Type::Enum(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self.strip_nullable(),
            Type::I8
                | Type::I16
                | Type::I32
                | Type::I64
                | Type::U8
                | Type::U16
                | Type::U32
                | Type::U64
        )
    }

    /// For enum types, the type values are stored as, keeping nullability.
    /// Every other type is returned unchanged.
    pub fn underlying(&self) -> Type {
        match self {
            Type::Enum(ty) => ty.underlying.clone(),
            Type::Nullable(inner) if inner.is_enum() => inner.underlying().nullable(),
            ty => ty.clone(),
        }
    }

    fn integral_range(&self) -> Option<(i128, i128)> {
        Some(match self.strip_nullable() {
            Type::I8 => (i8::MIN as i128, i8::MAX as i128),
            Type::I16 => (i16::MIN as i128, i16::MAX as i128),
            Type::I32 => (i32::MIN as i128, i32::MAX as i128),
            Type::I64 => (i64::MIN as i128, i64::MAX as i128),
            Type::U8 => (0, u8::MAX as i128),
            Type::U16 => (0, u16::MAX as i128),
            Type::U32 => (0, u32::MAX as i128),
            Type::U64 => (0, u64::MAX as i128),
            _ => return None,
        })
    }

    fn admits_integer(&self, value: i128) -> bool {
        self.integral_range()
            .is_some_and(|(min, max)| min <= value && value <= max)
    }

    /// Converts `value` to this type.
    ///
    /// Integral values convert between integral kinds when in range, enum
    /// values convert to and from their underlying representation, and null
    /// passes through unchanged.
    pub fn cast(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        let target = self.strip_nullable();

        if let Some(integer) = value.to_integer() {
            return match target {
                Type::Enum(ty) => {
                    if !ty.underlying.admits_integer(integer) {
                        return Err(Error::expression_evaluation_failed(format!(
                            "{integer} is out of range for enum `{}`",
                            ty.name
                        )));
                    }

                    let value = i64::try_from(integer).map_err(|_| {
                        Error::expression_evaluation_failed(format!(
                            "{integer} does not fit the representation of enum `{}`",
                            ty.name
                        ))
                    })?;

                    Ok(Value::Enum(ValueEnum {
                        ty: ty.clone(),
                        value,
                    }))
                }
                Type::F64 => Ok(Value::F64(integer as f64)),
                target => Value::from_integer(integer, target),
            };
        }

        match (value, target) {
            (value @ Value::Bool(_), Type::Bool)
            | (value @ Value::String(_), Type::String)
            | (value @ Value::Uuid(_), Type::Uuid)
            | (value @ Value::F64(_), Type::F64)
            | (value @ Value::Tuple(_), Type::Tuple) => Ok(value),
            (value, target) => Err(Error::expression_evaluation_failed(format!(
                "cannot cast {value:?} to {target}"
            ))),
        }
    }
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::I8 => f.write_str("i8"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::U8 => f.write_str("u8"),
            Type::U16 => f.write_str("u16"),
            Type::U32 => f.write_str("u32"),
            Type::U64 => f.write_str("u64"),
            Type::F64 => f.write_str("f64"),
            Type::String => f.write_str("string"),
            Type::Uuid => f.write_str("uuid"),
            Type::Enum(ty) => write!(f, "enum {}", ty.name),
            Type::Nullable(inner) => write!(f, "{inner}?"),
            Type::Tuple => f.write_str("tuple"),
            Type::Entity(name) => write!(f, "entity {name}"),
            Type::Key(name) => write!(f, "key {name}"),
            Type::Structure(name) => write!(f, "structure {name}"),
            Type::Object(name) => f.write_str(name),
            Type::Sequence(item) => write!(f, "[{item}]"),
            Type::Unit => f.write_str("()"),
        }
    }
}

impl From<Arc<EnumType>> for Type {
    fn from(value: Arc<EnumType>) -> Self {
        Type::Enum(value)
    }
}

impl From<&Type> for Type {
    fn from(value: &Type) -> Self {
        value.clone()
    }
}
