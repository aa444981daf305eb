use crate::expr::Type;
use std::sync::Arc;

/// Descriptor of a persistent entity or embedded structure type.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentType {
    pub name: Arc<str>,

    /// Name of the field holding the run-time type id, when the type is part
    /// of a hierarchy.
    pub discriminator: Option<String>,

    pub fields: Vec<Arc<FieldInfo>>,
}

/// Descriptor of a single persistent field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: Arc<str>,
    pub ty: Type,

    /// Lazy-load fields are only read when explicitly requested.
    pub is_lazy_load: bool,
}

impl PersistentType {
    pub fn new(name: impl Into<Arc<str>>) -> PersistentType {
        PersistentType {
            name: name.into(),
            discriminator: None,
            fields: vec![],
        }
    }

    pub fn with_discriminator(mut self, name: impl Into<String>) -> PersistentType {
        self.discriminator = Some(name.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<Arc<FieldInfo>>) -> PersistentType {
        self.fields.push(field.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Arc<FieldInfo>> {
        self.fields.iter().find(|field| &*field.name == name)
    }

    pub fn is_discriminator(&self, name: &str) -> bool {
        self.discriminator.as_deref() == Some(name)
    }
}

impl FieldInfo {
    pub fn new(name: impl Into<Arc<str>>, ty: Type) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            ty,
            is_lazy_load: false,
        }
    }

    pub fn lazy(mut self) -> FieldInfo {
        self.is_lazy_load = true;
        self
    }
}
