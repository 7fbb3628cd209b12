//! Registry entries describing one algorithm variant each

use super::shape::DigestShape;
use super::traits::HashAlgorithmImpl;
use crate::error::LookupError;
use crate::Result;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;

/// One entry of the identification table
///
/// `primitive` is `None` for formats the registry can recognise but not
/// compute. Such entries still take part in classification.
#[derive(Clone)]
pub struct AlgorithmSpec {
    code: u32,
    name: &'static str,
    aliases: &'static [&'static str],
    shape: DigestShape,
    primitive: Option<Arc<dyn HashAlgorithmImpl>>,
}

impl AlgorithmSpec {
    /// Entry backed by a primitive
    pub fn implemented(
        code: u32,
        name: &'static str,
        shape: DigestShape,
        primitive: impl HashAlgorithmImpl + 'static,
    ) -> Self {
        Self {
            code,
            name,
            aliases: &[],
            shape,
            primitive: Some(Arc::new(primitive)),
        }
    }

    /// Entry that is recognised but cannot be computed
    pub fn unimplemented(code: u32, name: &'static str, shape: DigestShape) -> Self {
        Self {
            code,
            name,
            aliases: &[],
            shape,
            primitive: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    pub fn shape(&self) -> &DigestShape {
        &self.shape
    }

    pub fn is_implemented(&self) -> bool {
        self.primitive.is_some()
    }

    /// Whether `name` refers to this entry, ignoring case
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Human readable name of the primitive, if there is one
    pub fn display_name(&self) -> Option<&'static str> {
        self.primitive.as_ref().map(|primitive| primitive.display_name())
    }

    /// Whether the primitive can search for `target`
    ///
    /// False for recognise-only entries and for targets whose embedded
    /// parameters do not parse.
    pub fn accepts(&self, target: &str) -> bool {
        self.primitive
            .as_ref()
            .is_some_and(|primitive| primitive.accepts_target(target))
    }

    /// The primitive, or `NotImplemented` for recognise-only entries
    pub fn primitive(&self) -> Result<&Arc<dyn HashAlgorithmImpl>> {
        self.primitive
            .as_ref()
            .ok_or_else(|| LookupError::not_implemented(self.name).into())
    }
}

impl fmt::Debug for AlgorithmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmSpec")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("implemented", &self.is_implemented())
            .finish()
    }
}

impl PartialEq for AlgorithmSpec {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for AlgorithmSpec {}

impl fmt::Display for AlgorithmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

impl Serialize for AlgorithmSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AlgorithmSpec", 3)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("implemented", &self.is_implemented())?;
        state.end()
    }
}
