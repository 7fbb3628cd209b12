//! Registry of hash algorithms keyed by name and identification code

use super::algorithm::AlgorithmSpec;
use super::traits::HashAlgorithmImpl;
use crate::error::{LookupError, ValidationError};
use crate::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry for all known algorithms
///
/// Entries are ordered by identification code. Build one with
/// [`AlgorithmRegistry::with_builtins`] and pass it to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: BTreeMap<u32, AlgorithmSpec>,
}

impl AlgorithmRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full built-in identification table
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::algorithms::register_all(&mut registry);
        registry
    }

    /// Register an algorithm
    ///
    /// Codes and names must be unique across the registry.
    pub fn register(&mut self, spec: AlgorithmSpec) -> Result<()> {
        if self.algorithms.contains_key(&spec.code()) {
            return Err(ValidationError::invalid_configuration(&format!(
                "identification code {} is already registered",
                spec.code()
            ))
            .into());
        }
        if let Some(existing) = self.find(spec.name()) {
            return Err(ValidationError::invalid_configuration(&format!(
                "algorithm name '{}' is already registered as code {}",
                spec.name(),
                existing.code()
            ))
            .into());
        }

        self.algorithms.insert(spec.code(), spec);
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&AlgorithmSpec> {
        self.algorithms.values().find(|spec| spec.answers_to(name))
    }

    /// Entry for a name or alias
    pub fn spec(&self, name: &str) -> Result<&AlgorithmSpec> {
        self.find(name)
            .ok_or_else(|| LookupError::unknown_algorithm(name).into())
    }

    /// Primitive for a name or alias
    pub fn get(&self, name: &str) -> Result<Arc<dyn HashAlgorithmImpl>> {
        self.spec(name)?.primitive().cloned()
    }

    /// Entry for an identification code
    pub fn resolve(&self, code: i64) -> Result<&AlgorithmSpec> {
        u32::try_from(code)
            .ok()
            .and_then(|code| self.algorithms.get(&code))
            .ok_or_else(|| LookupError::invalid_identification_code(code).into())
    }

    /// Entry for an identification code given as text
    pub fn resolve_str(&self, input: &str) -> Result<&AlgorithmSpec> {
        let code: i64 = input
            .trim()
            .parse()
            .map_err(|_| LookupError::non_integer_code(input))?;
        self.resolve(code)
    }

    /// All entries in ascending code order
    pub fn specs(&self) -> impl Iterator<Item = &AlgorithmSpec> {
        self.algorithms.values()
    }

    /// Implemented entries in ascending code order
    pub fn implemented(&self) -> impl Iterator<Item = &AlgorithmSpec> {
        self.specs().filter(|spec| spec.is_implemented())
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::hashing::DigestShape;

    #[test]
    fn test_resolve_known_code() {
        let registry = AlgorithmRegistry::with_builtins();
        assert_eq!(registry.resolve(100).unwrap().name(), "md5");
        assert_eq!(registry.resolve(352).unwrap().name(), "sha1(sha1(pass))");
    }

    #[test]
    fn test_resolve_unknown_code() {
        let registry = AlgorithmRegistry::with_builtins();
        for code in [9999, -1, 0, i64::MAX] {
            assert!(matches!(
                registry.resolve(code),
                Err(Error::Lookup(LookupError::InvalidIdentificationCode { .. }))
            ));
        }
    }

    #[test]
    fn test_resolve_non_integer() {
        let registry = AlgorithmRegistry::with_builtins();
        assert!(matches!(
            registry.resolve_str("md5"),
            Err(Error::Lookup(LookupError::NonIntegerCode { .. }))
        ));
        assert_eq!(registry.resolve_str(" 300 ").unwrap().name(), "sha1");
    }

    #[test]
    fn test_get_by_name_and_alias() {
        let registry = AlgorithmRegistry::with_builtins();
        assert_eq!(registry.get("MD5").unwrap().id(), "md5");
        assert_eq!(registry.get("windows local (ntlm)").unwrap().id(), "ntlm");
    }

    #[test]
    fn test_get_unknown_name() {
        let registry = AlgorithmRegistry::with_builtins();
        assert!(matches!(
            registry.get("sha9"),
            Err(Error::Lookup(LookupError::UnknownAlgorithm { .. }))
        ));
    }

    #[test]
    fn test_get_unimplemented() {
        let registry = AlgorithmRegistry::with_builtins();
        assert!(registry.spec("md5crypt").is_ok());
        assert!(matches!(
            registry.get("md5crypt"),
            Err(Error::Lookup(LookupError::NotImplemented { .. }))
        ));
    }

    #[test]
    fn test_specs_in_code_order() {
        let registry = AlgorithmRegistry::with_builtins();
        let codes: Vec<u32> = registry.specs().map(|s| s.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
        assert_eq!(registry.implemented().count(), 38);
        assert_eq!(registry.len(), 45);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = AlgorithmRegistry::with_builtins();
        let duplicate_code = AlgorithmSpec::unimplemented(100, "other", DigestShape::hex(32));
        let duplicate_name = AlgorithmSpec::unimplemented(9000, "MD5", DigestShape::hex(32));

        assert!(registry.register(duplicate_code).is_err());
        assert!(registry.register(duplicate_name).is_err());
    }
}
