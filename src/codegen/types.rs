//! Type-mapping and default-value tables
//!
//! Declared C types are single folded keywords (`int`, `char`, ...), so each
//! table is a flat keyword lookup with a fallback for anything unrecognized.

use rustc_hash::FxHashMap;

/// Keyword-keyed lookup with a fallback entry
pub(crate) struct TypeTable {
    entries: FxHashMap<&'static str, &'static str>,
    fallback: &'static str,
}

impl TypeTable {
    fn from_pairs(pairs: &[(&'static str, &'static str)], fallback: &'static str) -> Self {
        let mut entries = FxHashMap::default();
        entries.extend(pairs.iter().copied());
        Self { entries, fallback }
    }

    pub(crate) fn get(&self, c_type: &str) -> &'static str {
        self.entries.get(c_type).copied().unwrap_or(self.fallback)
    }

    /// C type → Java type. `float` widens to `double` so that unsuffixed
    /// decimal literals stay assignable.
    pub(crate) fn java_types() -> Self {
        Self::from_pairs(
            &[
                ("int", "int"),
                ("float", "double"),
                ("double", "double"),
                ("char", "char"),
                ("long", "long"),
                ("short", "short"),
                ("bool", "boolean"),
                ("void", "void"),
                ("unsigned", "int"),
                ("signed", "int"),
            ],
            "Object",
        )
    }

    /// Java initializer for a declaration without one
    pub(crate) fn java_defaults() -> Self {
        Self::from_pairs(
            &[
                ("int", "0"),
                ("float", "0.0"),
                ("double", "0.0"),
                ("char", "'\\0'"),
                ("long", "0L"),
                ("short", "0"),
                ("bool", "false"),
                ("unsigned", "0"),
                ("signed", "0"),
            ],
            "null",
        )
    }

    /// Python initializer for a declaration without one
    pub(crate) fn python_defaults() -> Self {
        Self::from_pairs(
            &[
                ("int", "0"),
                ("float", "0.0"),
                ("double", "0.0"),
                ("char", "''"),
                ("long", "0"),
                ("short", "0"),
                ("bool", "False"),
                ("unsigned", "0"),
                ("signed", "0"),
            ],
            "None",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_type_mapping() {
        let types = TypeTable::java_types();
        assert_eq!(types.get("int"), "int");
        assert_eq!(types.get("float"), "double");
        assert_eq!(types.get("bool"), "boolean");
        assert_eq!(types.get("struct"), "Object");
    }

    #[test]
    fn test_defaults_per_dialect() {
        let java = TypeTable::java_defaults();
        let python = TypeTable::python_defaults();

        assert_eq!(java.get("char"), "'\\0'");
        assert_eq!(python.get("char"), "''");
        assert_eq!(java.get("long"), "0L");
        assert_eq!(python.get("bool"), "False");
        assert_eq!(java.get("mystery"), "null");
        assert_eq!(python.get("mystery"), "None");
    }
}
