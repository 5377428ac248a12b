use serde::{Deserialize, Serialize};

/// How an import was written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import ... from '...'`, `export ... from '...'`, or a pattern-extracted include.
    Es,
    /// `import('...')`
    Dynamic,
    /// `require('...')`
    Require,
}

/// Shape of a single local binding introduced by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    Named,
    Default,
    Namespace,
}

/// One `{ localName, importedName }` pair of an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub local_name: String,
    pub imported_name: String,
    pub binding_type: BindingType,
    /// Copied from the owning binding once the module resolver succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_target: Option<String>,
}

impl ImportSpecifier {
    pub fn named(local: impl Into<String>, imported: impl Into<String>) -> Self {
        Self {
            local_name: local.into(),
            imported_name: imported.into(),
            binding_type: BindingType::Named,
            resolved_target: None,
        }
    }

    pub fn default(local: impl Into<String>) -> Self {
        Self {
            local_name: local.into(),
            imported_name: "default".to_string(),
            binding_type: BindingType::Default,
            resolved_target: None,
        }
    }

    pub fn namespace(local: impl Into<String>) -> Self {
        Self {
            local_name: local.into(),
            imported_name: "*".to_string(),
            binding_type: BindingType::Namespace,
            resolved_target: None,
        }
    }
}

/// An import statement belonging to one file.
///
/// `specifiers` is empty only for side-effect imports (`import './polyfill'`),
/// star re-exports, dynamic imports, and pattern-extracted includes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    /// Raw specifier as written.
    pub source: String,
    /// Concrete repository path, filled in by the module resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_target: Option<String>,
    pub kind: ImportKind,
    #[serde(default)]
    pub specifiers: Vec<ImportSpecifier>,
    /// True for `export ... from '...'` forms.
    #[serde(default)]
    pub reexport: bool,
}

impl ImportBinding {
    pub fn new(source: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            source: source.into(),
            resolved_target: None,
            kind,
            specifiers: Vec::new(),
            reexport: false,
        }
    }

    pub fn with_specifiers(mut self, specifiers: Vec<ImportSpecifier>) -> Self {
        self.specifiers = specifiers;
        self
    }

    pub fn reexport(mut self) -> Self {
        self.reexport = true;
        self
    }

    /// Whether this is a bare side-effect import.
    pub fn is_side_effect(&self) -> bool {
        self.specifiers.is_empty() && self.kind == ImportKind::Es && !self.reexport
    }

    /// Record a successful resolution on the binding and all of its specifiers.
    pub fn set_resolved(&mut self, target: &str) {
        self.resolved_target = Some(target.to_string());
        for specifier in &mut self.specifiers {
            specifier.resolved_target = Some(target.to_string());
        }
    }

    /// Find the specifier that introduced `local_name`.
    pub fn specifier_for_local(&self, local_name: &str) -> Option<&ImportSpecifier> {
        self.specifiers.iter().find(|s| s.local_name == local_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_propagates_to_specifiers() {
        let mut binding = ImportBinding::new("./util", ImportKind::Es).with_specifiers(vec![
            ImportSpecifier::named("helper", "helper"),
            ImportSpecifier::default("util"),
        ]);
        binding.set_resolved("src/util.ts");

        assert_eq!(binding.resolved_target.as_deref(), Some("src/util.ts"));
        assert!(
            binding
                .specifiers
                .iter()
                .all(|s| s.resolved_target.as_deref() == Some("src/util.ts"))
        );
    }

    #[test]
    fn side_effect_detection() {
        assert!(ImportBinding::new("./polyfill", ImportKind::Es).is_side_effect());
        assert!(!ImportBinding::new("./x", ImportKind::Es).reexport().is_side_effect());
        assert!(!ImportBinding::new("./x", ImportKind::Dynamic).is_side_effect());
    }
}
