//! Boolean-Formatter Registry (§4.3)

use std::collections::HashMap;

use crate::locale::Locale;

/// Maps `(culture tag, specifier name) -> (true_string, false_string)`.
///
/// Owned by a `TemplateProcessor` and treated as read-only during
/// processing (§5); a host populates it before constructing the processor.
#[derive(Debug, Clone)]
pub struct BooleanFormatterRegistry {
    entries: HashMap<(String, String), (String, String)>,
}

impl BooleanFormatterRegistry {
    /// Empty registry, no built-ins. Most callers want `with_builtins`.
    pub fn new() -> Self {
        BooleanFormatterRegistry {
            entries: HashMap::new(),
        }
    }

    /// A registry pre-populated with the built-in specifiers named in §4.3,
    /// across all built-in locales plus the invariant culture.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let locales = [
            Locale::invariant(),
            Locale::en_us(),
            Locale::fr_fr(),
            Locale::de_de(),
            Locale::es_es(),
            Locale::it_it(),
            Locale::pt_br(),
        ];
        for locale in &locales {
            registry.register(locale.tag, "checkbox", "\u{2611}", "\u{2610}");
            registry.register(locale.tag, "checkmark", "\u{2713}", "\u{2717}");
            registry.register(locale.tag, "truefalse", "True", "False");
            registry.register(locale.tag, "onoff", "On", "Off");
            registry.register(locale.tag, "enabled", "Enabled", "Disabled");
            registry.register(locale.tag, "active", "Active", "Inactive");
            registry.register(locale.tag, "yesno", locale.yes, locale.no);
        }
        registry
    }

    /// Register or overwrite a specifier for a culture tag. Additive and
    /// last-writer-wins, per spec.
    pub fn register(
        &mut self,
        culture: impl Into<String>,
        specifier: impl Into<String>,
        true_text: impl Into<String>,
        false_text: impl Into<String>,
    ) {
        self.entries.insert(
            (culture.into(), specifier.into()),
            (true_text.into(), false_text.into()),
        );
    }

    pub fn lookup(&self, culture: &str, specifier: &str) -> Option<(&str, &str)> {
        self.entries
            .get(&(culture.to_string(), specifier.to_string()))
            .map(|(t, f)| (t.as_str(), f.as_str()))
    }
}

impl Default for BooleanFormatterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("invariant", "yesno", "Yes", "No")]
    #[case("fr-FR", "yesno", "Oui", "Non")]
    #[case("de-DE", "yesno", "Ja", "Nein")]
    #[case("invariant", "checkbox", "\u{2611}", "\u{2610}")]
    fn builtin_lookup(
        #[case] culture: &str,
        #[case] specifier: &str,
        #[case] expect_true: &str,
        #[case] expect_false: &str,
    ) {
        let registry = BooleanFormatterRegistry::with_builtins();
        assert_eq!(
            registry.lookup(culture, specifier),
            Some((expect_true, expect_false))
        );
    }

    #[test]
    fn unknown_specifier_is_none() {
        let registry = BooleanFormatterRegistry::with_builtins();
        assert_eq!(registry.lookup("invariant", "nope"), None);
    }

    #[test]
    fn custom_registration_is_last_writer_wins() {
        let mut registry = BooleanFormatterRegistry::with_builtins();
        registry.register("invariant", "yesno", "Ja", "Nein");
        assert_eq!(
            registry.lookup("invariant", "yesno"),
            Some(("Ja", "Nein"))
        );
    }
}
