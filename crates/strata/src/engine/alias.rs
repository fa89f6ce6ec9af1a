use std::collections::HashSet;

/// Hands out table aliases that are unique within one command.
///
/// An alias is the lowercased first letter of the table name. Later tables
/// starting with the same letter get a numeric suffix: `a`, `a0`, `a1`.
#[derive(Debug, Default)]
pub(crate) struct AliasTable {
    used: HashSet<String>,
}

impl AliasTable {
    pub(crate) fn alias_for(&mut self, table_name: &str) -> String {
        let base = table_name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase().to_string())
            .unwrap_or_else(|| "t".to_string());

        self.reserve(&base)
    }

    /// Reserves `base`, or the first free `base{n}`.
    pub(crate) fn reserve(&mut self, base: &str) -> String {
        let alias = unique_name(base, |name| self.used.contains(name));
        self.used.insert(alias.clone());
        alias
    }
}

/// Returns `base` if it is free, otherwise `base0`, `base1`, ...
pub(crate) fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }

    (0..)
        .map(|n| format!("{base}{n}"))
        .find(|name| !taken(name))
        .expect("unbounded counter")
}
