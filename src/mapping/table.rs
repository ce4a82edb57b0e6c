//! Ordered source-key → header-name table.

/// One promotion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    source_key: String,
    header_name: String,
}

impl MappingEntry {
    /// Query parameter name to look for.
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Header name to write, in its original case.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }
}

/// Immutable promotion rules, iterated in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(source_key, header_name)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        table.extend(pairs);
        table
    }

    /// Build a table from bare argument names, each promoted to `X-<Name>`.
    ///
    /// Every dash-separated term of the header name is capitalized, so
    /// `user-id` maps to `X-User-Id`.
    ///
    /// The header map entry is indexed by the lower-cased name like any other
    /// promoted header, so a mixed-case arg such as `userId` lands under
    /// `x-userid` rather than `x-userId`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_pairs(args.into_iter().map(|arg| {
            let arg = arg.as_ref();
            (arg.to_string(), header_for_arg(arg))
        }))
    }

    /// Add or replace a rule. A replaced key keeps its original position.
    pub fn insert(&mut self, source_key: impl Into<String>, header_name: impl Into<String>) {
        let source_key = source_key.into();
        let header_name = header_name.into();
        match self.entries.iter_mut().find(|e| e.source_key == source_key) {
            Some(existing) => existing.header_name = header_name,
            None => self.entries.push(MappingEntry {
                source_key,
                header_name,
            }),
        }
    }

    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, header) in pairs {
            self.insert(key, header);
        }
    }

    /// Merge another table; its rules override ours for shared keys.
    pub fn merge(&mut self, other: MappingTable) {
        self.extend(
            other
                .entries
                .into_iter()
                .map(|e| (e.source_key, e.header_name)),
        );
    }

    pub fn get(&self, source_key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.source_key == source_key)
            .map(|e| e.header_name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn header_for_arg(arg: &str) -> String {
    format!("x-{arg}")
        .split('-')
        .map(|term| {
            let mut chars = term.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}
