use std::collections::HashMap;

/// A registered payload or error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    code: u32,
    description: String,
}

impl TypeEntry {
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Application supplied mapping from wire type code to descriptor.
///
/// Payload types and error types live in two independent registries. An
/// empty registry disables validation and accepts every code; a non empty
/// one accepts only the codes it holds. Registries are built up front,
/// handed to the decoder at construction, and shared between connections
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<u32, TypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `code`. Registering the same code again replaces the
    /// previous description.
    pub fn register(&mut self, code: u32, description: impl Into<String>) {
        self.entries.insert(
            code,
            TypeEntry {
                code,
                description: description.into(),
            },
        );
    }

    /// True when validation is disabled (empty registry) or `code` is known.
    pub fn validate(&self, code: u32) -> bool {
        self.entries.is_empty() || self.entries.contains_key(&code)
    }

    pub fn get(&self, code: u32) -> Option<&TypeEntry> {
        self.entries.get(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
