//! Seams to the expansion engine. The host implements these traits on its
//! engine handle and passes it to [`crate::normalize::ConfigLoader`].

use serde_json::Value;

use crate::normalize::UserData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyKind {
    /// Built-in snippets shipped with the host.
    System,
    User,
}

impl VocabularyKind {
    pub fn as_str(&self) -> &str {
        match self {
            VocabularyKind::System => "system",
            VocabularyKind::User => "user",
        }
    }
}

/// The engine's resource registry.
pub trait Resources {
    fn set_vocabulary(&mut self, vocabulary: Value, kind: VocabularyKind);
}

/// The engine's bootstrap routines.
pub trait Bootstrap {
    fn load_user_data(&mut self, data: UserData);

    fn load_extensions(&mut self, extensions: Value);
}
