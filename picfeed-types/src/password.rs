use std::fmt;

/// A user's password as stored in the `users` table.
///
/// The value is kept verbatim: nothing here hashes, salts, or validates it.
/// The type deliberately has no `Serialize` impl and redacts itself in
/// `Debug`, so it can never end up in a projection or a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The stored value, for writing back to the database.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<String> for Password {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Password {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
