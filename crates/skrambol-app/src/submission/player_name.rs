use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A display name with a duplicate counter, shown as `name#0001`.
///
/// Several players may pick the same name; the counter tells them apart.
///
/// # Examples
///
/// ```
/// use skrambol_app::submission::PlayerName;
///
/// let name = PlayerName::new("john").unwrap().with_duplicate(12);
/// assert_eq!(name.to_string(), "john#0012");
///
/// let parsed: PlayerName = "john#0012".parse().unwrap();
/// assert_eq!(parsed, name);
///
/// let bare: PlayerName = "guest".parse().unwrap();
/// assert_eq!(bare.duplicate(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName {
    name: String,
    duplicate: u32,
}

impl PlayerName {
    /// Creates a name with duplicate counter 1.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerNameError::Empty`] if nothing is left after trimming.
    pub fn new(name: &str) -> Result<Self, PlayerNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlayerNameError::Empty);
        }
        Ok(Self {
            name: name.to_owned(),
            duplicate: 1,
        })
    }

    /// Replaces the duplicate counter.
    #[must_use]
    pub fn with_duplicate(mut self, duplicate: u32) -> Self {
        self.duplicate = duplicate;
        self
    }

    /// Returns the base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the duplicate counter.
    #[must_use]
    pub const fn duplicate(&self) -> u32 {
        self.duplicate
    }
}

impl Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:04}", self.name, self.duplicate)
    }
}

impl FromStr for PlayerName {
    type Err = PlayerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `name#digits` splits at the last `#`; anything else is a bare name.
        if let Some((name, digits)) = s.rsplit_once('#')
            && !name.is_empty()
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && let Ok(duplicate) = digits.parse()
        {
            return Ok(Self::new(name)?.with_duplicate(duplicate));
        }
        Self::new(s)
    }
}

/// Errors from creating or parsing a [`PlayerName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayerNameError {
    /// The name is empty or only whitespace.
    #[display("player name is empty")]
    Empty,
}
