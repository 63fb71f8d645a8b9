use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConsoleError, Result};

/// Character class shared by titles and descriptions: word characters,
/// whitespace, and the symbols + - . , ; !
static TEXT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s+\-.,;!]+$").unwrap());

fn validated_text(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ConsoleError::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if len > max_len {
        return Err(ConsoleError::Validation {
            field,
            reason: format!("must be at most {max_len} characters, got {len}"),
        });
    }
    if !TEXT_PATTERN.is_match(value) {
        return Err(ConsoleError::Validation {
            field,
            reason: "contains a disallowed character".to_string(),
        });
    }
    Ok(())
}

/// Video title: 1-32 characters from the allowed character class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validated_text("title", &value, 32)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Video description: 1-256 characters from the allowed character class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validated_text("description", &value, 256)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative view counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Views(u64);

impl Views {
    pub fn new(count: i64) -> Result<Self> {
        if count < 0 {
            return Err(ConsoleError::Validation {
                field: "views",
                reason: format!("must be non-negative, got {count}"),
            });
        }
        Ok(Self(count as u64))
    }

    pub fn count(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of video categories, keyed on the wire by a three-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Music,
    Sport,
    Documentary,
    Game,
    Movie,
    Other,
}

impl Category {
    /// Looks up a short wire code. Unknown codes are a hard failure,
    /// never a silent default.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "MUS" => Ok(Self::Music),
            "SPO" => Ok(Self::Sport),
            "DOC" => Ok(Self::Documentary),
            "GAM" => Ok(Self::Game),
            "MOV" => Ok(Self::Movie),
            "OTH" => Ok(Self::Other),
            other => Err(ConsoleError::UnknownCategory(other.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Music => "MUS",
            Self::Sport => "SPO",
            Self::Documentary => "DOC",
            Self::Game => "GAM",
            Self::Movie => "MOV",
            Self::Other => "OTH",
        }
    }

    /// Human label used for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Sport => "Sport",
            Self::Documentary => "Documentary",
            Self::Game => "Game",
            Self::Movie => "Movie",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry as observed by the rest of the application.
/// Construction succeeds only with every component valid; instances are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VideoDetails {
    id: u64,
    title: Title,
    description: Description,
    author_name: String,
    category: Category,
    views: Views,
}

impl VideoDetails {
    pub fn new(
        id: i64,
        title: Title,
        description: Description,
        author_name: impl Into<String>,
        category: Category,
        views: Views,
    ) -> Result<Self> {
        if id < 1 {
            return Err(ConsoleError::Validation {
                field: "id",
                reason: format!("must be positive, got {id}"),
            });
        }
        Ok(Self {
            id: id as u64,
            title,
            description,
            author_name: author_name.into(),
            category,
            views,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Author display name, passed through from the API unvalidated.
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn views(&self) -> Views {
        self.views
    }
}
