//! TOML roster loading.
//!
//! A roster lists people and the phones they own. Every entry is built through
//! the validating constructors; all failing entries are reported together.
//!
//! ```toml
//! [validation]
//! require_full_name = true
//!
//! [[people]]
//! id = 1
//! name = "Jane Doe"
//!
//! [people.phone]
//! manufacturer_name = "Samsung"
//! model = "M-SAM-123"
//! color = "black"
//! year = 2019
//! under_warranty = true
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::device::{Color, MobileDevice};
use crate::error::ValidationError;
use crate::person::{validate_id, validate_name, validate_name_format, PersonRecord};

/// Errors that can occur while loading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster file could not be read.
    #[error("Failed to read roster {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The roster is not valid TOML or has the wrong shape.
    #[error("Failed to parse roster: {0}")]
    Parse(#[from] toml::de::Error),

    /// One or more entries failed validation.
    #[error("{} roster entries failed validation: {}", .0.len(), join_entry_errors(.0))]
    InvalidEntries(Vec<EntryError>),

    /// Two entries share an id.
    #[error("Duplicate person id {id} (entries {first} and {second})")]
    DuplicateId {
        /// The repeated id.
        id: i64,
        /// Index of the first entry using the id.
        first: usize,
        /// Index of the repeated entry.
        second: usize,
    },
}

/// A validation failure tied to a roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    /// Zero-based position of the entry in the file.
    pub index: usize,
    /// Id declared by the entry.
    pub id: i64,
    /// The validation failure.
    pub error: ValidationError,
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {} (id {}): {}", self.index, self.id, self.error)
    }
}

fn join_entry_errors(errors: &[EntryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for roster operations.
pub type RosterResult<T> = std::result::Result<T, RosterError>;

/// Optional checks applied on top of the constructor validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Require every name to contain at least two words.
    pub require_full_name: bool,
}

#[derive(Deserialize)]
struct RosterFile {
    #[serde(default)]
    validation: ValidationSettings,
    #[serde(default)]
    people: Vec<PersonEntry>,
}

#[derive(Deserialize)]
struct PersonEntry {
    id: i64,
    name: String,
    phone: Option<PhoneEntry>,
}

#[derive(Deserialize)]
struct PhoneEntry {
    manufacturer_name: String,
    model: String,
    color: String,
    year: i32,
    under_warranty: bool,
}

impl PhoneEntry {
    fn build(self) -> Result<MobileDevice, ValidationError> {
        let color: Color = self.color.parse()?;
        MobileDevice::new(
            self.manufacturer_name,
            self.model,
            color,
            self.year,
            self.under_warranty,
        )
    }
}

impl PersonEntry {
    fn build(self, settings: ValidationSettings) -> Result<PersonRecord, ValidationError> {
        validate_id(self.id)?;
        validate_name(&self.name)?;
        let phone = self.phone.map(PhoneEntry::build).transpose()?;
        let person = PersonRecord::new(self.id, self.name, phone)?;
        if settings.require_full_name {
            validate_name_format(person.name())?;
        }
        Ok(person)
    }
}

/// A validated list of people.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Roster {
    validation: ValidationSettings,
    people: Vec<PersonRecord>,
}

impl Roster {
    /// Parses and validates a roster from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Parse`] for malformed TOML,
    /// [`RosterError::InvalidEntries`] listing every entry that failed
    /// validation, or [`RosterError::DuplicateId`].
    pub fn from_toml_str(content: &str) -> RosterResult<Self> {
        let file: RosterFile = toml::from_str(content)?;
        let settings = file.validation;

        let mut people = Vec::with_capacity(file.people.len());
        let mut errors = Vec::new();
        for (index, entry) in file.people.into_iter().enumerate() {
            let id = entry.id;
            match entry.build(settings) {
                Ok(person) => people.push((index, person)),
                Err(error) => {
                    warn!(index, id, %error, "Invalid roster entry");
                    errors.push(EntryError { index, id, error });
                }
            }
        }
        if !errors.is_empty() {
            return Err(RosterError::InvalidEntries(errors));
        }

        let mut seen: HashMap<i64, usize> = HashMap::new();
        for (index, person) in &people {
            if let Some(&first) = seen.get(&person.id()) {
                return Err(RosterError::DuplicateId {
                    id: person.id(),
                    first,
                    second: *index,
                });
            }
            seen.insert(person.id(), *index);
        }

        let people: Vec<PersonRecord> = people.into_iter().map(|(_, person)| person).collect();
        debug!(count = people.len(), "Parsed roster");
        Ok(Self {
            validation: settings,
            people,
        })
    }

    /// Reads and validates a roster file.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Read`] if the file cannot be read, otherwise
    /// any error from [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> RosterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RosterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_toml_str(&content)?;
        info!(path = %path.display(), count = roster.len(), "Loaded roster");
        Ok(roster)
    }

    /// Settings the roster was validated with.
    #[must_use]
    pub const fn validation(&self) -> ValidationSettings {
        self.validation
    }

    /// All people, in file order.
    #[must_use]
    pub fn people(&self) -> &[PersonRecord] {
        &self.people
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&PersonRecord> {
        self.people.iter().find(|person| person.id() == id)
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Returns `true` if the roster lists nobody.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Consumes the roster, returning its people.
    #[must_use]
    pub fn into_people(self) -> Vec<PersonRecord> {
        self.people
    }
}
