//! Person records.
//!
//! A [`PersonRecord`] is either *empty* (id 0, no name, no phone), which means
//! "no information yet", or was built by [`PersonRecord::new`] and holds an id
//! of at least 1 and a name of 1 to 30 characters.
//!
//! Full-name checking ([`validate_name_format`]) is opt-in and never applied
//! by the constructors.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::device::MobileDevice;
use crate::error::{check_text_length, Result, ValidationError};

/// Validates a person id.
///
/// # Errors
///
/// Returns [`ValidationError::BelowMinimum`] if `id` is less than
/// [`PersonRecord::MIN_ID`].
pub fn validate_id(id: i64) -> Result<()> {
    if id < PersonRecord::MIN_ID {
        return Err(ValidationError::BelowMinimum {
            field: "id",
            value: id,
            min: PersonRecord::MIN_ID,
        });
    }
    Ok(())
}

/// Validates the length of a person name.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] or [`ValidationError::Length`].
pub fn validate_name(name: &str) -> Result<()> {
    check_text_length("name", name, PersonRecord::MAX_NAME_LENGTH)
}

/// Checks that a name consists of at least two words separated by a space.
///
/// # Errors
///
/// Returns [`ValidationError::Format`] if the name contains no space.
pub fn validate_name_format(name: &str) -> Result<()> {
    if name.contains(' ') {
        Ok(())
    } else {
        Err(ValidationError::Format {
            field: "name",
            value: name.to_string(),
            expected: "Name must consist of at least two words separated by a space.",
        })
    }
}

/// A person, optionally owning one mobile device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPersonRecord")]
pub struct PersonRecord {
    id: i64,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<MobileDevice>,
}

#[derive(Deserialize)]
struct RawPersonRecord {
    id: i64,
    name: String,
    #[serde(default)]
    phone: Option<MobileDevice>,
}

impl TryFrom<RawPersonRecord> for PersonRecord {
    type Error = ValidationError;

    fn try_from(raw: RawPersonRecord) -> Result<Self> {
        if raw.id == 0 && raw.name.is_empty() && raw.phone.is_none() {
            return Ok(Self::empty());
        }
        Self::new(raw.id, raw.name, raw.phone)
    }
}

impl PersonRecord {
    /// Smallest accepted id.
    pub const MIN_ID: i64 = 1;

    /// Maximum name length in characters.
    pub const MAX_NAME_LENGTH: usize = 30;

    /// Creates an empty record with no information yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a record, validating the id and then the name.
    ///
    /// # Errors
    ///
    /// Returns a range error for an id below [`Self::MIN_ID`], otherwise a
    /// length error for an empty or over-long name.
    pub fn new(id: i64, name: impl Into<String>, phone: Option<MobileDevice>) -> Result<Self> {
        let name = name.into();

        if let Err(err) = validate_id(id).and_then(|()| validate_name(&name)) {
            warn!(
                id,
                field = err.field(),
                code = err.error_code(),
                error = %err,
                "Rejected person record"
            );
            return Err(err);
        }

        debug!(id, has_phone = phone.is_some(), "Created person record");
        Ok(Self { id, name, phone })
    }

    /// Returns `true` for a record holding no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id == 0 && self.name.is_empty() && self.phone.is_none()
    }

    /// Returns `true` if the id is valid and the name is a valid full name.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_id(self.id).is_ok()
            && validate_name(&self.name).is_ok()
            && validate_name_format(&self.name).is_ok()
    }

    /// Id, fixed at construction.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name.
    ///
    /// # Errors
    ///
    /// Returns a length error and keeps the previous name if the new one is
    /// empty or longer than [`Self::MAX_NAME_LENGTH`].
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if let Err(err) = validate_name(&name) {
            warn!(id = self.id, error = %err, "Rejected name update");
            return Err(err);
        }
        self.name = name;
        Ok(())
    }

    /// The owned phone, if any.
    #[must_use]
    pub const fn phone(&self) -> Option<&MobileDevice> {
        self.phone.as_ref()
    }

    /// Mutable access to the owned phone, if any.
    pub fn phone_mut(&mut self) -> Option<&mut MobileDevice> {
        self.phone.as_mut()
    }

    /// Replaces the phone, returning the previous one.
    pub fn set_phone(&mut self, phone: Option<MobileDevice>) -> Option<MobileDevice> {
        std::mem::replace(&mut self.phone, phone)
    }

    /// Removes and returns the phone.
    pub fn take_phone(&mut self) -> Option<MobileDevice> {
        self.phone.take()
    }

    /// Returns `true` if a phone is present and satisfies its invariants.
    #[must_use]
    pub fn has_valid_phone(&self) -> bool {
        self.phone.as_ref().is_some_and(MobileDevice::is_valid)
    }
}

/// Two records are equal when at least one of them is valid and both share
/// the same id and name. Phones are not compared.
///
/// This relation is not reflexive for invalid records, so `Eq` is not
/// implemented.
impl PartialEq for PersonRecord {
    fn eq(&self, other: &Self) -> bool {
        (self.is_valid() || other.is_valid()) && self.id == other.id && self.name == other.name
    }
}

impl fmt::Display for PersonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person: {} {}", self.id, self.name)?;
        match &self.phone {
            Some(phone) => write!(f, ", phone: {phone}"),
            None => f.write_str(", phone: none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Color;

    fn phone() -> MobileDevice {
        MobileDevice::new("Samsung", "M-SAM-123", Color::Black, 2019, true).unwrap()
    }

    #[test]
    fn test_new_valid_record() {
        let person = PersonRecord::new(1, "Jane Doe", Some(phone())).unwrap();
        assert_eq!(person.id(), 1);
        assert_eq!(person.name(), "Jane Doe");
        assert_eq!(person.phone().map(MobileDevice::model), Some("M-SAM-123"));
        assert!(person.is_valid());
        assert!(!person.is_empty());
    }

    #[test]
    fn test_new_rejects_id_below_minimum() {
        let err = PersonRecord::new(0, "Jane Doe", Some(phone())).unwrap_err();
        assert!(err.is_range_error());
        assert_eq!(
            err,
            ValidationError::BelowMinimum {
                field: "id",
                value: 0,
                min: 1
            }
        );
        assert!(PersonRecord::new(-5, "Jane Doe", None).is_err());
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let err = PersonRecord::new(1, "", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn test_new_rejects_long_name() {
        let err = PersonRecord::new(1, "x".repeat(31), None).unwrap_err();
        assert!(err.is_length_error());
        assert!(PersonRecord::new(1, "x".repeat(30), None).is_ok());
    }

    #[test]
    fn test_id_checked_before_name() {
        let err = PersonRecord::new(0, "", None).unwrap_err();
        assert_eq!(err.field(), "id");
    }

    #[test]
    fn test_constructor_does_not_require_full_name() {
        let person = PersonRecord::new(7, "Cher", None).unwrap();
        assert_eq!(person.name(), "Cher");
        assert!(!person.is_valid());
    }

    #[test]
    fn test_empty_record() {
        let person = PersonRecord::empty();
        assert!(person.is_empty());
        assert_eq!(person.id(), 0);
        assert_eq!(person.name(), "");
        assert!(person.phone().is_none());
        assert!(!person.is_valid());
    }

    #[test]
    fn test_set_name_rejects_long_name() {
        let mut person = PersonRecord::new(1, "Jane Doe", None).unwrap();
        let err = person.set_name("a".repeat(31)).unwrap_err();
        assert!(err.is_length_error());
        assert_eq!(person.name(), "Jane Doe");

        assert!(person.set_name("").is_err());
        assert_eq!(person.name(), "Jane Doe");
    }

    #[test]
    fn test_set_name_accepts_valid_name() {
        let mut person = PersonRecord::new(1, "Jane Doe", None).unwrap();
        person.set_name("Jane Smith").unwrap();
        assert_eq!(person.name(), "Jane Smith");
    }

    #[test]
    fn test_validate_name_format() {
        assert!(validate_name_format("Jane Doe").is_ok());
        assert!(validate_name_format("Mary Jane Watson").is_ok());
        let err = validate_name_format("Jane").unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_equal_when_one_side_valid() {
        let full = PersonRecord::new(1, "Jane Doe", Some(phone())).unwrap();
        let other = PersonRecord::new(1, "Jane Doe", None).unwrap();
        assert_eq!(full, other);
    }

    #[test]
    fn test_not_equal_with_different_ids() {
        let a = PersonRecord::new(1, "Jane Doe", None).unwrap();
        let b = PersonRecord::new(2, "Jane Doe", None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_not_equal_with_different_names() {
        let a = PersonRecord::new(1, "Jane Doe", None).unwrap();
        let b = PersonRecord::new(1, "Jane Doa", None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_not_equal_when_neither_side_valid() {
        let a = PersonRecord::new(3, "Cher", None).unwrap();
        let b = PersonRecord::new(3, "Cher", None).unwrap();
        assert!(!a.is_valid());
        assert_ne!(a, b);
        assert_ne!(PersonRecord::empty(), PersonRecord::empty());
    }

    #[test]
    fn test_phone_ownership() {
        let mut person = PersonRecord::new(1, "Jane Doe", None).unwrap();
        assert!(!person.has_valid_phone());

        assert!(person.set_phone(Some(phone())).is_none());
        assert!(person.has_valid_phone());

        person.phone_mut().unwrap().set_color(Color::Red);
        assert_eq!(person.phone().unwrap().color(), Color::Red);

        let taken = person.take_phone().unwrap();
        assert_eq!(taken.model(), "M-SAM-123");
        assert!(person.phone().is_none());
    }

    #[test]
    fn test_display() {
        let person = PersonRecord::new(1, "Jane Doe", Some(phone())).unwrap();
        assert_eq!(
            person.to_string(),
            "Person: 1 Jane Doe, phone: Samsung M-SAM-123 (black, 2019, under warranty)"
        );

        let person = PersonRecord::new(2, "John Roe", None).unwrap();
        assert_eq!(person.to_string(), "Person: 2 John Roe, phone: none");
    }

    #[test]
    fn test_empty_record_round_trips() {
        let json = serde_json::to_string(&PersonRecord::empty()).unwrap();
        assert_eq!(json, r#"{"id":0,"name":""}"#);

        let person: PersonRecord = serde_json::from_str(&json).unwrap();
        assert!(person.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_partially_empty_record() {
        let err = serde_json::from_str::<PersonRecord>(r#"{"id":0,"name":"Jane Doe"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("id must be at least 1"));

        let err = serde_json::from_str::<PersonRecord>(r#"{"id":3,"name":""}"#).unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_deserialize_validates() {
        let person: PersonRecord = serde_json::from_str(r#"{"id":4,"name":"Ada Lovelace"}"#).unwrap();
        assert_eq!(person.id(), 4);
        assert!(person.phone().is_none());

        let err = serde_json::from_str::<PersonRecord>(r#"{"id":0,"name":"Ada Lovelace"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("id must be at least 1"));
    }
}
