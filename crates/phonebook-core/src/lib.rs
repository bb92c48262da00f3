//! # phonebook-core
//!
//! Validated person and mobile-device records.
//!
//! This crate provides:
//! - Mobile device records with model-code validation
//! - Person records with id and name validation and an optional owned phone
//! - A TOML roster loader that validates every entry
//!
//! ## Architecture
//!
//! - [`device`] - [`MobileDevice`], [`Color`] and the `M-XXX-NNN` model check
//! - [`person`] - [`PersonRecord`] and its id/name validators
//! - [`roster`] - Loading lists of people from TOML
//! - [`error`] - Validation error taxonomy
//!
//! Records can only be built through fallible constructors, so an instance a
//! caller holds always satisfies its field invariants (the explicit
//! [`PersonRecord::empty`] state aside).
//!
//! ```rust
//! use phonebook_core::{Color, MobileDevice, PersonRecord};
//!
//! let phone = MobileDevice::new("Samsung", "M-SAM-123", Color::Black, 2019, true)?;
//! let person = PersonRecord::new(1, "Jane Doe", Some(phone))?;
//! assert_eq!(person.phone().map(MobileDevice::model), Some("M-SAM-123"));
//!
//! assert!(MobileDevice::new("Samsung", "M-S0M-123", Color::Black, 2019, true).is_err());
//! assert!(PersonRecord::new(0, "Jane Doe", None).is_err());
//! # Ok::<(), phonebook_core::ValidationError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod device;
pub mod error;
pub mod person;
pub mod roster;

// Re-export primary types for convenience
pub use device::{is_valid_model, validate_model, Color, MobileDevice};
pub use error::{Result, ValidationError};
pub use person::{validate_id, validate_name, validate_name_format, PersonRecord};
pub use roster::{EntryError, Roster, RosterError, RosterResult, ValidationSettings};
