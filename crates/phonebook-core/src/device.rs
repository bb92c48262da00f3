//! Mobile device records.
//!
//! A [`MobileDevice`] can only be obtained through a validating constructor,
//! so every instance a caller holds satisfies the field invariants:
//!
//! - manufacturer name is non-empty and at most 30 characters
//! - model is at most 20 characters and starts with a code of the form
//!   `M-XXX-NNN` (uppercase letters, then digits)
//! - year is not later than 2020

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{check_text_length, Result, ValidationError};

/// Model code prefix: `M`, dash, three uppercase letters, dash, three digits.
static MODEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^M-[A-Z]{3}-[0-9]{3}").expect("Invalid model regex"));

const MODEL_FORMAT_HINT: &str =
    "Expected 'M-XXX-NNN' where X is an uppercase letter and N is a digit (e.g., 'M-SAM-123').";

/// Validates a model code.
///
/// Characters 0, 1 and 5 must be `M`, `-` and `-`; characters 2 to 4 must be
/// ASCII uppercase letters and characters 6 to 8 ASCII digits. Anything
/// shorter than nine characters is rejected. Characters after the code are
/// not checked here; see [`MobileDevice::MAX_MODEL_LENGTH`].
///
/// # Errors
///
/// Returns [`ValidationError::Format`] if the code does not match.
pub fn validate_model(model: &str) -> Result<()> {
    if MODEL_REGEX.is_match(model) {
        Ok(())
    } else {
        Err(ValidationError::Format {
            field: "model",
            value: model.to_string(),
            expected: MODEL_FORMAT_HINT,
        })
    }
}

/// Returns `true` if `model` starts with a well-formed `M-XXX-NNN` code.
#[must_use]
pub fn is_valid_model(model: &str) -> bool {
    validate_model(model).is_ok()
}

/// Device color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Black.
    Black,
    /// White.
    White,
    /// Silver.
    Silver,
    /// Gold.
    Gold,
    /// Blue.
    Blue,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Purple.
    Purple,
}

impl Color {
    /// All colors, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::White,
        Self::Silver,
        Self::Gold,
        Self::Blue,
        Self::Red,
        Self::Green,
        Self::Purple,
    ];

    /// Lowercase name of the color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::Format {
                field: "color",
                value: s.to_string(),
                expected: "Expected one of: black, white, silver, gold, blue, red, green, purple.",
            })
    }
}

/// A mobile phone owned by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMobileDevice")]
pub struct MobileDevice {
    manufacturer_name: String,
    model: String,
    color: Color,
    year: i32,
    under_warranty: bool,
}

/// Unvalidated device fields as they appear in serialized input.
#[derive(Deserialize)]
struct RawMobileDevice {
    manufacturer_name: String,
    model: String,
    color: Color,
    year: i32,
    under_warranty: bool,
}

impl TryFrom<RawMobileDevice> for MobileDevice {
    type Error = ValidationError;

    fn try_from(raw: RawMobileDevice) -> Result<Self> {
        Self::new(
            raw.manufacturer_name,
            raw.model,
            raw.color,
            raw.year,
            raw.under_warranty,
        )
    }
}

impl MobileDevice {
    /// Maximum manufacturer name length in characters.
    pub const MAX_MANUFACTURER_NAME_LENGTH: usize = 30;

    /// Maximum model length in characters.
    pub const MAX_MODEL_LENGTH: usize = 20;

    /// Latest accepted manufacturing year.
    pub const MAX_YEAR: i32 = 2020;

    /// Creates a device, validating every field.
    ///
    /// The model format is checked first, then the remaining invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered. No device is
    /// produced on failure.
    pub fn new(
        manufacturer_name: impl Into<String>,
        model: impl Into<String>,
        color: Color,
        year: i32,
        under_warranty: bool,
    ) -> Result<Self> {
        let manufacturer_name = manufacturer_name.into();
        let model = model.into();

        let checks = Self::check_model(&model)
            .and_then(|()| Self::check_manufacturer_name(&manufacturer_name))
            .and_then(|()| Self::check_year(year));
        if let Err(err) = checks {
            warn!(
                field = err.field(),
                code = err.error_code(),
                error = %err,
                "Rejected mobile device"
            );
            return Err(err);
        }

        debug!(%model, %manufacturer_name, "Created mobile device");
        Ok(Self {
            manufacturer_name,
            model,
            color,
            year,
            under_warranty,
        })
    }

    /// Validates a complete model code: the `M-XXX-NNN` format and the
    /// [`Self::MAX_MODEL_LENGTH`] limit.
    ///
    /// # Errors
    ///
    /// Returns a format error, or a length error for an over-long code.
    pub fn validate_model_code(model: &str) -> Result<()> {
        Self::check_model(model)
    }

    /// Returns `true` if every field invariant holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Self::check_model(&self.model).is_ok()
            && Self::check_manufacturer_name(&self.manufacturer_name).is_ok()
            && Self::check_year(self.year).is_ok()
    }

    /// Manufacturer name.
    #[must_use]
    pub fn manufacturer_name(&self) -> &str {
        &self.manufacturer_name
    }

    /// Replaces the manufacturer name.
    ///
    /// # Errors
    ///
    /// Returns a length error and keeps the previous name if the new one is
    /// empty or too long.
    pub fn set_manufacturer_name(&mut self, manufacturer_name: impl Into<String>) -> Result<()> {
        let manufacturer_name = manufacturer_name.into();
        Self::check_manufacturer_name(&manufacturer_name).map_err(rejected_update)?;
        self.manufacturer_name = manufacturer_name;
        Ok(())
    }

    /// Model code.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Replaces the model code.
    ///
    /// # Errors
    ///
    /// Returns a format or length error and keeps the previous model.
    pub fn set_model(&mut self, model: impl Into<String>) -> Result<()> {
        let model = model.into();
        Self::check_model(&model).map_err(rejected_update)?;
        self.model = model;
        Ok(())
    }

    /// Color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Replaces the color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Manufacturing year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Replaces the manufacturing year.
    ///
    /// # Errors
    ///
    /// Returns a range error and keeps the previous year if `year` is later
    /// than [`Self::MAX_YEAR`].
    pub fn set_year(&mut self, year: i32) -> Result<()> {
        Self::check_year(year).map_err(rejected_update)?;
        self.year = year;
        Ok(())
    }

    /// Whether the device is under warranty.
    #[must_use]
    pub const fn is_under_warranty(&self) -> bool {
        self.under_warranty
    }

    /// Sets the warranty flag.
    pub fn set_under_warranty(&mut self, under_warranty: bool) {
        self.under_warranty = under_warranty;
    }

    fn check_model(model: &str) -> Result<()> {
        validate_model(model)?;
        check_text_length("model", model, Self::MAX_MODEL_LENGTH)
    }

    fn check_manufacturer_name(manufacturer_name: &str) -> Result<()> {
        check_text_length(
            "manufacturer_name",
            manufacturer_name,
            Self::MAX_MANUFACTURER_NAME_LENGTH,
        )
    }

    fn check_year(year: i32) -> Result<()> {
        if year > Self::MAX_YEAR {
            return Err(ValidationError::AboveMaximum {
                field: "year",
                value: i64::from(year),
                max: i64::from(Self::MAX_YEAR),
            });
        }
        Ok(())
    }
}

fn rejected_update(err: ValidationError) -> ValidationError {
    warn!(field = err.field(), error = %err, "Rejected mobile device update");
    err
}

impl fmt::Display for MobileDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {}, {})",
            self.manufacturer_name,
            self.model,
            self.color,
            self.year,
            if self.under_warranty {
                "under warranty"
            } else {
                "out of warranty"
            }
        )
    }
}
