//! Passengers and passenger-form validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Youngest age accepted on the passenger form.
pub const MIN_AGE: u8 = 1;

/// Ages must be strictly below this value.
pub const AGE_LIMIT: u8 = 120;

/// Passenger gender, as captured on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a form value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Sleeping position within a coach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Berth {
    #[serde(rename = "lower")]
    Lower,
    #[serde(rename = "middle")]
    Middle,
    #[serde(rename = "upper")]
    Upper,
    #[serde(rename = "side lower")]
    SideLower,
    #[serde(rename = "side upper")]
    SideUpper,
}

/// A validated passenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub berth: Option<Berth>,
}

impl Passenger {
    /// Create a passenger without a seat assignment.
    pub fn new(name: impl Into<String>, age: u8, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            seat_number: None,
            berth: None,
        }
    }

    /// Attach a seat assignment.
    pub fn with_seat(mut self, seat_number: impl Into<String>, berth: Berth) -> Self {
        self.seat_number = Some(seat_number.into());
        self.berth = Some(berth);
        self
    }
}

/// One passenger's raw form input.
///
/// Every field arrives as text, the way the form submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default = "default_gender")]
    pub gender: String,
}

/// The form preselects "male" for every passenger.
fn default_gender() -> String {
    "male".to_string()
}

impl Default for PassengerDraft {
    /// A blank entry with gender preselected.
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: default_gender(),
        }
    }
}

/// Which input on the passenger form failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Age,
    Gender,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Age => f.write_str("age"),
            Field::Gender => f.write_str("gender"),
        }
    }
}

/// A single inline error on the passenger form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("passenger {index} {field}: {message}")]
pub struct FieldError {
    /// Zero-based passenger position on the form
    pub index: usize,
    pub field: Field,
    pub message: &'static str,
}

impl PassengerDraft {
    pub fn new(name: impl Into<String>, age: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            gender: gender.into(),
        }
    }

    /// Validate this draft as the passenger at position `index`.
    ///
    /// All failing fields are reported, not just the first.
    pub fn validate(&self, index: usize) -> Result<Passenger, Vec<FieldError>> {
        let mut errors = Vec::new();
        let error = |field, message| FieldError {
            index,
            field,
            message,
        };

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(error(Field::Name, "Name is required"));
        }

        let age = match self.age.trim() {
            "" => {
                errors.push(error(Field::Age, "Age is required"));
                None
            }
            raw => match raw.parse::<u8>() {
                Ok(age) if (MIN_AGE..AGE_LIMIT).contains(&age) => Some(age),
                _ => {
                    errors.push(error(Field::Age, "Age must be between 1 and 120"));
                    None
                }
            },
        };

        let gender = Gender::parse(&self.gender);
        if gender.is_none() {
            errors.push(error(Field::Gender, "Gender must be male, female or other"));
        }

        match (age, gender) {
            (Some(age), Some(gender)) if errors.is_empty() => Ok(Passenger::new(name, age, gender)),
            _ => Err(errors),
        }
    }
}

/// Validate every passenger on the form, in order.
///
/// Returns the passengers if all are valid, otherwise every field error
/// across all passengers.
pub fn validate_passengers(drafts: &[PassengerDraft]) -> Result<Vec<Passenger>, Vec<FieldError>> {
    let mut passengers = Vec::with_capacity(drafts.len());
    let mut errors = Vec::new();

    for (index, draft) in drafts.iter().enumerate() {
        match draft.validate(index) {
            Ok(passenger) => passengers.push(passenger),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    if errors.is_empty() {
        Ok(passengers)
    } else {
        Err(errors)
    }
}
