//! Tank domain model.
//!
//! # Responsibility
//! - Define the canonical tank record and the caller-supplied input shapes.
//! - Own field-level validation shared by the store and deserialization.
//!
//! # Invariants
//! - `id` is stable and never reused for another tank.
//! - `created_at_ms` is assigned once at creation and never changes.
//! - `size_liters > 0` and `0 <= lighting_hours <= 24`; both finite.
//! - `name` and `filter_type` are non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every tank.
pub type TankId = Uuid;

/// Upper bound for daily lighting hours.
pub const MAX_LIGHTING_HOURS: f64 = 24.0;

/// Field validation failures for tank data.
#[derive(Debug, Clone, PartialEq)]
pub enum TankValidationError {
    EmptyName,
    EmptyFilterType,
    /// Size must be a finite number of liters greater than zero.
    InvalidSize(f64),
    /// Lighting must be finite and within `0..=24`.
    InvalidLightingHours(f64),
}

impl Display for TankValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "tank name cannot be empty"),
            Self::EmptyFilterType => write!(f, "filter type cannot be empty"),
            Self::InvalidSize(value) => {
                write!(f, "size_liters ({value}) must be a positive number")
            }
            Self::InvalidLightingHours(value) => write!(
                f,
                "lighting_hours ({value}) must be between 0 and {MAX_LIGHTING_HOURS}"
            ),
        }
    }
}

impl Error for TankValidationError {}

/// Caller-supplied fields for creating a tank.
///
/// Identifier and creation timestamp are synthesized by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTankInput {
    pub name: String,
    /// Volume in liters.
    pub size_liters: f64,
    pub filter_type: String,
    /// Hours of light per day.
    pub lighting_hours: f64,
    pub has_co2: bool,
}

impl CreateTankInput {
    /// Checks the same field invariants a stored [`Tank`] must satisfy.
    pub fn validate(&self) -> Result<(), TankValidationError> {
        validate_fields(
            &self.name,
            self.size_liters,
            &self.filter_type,
            self.lighting_hours,
        )
    }
}

/// Partial update payload. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TankUpdate {
    pub name: Option<String>,
    pub size_liters: Option<f64>,
    pub filter_type: Option<String>,
    pub lighting_hours: Option<f64>,
    pub has_co2: Option<bool>,
}

impl TankUpdate {
    /// Returns whether the payload carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.size_liters.is_none()
            && self.filter_type.is_none()
            && self.lighting_hours.is_none()
            && self.has_co2.is_none()
    }
}

/// Canonical tank record owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TankRecord")]
pub struct Tank {
    pub id: TankId,
    pub name: String,
    pub size_liters: f64,
    pub filter_type: String,
    pub lighting_hours: f64,
    pub has_co2: bool,
    /// Unix epoch milliseconds, serialized as `created_at`.
    #[serde(rename = "created_at")]
    pub created_at_ms: i64,
}

impl Tank {
    pub(crate) fn from_input(id: TankId, created_at_ms: i64, input: CreateTankInput) -> Self {
        Self {
            id,
            name: input.name,
            size_liters: input.size_liters,
            filter_type: input.filter_type,
            lighting_hours: input.lighting_hours,
            has_co2: input.has_co2,
            created_at_ms,
        }
    }

    /// Returns the caller-editable fields of this tank.
    pub fn to_input(&self) -> CreateTankInput {
        CreateTankInput {
            name: self.name.clone(),
            size_liters: self.size_liters,
            filter_type: self.filter_type.clone(),
            lighting_hours: self.lighting_hours,
            has_co2: self.has_co2,
        }
    }

    /// Returns a copy with `update` shallow-merged in.
    ///
    /// `id` and `created_at_ms` are carried over untouched.
    pub fn merged(&self, update: &TankUpdate) -> Self {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(size) = update.size_liters {
            next.size_liters = size;
        }
        if let Some(filter_type) = &update.filter_type {
            next.filter_type = filter_type.clone();
        }
        if let Some(hours) = update.lighting_hours {
            next.lighting_hours = hours;
        }
        if let Some(has_co2) = update.has_co2 {
            next.has_co2 = has_co2;
        }
        next
    }

    pub fn validate(&self) -> Result<(), TankValidationError> {
        validate_fields(
            &self.name,
            self.size_liters,
            &self.filter_type,
            self.lighting_hours,
        )
    }
}

#[derive(Deserialize)]
struct TankRecord {
    id: TankId,
    name: String,
    size_liters: f64,
    filter_type: String,
    lighting_hours: f64,
    has_co2: bool,
    created_at: i64,
}

impl TryFrom<TankRecord> for Tank {
    type Error = TankValidationError;

    fn try_from(record: TankRecord) -> Result<Self, Self::Error> {
        let tank = Self {
            id: record.id,
            name: record.name,
            size_liters: record.size_liters,
            filter_type: record.filter_type,
            lighting_hours: record.lighting_hours,
            has_co2: record.has_co2,
            created_at_ms: record.created_at,
        };
        tank.validate()?;
        Ok(tank)
    }
}

fn validate_fields(
    name: &str,
    size_liters: f64,
    filter_type: &str,
    lighting_hours: f64,
) -> Result<(), TankValidationError> {
    if name.trim().is_empty() {
        return Err(TankValidationError::EmptyName);
    }
    if filter_type.trim().is_empty() {
        return Err(TankValidationError::EmptyFilterType);
    }
    if !size_liters.is_finite() || size_liters <= 0.0 {
        return Err(TankValidationError::InvalidSize(size_liters));
    }
    if !lighting_hours.is_finite() || !(0.0..=MAX_LIGHTING_HOURS).contains(&lighting_hours) {
        return Err(TankValidationError::InvalidLightingHours(lighting_hours));
    }
    Ok(())
}
