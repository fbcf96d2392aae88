//! Add-tank form component.
//!
//! # Responsibility
//! - Buffer field text as the user types it.
//! - Run UI-level checks (required fields, numeric range) before dispatching
//!   `TankStore::add`.
//!
//! # Invariants
//! - Buffers reset to defaults only after a successful submit.
//! - The form never touches stored tanks; it only calls `add`.

use aquascape_core::{
    CreateTankInput, StoreError, TankId, TankRepository, TankStore, MAX_LIGHTING_HOURS,
};
use std::error::Error;
use std::fmt::{Display, Formatter, Write as _};
use std::str::FromStr;

const DEFAULT_SIZE: &str = "0";
const DEFAULT_LIGHTING_HOURS: &str = "8";

/// Editable fields of the add-tank form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Size,
    FilterType,
    LightingHours,
    HasCo2,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Name,
        Self::Size,
        Self::FilterType,
        Self::LightingHours,
        Self::HasCo2,
    ];

    /// Command-line key, e.g. `size`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::FilterType => "filter",
            Self::LightingHours => "lighting",
            Self::HasCo2 => "co2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Tank Name",
            Self::Size => "Size (liters)",
            Self::FilterType => "Filter Type",
            Self::LightingHours => "Lighting Hours/Day",
            Self::HasCo2 => "Has CO₂ injection",
        }
    }

    fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("e.g. Main Display Tank"),
            Self::Size => Some("e.g. 60"),
            Self::FilterType => Some("e.g. Canister, HOB, Sponge"),
            Self::LightingHours | Self::HasCo2 => None,
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "size" | "size_liters" => Ok(Self::Size),
            "filter" | "filter_type" => Ok(Self::FilterType),
            "lighting" | "lighting_hours" => Ok(Self::LightingHours),
            "co2" | "has_co2" => Ok(Self::HasCo2),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Form input and submit failures.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    UnknownField(String),
    MissingField(FormField),
    NotANumber { field: FormField, value: String },
    OutOfRange { field: FormField, value: f64 },
    InvalidFlag(String),
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(value) => write!(f, "unknown field `{value}`"),
            Self::MissingField(field) => write!(f, "{} is required", field.label()),
            Self::NotANumber { field, value } => {
                write!(f, "{} must be a number, got `{value}`", field.label())
            }
            Self::OutOfRange { field, value } => write!(
                f,
                "{} must be between 0 and {MAX_LIGHTING_HOURS}, got {value}",
                field.label()
            ),
            Self::InvalidFlag(value) => write!(f, "expected on/off, got `{value}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Transient field buffers for the add-tank form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TankForm {
    name: String,
    size: String,
    filter_type: String,
    lighting_hours: String,
    has_co2: bool,
}

impl Default for TankForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: DEFAULT_SIZE.to_string(),
            filter_type: String::new(),
            lighting_hours: DEFAULT_LIGHTING_HOURS.to_string(),
            has_co2: false,
        }
    }
}

impl TankForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes raw text into one field buffer.
    ///
    /// Text fields accept anything; only the CO₂ toggle is parsed eagerly.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Size => self.size = value,
            FormField::FilterType => self.filter_type = value,
            FormField::LightingHours => self.lighting_hours = value,
            FormField::HasCo2 => self.has_co2 = parse_flag(&value)?,
        }
        Ok(())
    }

    pub fn set_co2(&mut self, enabled: bool) {
        self.has_co2 = enabled;
    }

    pub fn toggle_co2(&mut self) {
        self.has_co2 = !self.has_co2;
    }

    /// Current buffer text for `field`.
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Size => self.size.clone(),
            FormField::FilterType => self.filter_type.clone(),
            FormField::LightingHours => self.lighting_hours.clone(),
            FormField::HasCo2 => flag_label(self.has_co2).to_string(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts the buffers into store input, applying UI-level checks.
    pub fn to_input(&self) -> Result<CreateTankInput, FormError> {
        let name = required(FormField::Name, &self.name)?;
        let size_liters = parse_number(FormField::Size, &self.size)?;
        let filter_type = required(FormField::FilterType, &self.filter_type)?;
        let lighting_hours = parse_lighting_hours(&self.lighting_hours)?;

        Ok(CreateTankInput {
            name,
            size_liters,
            filter_type,
            lighting_hours,
            has_co2: self.has_co2,
        })
    }

    /// Dispatches `add` and resets the buffers on success.
    pub fn submit<R: TankRepository>(
        &mut self,
        store: &mut TankStore<R>,
    ) -> Result<TankId, FormError> {
        let input = self.to_input()?;
        let id = store.add(input)?;
        self.reset();
        Ok(id)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("+-- Add New Tank\n");
        for field in FormField::ALL {
            let value = self.value(field);
            let shown = match field.placeholder() {
                Some(placeholder) if value.is_empty() => format!("({placeholder})"),
                _ => value,
            };
            let _ = writeln!(out, "| {:<20} [{shown}]", field.label());
        }
        out.push_str("| <submit> Add Tank\n");
        out
    }
}

/// Parses a numeric field, trimming surrounding whitespace.
pub(crate) fn parse_number(field: FormField, raw: &str) -> Result<f64, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}

pub(crate) fn parse_lighting_hours(raw: &str) -> Result<f64, FormError> {
    let hours = parse_number(FormField::LightingHours, raw)?;
    if !(0.0..=MAX_LIGHTING_HOURS).contains(&hours) {
        return Err(FormError::OutOfRange {
            field: FormField::LightingHours,
            value: hours,
        });
    }
    Ok(hours)
}

pub(crate) fn parse_flag(raw: &str) -> Result<bool, FormError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(FormError::InvalidFlag(other.to_string())),
    }
}

pub(crate) fn required(field: FormField, raw: &str) -> Result<String, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn flag_label(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::{FormError, FormField, TankForm};
    use aquascape_core::{StoreError, TankStore, TankValidationError};

    fn filled() -> TankForm {
        let mut form = TankForm::new();
        form.set_field(FormField::Name, "Main Tank").unwrap();
        form.set_field(FormField::Size, "60").unwrap();
        form.set_field(FormField::FilterType, "Canister").unwrap();
        form
    }

    #[test]
    fn defaults_match_empty_form() {
        let form = TankForm::new();
        assert_eq!(form.value(FormField::Name), "");
        assert_eq!(form.value(FormField::Size), "0");
        assert_eq!(form.value(FormField::LightingHours), "8");
        assert_eq!(form.value(FormField::HasCo2), "off");
    }

    #[test]
    fn submit_adds_tank_and_resets() {
        let mut store = TankStore::new();
        let mut form = filled();
        form.toggle_co2();

        let id = form.submit(&mut store).unwrap();
        let tank = store.get_by_id(id).unwrap();
        assert_eq!(tank.name, "Main Tank");
        assert_eq!(tank.size_liters, 60.0);
        assert_eq!(tank.lighting_hours, 8.0);
        assert!(tank.has_co2);
        assert_eq!(form, TankForm::default());
    }

    #[test]
    fn missing_name_keeps_buffers() {
        let mut store = TankStore::new();
        let mut form = filled();
        form.set_field(FormField::Name, "   ").unwrap();
        let before = form.clone();

        let err = form.submit(&mut store).unwrap_err();
        assert_eq!(err, FormError::MissingField(FormField::Name));
        assert_eq!(form, before);
        assert!(store.is_empty());
    }

    #[test]
    fn lighting_outside_range_is_rejected() {
        let mut form = filled();
        form.set_field(FormField::LightingHours, "25").unwrap();
        assert_eq!(
            form.to_input().unwrap_err(),
            FormError::OutOfRange {
                field: FormField::LightingHours,
                value: 25.0
            }
        );
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        let mut form = filled();
        form.set_field(FormField::Size, "big").unwrap();
        assert_eq!(
            form.to_input().unwrap_err(),
            FormError::NotANumber {
                field: FormField::Size,
                value: "big".to_string()
            }
        );
    }

    #[test]
    fn zero_size_passes_form_but_store_rejects() {
        let mut store = TankStore::new();
        let mut form = filled();
        form.set_field(FormField::Size, "0").unwrap();

        let err = form.submit(&mut store).unwrap_err();
        assert_eq!(
            err,
            FormError::Store(StoreError::Validation(TankValidationError::InvalidSize(
                0.0
            )))
        );
        assert_eq!(form.value(FormField::Name), "Main Tank");
    }

    #[test]
    fn field_keys_parse_with_aliases() {
        assert_eq!("filter_type".parse::<FormField>().unwrap(), FormField::FilterType);
        assert_eq!("CO2".parse::<FormField>().unwrap(), FormField::HasCo2);
        assert!(matches!(
            "color".parse::<FormField>(),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn render_shows_placeholders_for_empty_text() {
        let rendered = TankForm::new().render();
        assert!(rendered.contains("(e.g. Main Display Tank)"));
        assert!(rendered.contains("[8]"));
    }
}
