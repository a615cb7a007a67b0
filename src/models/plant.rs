use serde::{Deserialize, Serialize};
use std::fmt;

/// The ordered set of plant records exchanged with the store.
pub type Collection = Vec<Plant>;

/// One plant's catalog entry.
///
/// Every field except `id` is free text. Missing fields deserialize to empty
/// values so documents written by older tools still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plant {
    pub id: u64,
    pub common: String,
    pub botanical: String,
    pub zone: String,
    pub light: String,
    pub price: String,
    pub availability: String,
}

impl Plant {
    pub fn from_form(id: u64, form: &PlantForm) -> Self {
        Self {
            id,
            common: form.common.clone(),
            botanical: form.botanical.clone(),
            zone: form.zone.clone(),
            light: form.light.clone(),
            price: form.price.clone(),
            availability: form.availability.clone(),
        }
    }

    /// Overwrites the editable fields with the form's values, keeping `id`.
    pub fn merge_form(&mut self, form: &PlantForm) {
        self.common = form.common.clone();
        self.botanical = form.botanical.clone();
        self.zone = form.zone.clone();
        self.light = form.light.clone();
        self.price = form.price.clone();
        self.availability = form.availability.clone();
    }

    /// Case-insensitive `(common, botanical)` pair used for duplicate detection.
    pub fn identity_key(&self) -> (String, String) {
        identity_key(&self.common, &self.botanical)
    }

    /// Cell text in table column order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.common,
            &self.botanical,
            &self.zone,
            &self.light,
            &self.price,
            &self.availability,
        ]
    }
}

pub(crate) fn identity_key(common: &str, botanical: &str) -> (String, String) {
    (
        common.trim().to_lowercase(),
        botanical.trim().to_lowercase(),
    )
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.common)?;
        writeln!(f, "{}", "=".repeat(self.common.chars().count()))?;
        writeln!(f, "Botanical: {}", self.botanical)?;
        writeln!(f, "Zone: {}", self.zone)?;
        writeln!(f, "Light: {}", self.light)?;
        writeln!(f, "Price: {}", self.price)?;
        write!(f, "Availability: {}", self.availability)
    }
}

/// Editable fields of a plant record, as entered in the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantForm {
    pub common: String,
    pub botanical: String,
    pub zone: String,
    pub light: String,
    pub price: String,
    pub availability: String,
}

impl PlantForm {
    /// Builds a form from raw input, trimming every field.
    pub fn new(
        common: &str,
        botanical: &str,
        zone: &str,
        light: &str,
        price: &str,
        availability: &str,
    ) -> Self {
        Self {
            common: common.trim().to_string(),
            botanical: botanical.trim().to_string(),
            zone: zone.trim().to_string(),
            light: light.trim().to_string(),
            price: price.trim().to_string(),
            availability: availability.trim().to_string(),
        }
    }

    /// Returns the value of a single form field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Common => &self.common,
            Field::Botanical => &self.botanical,
            Field::Zone => &self.zone,
            Field::Light => &self.light,
            Field::Price => &self.price,
            Field::Availability => &self.availability,
        }
    }

    /// Sets a single form field, trimming the value.
    pub fn set(&mut self, field: Field, value: &str) {
        let value = value.trim().to_string();
        match field {
            Field::Common => self.common = value,
            Field::Botanical => self.botanical = value,
            Field::Zone => self.zone = value,
            Field::Light => self.light = value,
            Field::Price => self.price = value,
            Field::Availability => self.availability = value,
        }
    }

    pub fn identity_key(&self) -> (String, String) {
        identity_key(&self.common, &self.botanical)
    }
}

/// The editable fields of the form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Common,
    Botanical,
    Zone,
    Light,
    Price,
    Availability,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Common,
        Field::Botanical,
        Field::Zone,
        Field::Light,
        Field::Price,
        Field::Availability,
    ];

    /// Human-readable field label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Common => "Common Name",
            Field::Botanical => "Botanical Name",
            Field::Zone => "Zone",
            Field::Light => "Light Requirements",
            Field::Price => "Price",
            Field::Availability => "Availability",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
