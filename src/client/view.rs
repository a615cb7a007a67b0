//! View-layer state: the rendered table and the form's select options.
//!
//! Nothing here touches the collection itself.

use std::fmt;

use crate::catalog::distinct_zones;
use crate::models::{LightChoice, LightOption, Plant};

/// Label of the zone selector's "none chosen" entry.
pub const ZONE_PLACEHOLDER: &str = "Choose zone...";

/// Column headers, in cell order.
pub const COLUMNS: [&str; 6] = [
    "COMMON",
    "BOTANICAL",
    "ZONE",
    "LIGHT",
    "PRICE",
    "AVAILABILITY",
];

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position of the record in the collection
    pub index: usize,
    pub cells: [String; 6],
    pub visible: bool,
    pub selected: bool,
}

impl Row {
    fn matches(&self, needle: &str) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.to_lowercase().contains(needle))
    }
}

/// The plant table, one row per record in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn render(plants: &[Plant], selected: Option<usize>) -> Self {
        let rows = plants
            .iter()
            .enumerate()
            .map(|(index, plant)| Row {
                index,
                cells: plant.cells().map(str::to_string),
                visible: true,
                selected: Some(index) == selected,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.visible)
    }

    /// Marks the row at `index` as selected and clears any other selection.
    pub fn select(&mut self, index: Option<usize>) {
        for row in &mut self.rows {
            row.selected = Some(row.index) == index;
        }
    }

    /// Shows rows with any cell containing `term` (case-insensitive).
    /// A blank term shows every row.
    pub fn filter(&mut self, term: &str) {
        if term.trim().is_empty() {
            for row in &mut self.rows {
                row.visible = true;
            }
            return;
        }

        let needle = term.to_lowercase();
        for row in &mut self.rows {
            row.visible = row.matches(&needle);
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {:>4}  {:<24}  {:<28}  {:<6}  {:<14}  {:<8}  {}",
            "#", COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5]
        )?;
        writeln!(f, "{}", "-".repeat(110))?;
        for row in self.visible_rows() {
            let marker = if row.selected { '*' } else { ' ' };
            writeln!(
                f,
                "{} {:>4}  {:<24}  {:<28}  {:<6}  {:<14}  {:<8}  {}",
                marker,
                row.index + 1,
                truncate(&row.cells[0], 24),
                truncate(&row.cells[1], 28),
                truncate(&row.cells[2], 6),
                truncate(&row.cells[3], 14),
                truncate(&row.cells[4], 8),
                row.cells[5]
            )?;
        }
        Ok(())
    }
}

/// Zone selector options: the placeholder plus known zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSelect {
    options: Vec<String>,
}

impl ZoneSelect {
    /// Distinct zones present in the collection, sorted.
    pub fn populate(plants: &[Plant]) -> Self {
        let select = Self {
            options: distinct_zones(plants),
        };
        tracing::debug!(
            "Zone options populated with {} unique value(s)",
            select.options.len()
        );
        select
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Checks whether `zone` is already offered (trimmed, case-insensitive).
    ///
    /// Advisory only: it never blocks adding or updating a plant.
    pub fn is_duplicate_zone(&self, zone: &str) -> bool {
        let wanted = zone.trim().to_lowercase();
        !wanted.is_empty()
            && self
                .options
                .iter()
                .any(|option| !option.is_empty() && option.trim().to_lowercase() == wanted)
    }

    /// Appends `zone` unless it is blank or already offered.
    pub fn insert(&mut self, zone: &str) -> bool {
        let zone = zone.trim();
        if zone.is_empty() || self.is_duplicate_zone(zone) {
            return false;
        }
        self.options.push(zone.to_string());
        tracing::debug!("Added new zone option: {}", zone);
        true
    }
}

impl fmt::Display for ZoneSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", ZONE_PLACEHOLDER)?;
        for zone in &self.options {
            writeln!(f, "  {}", zone)?;
        }
        Ok(())
    }
}

/// Light selector: the fixed options plus temporary ones injected for
/// values no option or synonym covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightSelect {
    custom: Vec<String>,
}

impl LightSelect {
    /// Resolves `value` and injects a custom option when nothing matches.
    pub fn select(&mut self, value: &str) -> LightChoice {
        let choice = LightChoice::resolve(value);
        if let LightChoice::Custom(custom) = &choice {
            if !self.custom.contains(custom) {
                tracing::debug!("Added custom light option: {}", custom);
                self.custom.push(custom.clone());
            }
        }
        choice
    }

    /// Option labels in display order.
    pub fn labels(&self) -> Vec<String> {
        LightOption::ALL
            .iter()
            .map(|option| option.label().to_string())
            .chain(self.custom.iter().map(|c| format!("{} (from data)", c)))
            .collect()
    }
}
