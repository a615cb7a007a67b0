//! Client-side editing session over a loaded collection.
//!
//! The session owns the in-memory collection, the current selection, the
//! edit form, and the view state. Mutations go through the pure functions in
//! [`crate::catalog`]; each successful one reports whether the collection must
//! now be pushed back to the store.

use crate::catalog::{self, CatalogError};
use crate::models::{Collection, LightChoice, Plant, PlantForm};

use super::notify::Notification;
use super::view::{LightSelect, Table, ZoneSelect};

/// Result of a successful session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notification: Notification,
    /// True when the whole collection must be saved to the store.
    pub persist: bool,
}

impl Outcome {
    fn persisted(notification: Notification) -> Self {
        Self {
            notification,
            persist: true,
        }
    }

    fn local(notification: Notification) -> Self {
        Self {
            notification,
            persist: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    plants: Collection,
    selected: Option<usize>,
    form: PlantForm,
    zones: ZoneSelect,
    lights: LightSelect,
    table: Table,
}

impl Session {
    /// Starts a session over a freshly loaded collection.
    pub fn new(plants: Collection) -> Self {
        let zones = ZoneSelect::populate(&plants);
        let table = Table::render(&plants, None);
        Self {
            plants,
            selected: None,
            form: PlantForm::default(),
            zones,
            lights: LightSelect::default(),
            table,
        }
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn form(&self) -> &PlantForm {
        &self.form
    }

    pub fn zones(&self) -> &ZoneSelect {
        &self.zones
    }

    pub fn lights(&self) -> &LightSelect {
        &self.lights
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Selects the record at `index` and loads it into the form.
    ///
    /// The light value is mapped onto a known option where possible and the
    /// currency symbol is stripped from the price.
    pub fn select(&mut self, index: usize) -> Result<LightChoice, CatalogError> {
        let plant = self
            .plants
            .get(index)
            .ok_or(CatalogError::RowOutOfRange(index))?;

        tracing::debug!("Selected plant data: {:?}", plant);

        let light = self.lights.select(&plant.light);
        self.form = PlantForm {
            common: plant.common.clone(),
            botanical: plant.botanical.clone(),
            zone: plant.zone.clone(),
            light: light.value().to_string(),
            price: plant.price.replacen('$', "", 1),
            availability: plant.availability.clone(),
        };
        self.selected = Some(index);
        self.table.select(self.selected);

        Ok(light)
    }

    /// Resets the form and drops the selection.
    pub fn clear_form(&mut self) -> Notification {
        self.form = PlantForm::default();
        self.selected = None;
        self.table.select(None);
        Notification::info("Form cleared")
    }

    /// Adds `form` as a new record.
    pub fn add(&mut self, form: &PlantForm) -> Result<Outcome, CatalogError> {
        self.plants = catalog::add(self.plants.clone(), form)?;
        self.zones.insert(&form.zone);
        self.refresh();
        Ok(Outcome::persisted(Notification::success(
            "Plant added successfully!",
        )))
    }

    /// Merges `form` into the selected record.
    pub fn update(&mut self, form: &PlantForm) -> Result<Outcome, CatalogError> {
        let index = self.selected.ok_or(CatalogError::NoSelection("update"))?;
        self.plants = catalog::update(self.plants.clone(), index, form)?;
        self.refresh();
        Ok(Outcome::persisted(Notification::success(
            "Plant updated successfully!",
        )))
    }

    /// Deletes the selected record once `confirm` agrees.
    ///
    /// A declined confirmation leaves everything, including the selection,
    /// as it was.
    pub fn delete<F>(&mut self, confirm: F) -> Result<Outcome, CatalogError>
    where
        F: FnOnce(&Plant) -> bool,
    {
        let index = self.selected.ok_or(CatalogError::NoSelection("delete"))?;
        let plant = self
            .plants
            .get(index)
            .ok_or(CatalogError::RowOutOfRange(index))?;

        if !confirm(plant) {
            return Ok(Outcome::local(Notification::info("Deletion cancelled.")));
        }

        let (plants, _removed) = catalog::delete(self.plants.clone(), index)?;
        self.plants = plants;
        self.refresh();
        Ok(Outcome::persisted(Notification::success(
            "Plant deleted successfully!",
        )))
    }

    /// Drops later records that repeat an earlier `(common, botanical)` pair.
    pub fn deduplicate(&mut self) -> Outcome {
        let (plants, removed) = catalog::deduplicate(self.plants.clone());
        if removed == 0 {
            return Outcome::local(Notification::info("No duplicates found in the catalog"));
        }

        self.plants = plants;
        self.refresh();
        Outcome::persisted(Notification::success(format!(
            "Catalog cleaned! Removed {} duplicate{}",
            removed,
            if removed > 1 { "s" } else { "" }
        )))
    }

    /// Hides table rows that do not contain `term`.
    pub fn filter(&mut self, term: &str) {
        self.table.filter(term);
    }

    fn refresh(&mut self) {
        self.table = Table::render(&self.plants, None);
        self.clear_form();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LightOption;

    fn plant(id: u64, common: &str, botanical: &str) -> Plant {
        Plant {
            id,
            common: common.into(),
            botanical: botanical.into(),
            zone: "4".into(),
            light: "Mostly Shady".into(),
            price: "$2.44".into(),
            availability: "031599".into(),
        }
    }

    fn form(common: &str, botanical: &str) -> PlantForm {
        PlantForm::new(common, botanical, "6", "Full Sun", "12.50", "In stock")
    }

    #[test]
    fn test_new_populates_view() {
        let session = Session::new(vec![plant(1, "Rose", "Rosa")]);
        assert_eq!(session.table().rows().len(), 1);
        assert_eq!(session.zones().options(), &["4".to_string()]);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_select_loads_form_with_normalized_fields() {
        let mut session = Session::new(vec![plant(1, "Bloodroot", "Sanguinaria")]);
        let light = session.select(0).unwrap();

        assert_eq!(light, LightChoice::Known(LightOption::PartialShade));
        assert_eq!(session.selected(), Some(0));
        assert_eq!(session.form().light, "Partial Shade");
        assert_eq!(session.form().price, "2.44");
        assert_eq!(session.form().common, "Bloodroot");
        assert!(session.table().rows()[0].selected);
    }

    #[test]
    fn test_select_unknown_light_injects_custom_option() {
        let mut p = plant(1, "Moonflower", "Ipomoea alba");
        p.light = "Moonlight".into();
        let mut session = Session::new(vec![p]);

        let light = session.select(0).unwrap();
        assert_eq!(light.custom_label().as_deref(), Some("Moonlight (from data)"));
        assert_eq!(session.form().light, "Moonlight");
        assert!(session
            .lights()
            .labels()
            .contains(&"Moonlight (from data)".to_string()));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut session = Session::new(Vec::new());
        assert_eq!(session.select(0), Err(CatalogError::RowOutOfRange(0)));
    }

    #[test]
    fn test_add_persists_and_clears_form() {
        let mut session = Session::new(Vec::new());
        let outcome = session.add(&form("Rose", "Rosa")).unwrap();

        assert!(outcome.persist);
        assert_eq!(outcome.notification, Notification::success("Plant added successfully!"));
        assert_eq!(session.plants()[0].id, 1);
        assert_eq!(session.table().rows().len(), 1);
        assert_eq!(session.form(), &PlantForm::default());
        assert_eq!(session.zones().options(), &["6".to_string()]);
    }

    #[test]
    fn test_add_duplicate_keeps_state() {
        let mut session = Session::new(vec![plant(1, "rose", "rosa")]);
        let err = session.add(&form("Rose", "Rosa")).unwrap_err();

        assert!(matches!(err, CatalogError::DuplicatePlant { .. }));
        assert!(Notification::from(&err).is_error());
        assert_eq!(session.plants().len(), 1);
    }

    #[test]
    fn test_update_requires_selection() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa")]);
        let err = session.update(&form("Rose", "Rosa")).unwrap_err();
        assert_eq!(err.to_string(), "Please select a plant to update.");
    }

    #[test]
    fn test_update_selected_record() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa"), plant(2, "Tulip", "Tulipa")]);
        session.select(1).unwrap();

        let mut edited = session.form().clone();
        edited.zone = "7".into();
        let outcome = session.update(&edited).unwrap();

        assert!(outcome.persist);
        assert_eq!(session.plants()[1].id, 2);
        assert_eq!(session.plants()[1].zone, "7");
        // select normalized these before the merge
        assert_eq!(session.plants()[1].light, "Partial Shade");
        assert_eq!(session.plants()[1].price, "2.44");
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_update_invalid_price_keeps_selection() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa")]);
        session.select(0).unwrap();

        let mut edited = session.form().clone();
        edited.price = "abc".into();
        assert!(matches!(
            session.update(&edited),
            Err(CatalogError::InvalidPrice(_))
        ));
        assert_eq!(session.selected(), Some(0));
        assert_eq!(session.plants()[0].price, "$2.44");
    }

    #[test]
    fn test_delete_requires_selection() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa")]);
        let err = session.delete(|_| true).unwrap_err();
        assert_eq!(err, CatalogError::NoSelection("delete"));
    }

    #[test]
    fn test_delete_declined_changes_nothing() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa")]);
        session.select(0).unwrap();

        let outcome = session.delete(|_| false).unwrap();
        assert!(!outcome.persist);
        assert_eq!(session.plants().len(), 1);
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_delete_confirmed() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa"), plant(2, "Tulip", "Tulipa")]);
        session.select(0).unwrap();

        let mut asked = String::new();
        let outcome = session
            .delete(|p| {
                asked = p.common.clone();
                true
            })
            .unwrap();

        assert_eq!(asked, "Rose");
        assert!(outcome.persist);
        assert_eq!(session.plants().len(), 1);
        assert_eq!(session.plants()[0].common, "Tulip");
        assert_eq!(session.table().rows().len(), 1);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_deduplicate_persists_only_when_removed() {
        let mut session = Session::new(vec![
            plant(1, "Rose", "Rosa"),
            plant(2, "Tulip", "Tulipa"),
            plant(3, "rose", "rosa"),
        ]);

        let outcome = session.deduplicate();
        assert!(outcome.persist);
        assert_eq!(outcome.notification.message, "Catalog cleaned! Removed 1 duplicate");
        assert_eq!(session.plants().len(), 2);
        assert_eq!(session.plants()[1].id, 2);

        let before = session.plants().to_vec();
        let outcome = session.deduplicate();
        assert!(!outcome.persist);
        assert_eq!(outcome.notification.message, "No duplicates found in the catalog");
        assert_eq!(session.plants(), before.as_slice());
    }

    #[test]
    fn test_filter_does_not_touch_collection() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa"), plant(2, "Tulip", "Tulipa")]);
        session.filter("tulip");
        assert_eq!(session.table().visible_rows().count(), 1);
        assert_eq!(session.plants().len(), 2);
    }

    #[test]
    fn test_clear_form() {
        let mut session = Session::new(vec![plant(1, "Rose", "Rosa")]);
        session.select(0).unwrap();
        let note = session.clear_form();
        assert_eq!(note.message, "Form cleared");
        assert_eq!(session.selected(), None);
        assert!(!session.table().rows()[0].selected);
    }
}
