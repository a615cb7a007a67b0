use super::CatalogError;
use crate::models::{Field, Plant, PlantForm};

/// Checks that every field is filled in and that the price is a
/// non-negative number. The first failure wins, in form order.
pub fn validate_fields(form: &PlantForm) -> Result<(), CatalogError> {
    if let Some(field) = Field::ALL
        .into_iter()
        .find(|field| form.get(*field).trim().is_empty())
    {
        return Err(CatalogError::MissingField(field));
    }

    parse_price(&form.price)?;
    Ok(())
}

/// Parses a form price. Non-numeric, non-finite, and negative values are
/// rejected.
pub fn parse_price(price: &str) -> Result<f64, CatalogError> {
    match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CatalogError::InvalidPrice(price.to_string())),
    }
}

/// Finds an existing record with the same case-insensitive
/// `(common, botanical)` pair, ignoring the record at `skip`.
pub fn find_duplicate<'a>(
    plants: &'a [Plant],
    form: &PlantForm,
    skip: Option<usize>,
) -> Option<&'a Plant> {
    let key = form.identity_key();
    plants
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .map(|(_, plant)| plant)
        .find(|plant| plant.identity_key() == key)
}

/// Full form validation: fields, price, then the duplicate pair.
pub fn validate(
    plants: &[Plant],
    form: &PlantForm,
    skip: Option<usize>,
) -> Result<(), CatalogError> {
    validate_fields(form)?;

    if let Some(existing) = find_duplicate(plants, form, skip) {
        return Err(CatalogError::DuplicatePlant {
            common: existing.common.clone(),
            botanical: existing.botanical.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str) -> PlantForm {
        PlantForm::new("Rose", "Rosa", "5", "Full Sun", price, "In stock")
    }

    #[test]
    fn test_price_rules() {
        assert!(parse_price("12.50").is_ok());
        assert!(parse_price("0").is_ok());
        assert_eq!(
            parse_price("-5"),
            Err(CatalogError::InvalidPrice("-5".to_string()))
        );
        assert!(parse_price("abc").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
    }

    #[test]
    fn test_validate_fields_reports_first_missing_field() {
        let mut form = form("1.00");
        form.zone.clear();
        form.availability.clear();
        assert_eq!(
            validate_fields(&form),
            Err(CatalogError::MissingField(Field::Zone))
        );
    }

    #[test]
    fn test_validate_fields_checks_price_after_presence() {
        assert_eq!(
            validate_fields(&form("abc")).unwrap_err().field(),
            Some(Field::Price)
        );
        assert!(validate_fields(&form("12.50")).is_ok());
    }

    #[test]
    fn test_missing_field_message_names_field() {
        let err = CatalogError::MissingField(Field::Botanical);
        assert_eq!(err.to_string(), "Please fill in the Botanical Name field.");
    }

    #[test]
    fn test_find_duplicate_is_case_insensitive() {
        let plants = vec![Plant {
            id: 1,
            common: "rose".into(),
            botanical: "rosa".into(),
            ..Plant::default()
        }];
        assert!(find_duplicate(&plants, &form("1"), None).is_some());
        assert!(find_duplicate(&plants, &form("1"), Some(0)).is_none());
    }

    #[test]
    fn test_validate_duplicate_message() {
        let plants = vec![Plant {
            id: 1,
            common: "rose".into(),
            botanical: "rosa".into(),
            ..Plant::default()
        }];
        let err = validate(&plants, &form("1"), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A plant with the name \"rose\" (rosa) already exists in the catalog."
        );
    }
}
