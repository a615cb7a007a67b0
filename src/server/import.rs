//! One-time import of the legacy XML plant catalog.
//!
//! ```text
//! <CATALOG>
//!   <PLANT>
//!     <COMMON>Bloodroot</COMMON>
//!     <BOTANICAL>Sanguinaria canadensis</BOTANICAL>
//!     <ZONE>4</ZONE>
//!     <LIGHT>Mostly Shady</LIGHT>
//!     <PRICE>$2.44</PRICE>
//!     <AVAILABILITY>031599</AVAILABILITY>
//!   </PLANT>
//! </CATALOG>
//! ```

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Collection, Plant};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import source not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read import source {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to parse import source {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] quick_xml::DeError),
}

#[derive(Debug, Deserialize)]
struct XmlCatalog {
    #[serde(rename = "PLANT", default)]
    plants: Vec<XmlPlant>,
}

// Children are lists so a repeated element does not fail the whole document;
// the first occurrence wins.
#[derive(Debug, Deserialize)]
struct XmlPlant {
    #[serde(rename = "COMMON", default)]
    common: Vec<String>,
    #[serde(rename = "BOTANICAL", default)]
    botanical: Vec<String>,
    #[serde(rename = "ZONE", default)]
    zone: Vec<String>,
    #[serde(rename = "LIGHT", default)]
    light: Vec<String>,
    #[serde(rename = "PRICE", default)]
    price: Vec<String>,
    #[serde(rename = "AVAILABILITY", default)]
    availability: Vec<String>,
}

fn first(values: Vec<String>) -> String {
    values.into_iter().next().unwrap_or_default()
}

/// Parses a catalog document, numbering plants from 1 in document order.
///
/// Elements other than `PLANT` and its known children are skipped, wherever
/// they appear.
pub fn parse_catalog(xml: &str) -> Result<Collection, quick_xml::DeError> {
    let catalog: XmlCatalog = quick_xml::de::from_str(xml)?;

    Ok(catalog
        .plants
        .into_iter()
        .zip(1..)
        .map(|(p, id)| Plant {
            id,
            common: first(p.common),
            botanical: first(p.botanical),
            zone: first(p.zone),
            light: first(p.light),
            price: first(p.price),
            availability: first(p.availability),
        })
        .collect())
}

/// Reads and parses the catalog file at `path`.
pub fn import_catalog(path: &Path) -> Result<Collection, ImportError> {
    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ImportError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(ImportError::Io(path.to_path_buf(), e)),
    };

    parse_catalog(&xml).map_err(|e| ImportError::Parse(path.to_path_buf(), e))
}
