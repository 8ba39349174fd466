//! Station records built from instance specification slots.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::names;
use super::{AttributeIndex, ExtractError, XmiDocument, XmlElement};

/// Value written when a slot carries no value.
pub const NO_VALUE: &str = "Aucune valeur";

/// One resolved slot: the attribute's declared name and the slot's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub attribute_name: String,
    pub attribute_value: String,
}

/// One instance specification of the target class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_name: String,
    /// Resolved slots in document order.
    pub attributes: Vec<AttributeValue>,
}

impl fmt::Display for StationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station: {}", self.station_name)?;
        for attr in &self.attributes {
            write!(f, "\n  - {} : {}", attr.attribute_name, attr.attribute_value)?;
        }
        Ok(())
    }
}

/// Build one record per instance, resolving slot names against `doc`.
pub fn build_records(
    instances: &[&XmlElement],
    doc: &XmiDocument,
) -> Result<Vec<StationRecord>, ExtractError> {
    let index = AttributeIndex::build(doc);
    build_records_with_index(instances, &index)
}

/// Build one record per instance with a prebuilt attribute index.
///
/// Slots whose defining feature is not in `index` are dropped.
pub fn build_records_with_index(
    instances: &[&XmlElement],
    index: &AttributeIndex,
) -> Result<Vec<StationRecord>, ExtractError> {
    instances
        .iter()
        .map(|instance| build_record(instance, index))
        .collect()
}

fn build_record(
    instance: &XmlElement,
    index: &AttributeIndex,
) -> Result<StationRecord, ExtractError> {
    let station_name = instance.attr(names::NAME).ok_or_else(|| {
        ExtractError::missing_attribute(format!(
            "name of instance '{}'",
            instance.attr(names::XMI_ID).unwrap_or("<no xmi:id>")
        ))
    })?;

    let attributes = instance
        .find_all(names::SLOT)
        .filter_map(|slot| resolve_slot(slot, index))
        .collect();

    Ok(StationRecord {
        station_name: station_name.to_string(),
        attributes,
    })
}

fn resolve_slot(slot: &XmlElement, index: &AttributeIndex) -> Option<AttributeValue> {
    let Some(feature) = slot.attr(names::DEFINING_FEATURE) else {
        tracing::warn!("dropping slot without definingFeature");
        return None;
    };
    let Some(attribute_name) = index.name_of(feature) else {
        tracing::warn!(feature, "dropping slot with unresolved definingFeature");
        return None;
    };

    let attribute_value = slot
        .find(names::VALUE_TAG)
        .and_then(|value| value.attr(names::SYMBOL).or_else(|| value.attr(names::VALUE_ATTR)))
        .unwrap_or(NO_VALUE);

    Some(AttributeValue {
        attribute_name: attribute_name.to_string(),
        attribute_value: attribute_value.to_string(),
    })
}
