//! XMI interchange for UML instance extraction.
//!
//! ## Architecture
//!
//! Every stage reads the same immutable [`XmiDocument`]; nothing mutates
//! the source tree.
//!
//! ```text
//! ┌──────────────┐
//! │   XMI File   │
//! └──────┬───────┘
//!        ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  XmiDocument (quick-xml → XmlElement tree)               │
//! └──────────────────────────────────────────────────────────┘
//!        │ locate_class ──► list_owned_attributes
//!        │ find_instances
//!        ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  build_records (slots → AttributeIndex → StationRecord)  │
//! └──────────────────────────────────────────────────────────┘
//!        ▼
//!   write_json (4-space indent, UTF-8 kept literal)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use xmi_stations::interchange::*;
//!
//! let doc = XmiDocument::from_path("UPS1.xmi")?;
//! if let Some(class) = locate_class(&doc, &ClassSelector::named("Station"))? {
//!     let instances = find_instances(&doc, class.id);
//!     let records = build_records(&instances, &doc)?;
//!     write_json(&records, "station_details.json")?;
//! }
//! ```

mod document;
mod error;
mod json;
mod record;
mod uml;

pub use document::{Descendants, XmiDocument, XmlElement};
pub use error::ExtractError;
pub use json::{to_json_string, write_json};
pub use record::{
    AttributeValue, NO_VALUE, StationRecord, build_records, build_records_with_index,
};
pub use uml::{
    AttributeIndex, ClassSelector, LocatedClass, find_instances, list_owned_attributes,
    locate_class,
};

/// XMI attribute and tag names used by the UML lookups.
pub mod names {
    /// Element identifier attribute.
    pub const XMI_ID: &str = "xmi:id";
    /// Metaclass marker attribute.
    pub const XMI_TYPE: &str = "xmi:type";
    /// Declared name of a class, attribute or instance.
    pub const NAME: &str = "name";
    /// Class id an instance specification belongs to.
    pub const CLASSIFIER: &str = "classifier";
    /// Attribute id a slot provides a value for.
    pub const DEFINING_FEATURE: &str = "definingFeature";
    /// Textual value carried by a slot value.
    pub const SYMBOL: &str = "symbol";
    /// Literal value of a UML literal specification.
    pub const VALUE_ATTR: &str = "value";

    /// Model element container tag.
    pub const PACKAGED_ELEMENT: &str = "packagedElement";
    /// Attribute declaration tag inside a class.
    pub const OWNED_ATTRIBUTE: &str = "ownedAttribute";
    /// Per-instance value binding tag.
    pub const SLOT: &str = "slot";
    /// Value specification tag inside a slot.
    pub const VALUE_TAG: &str = "value";

    /// `xmi:type` of a UML class.
    pub const UML_CLASS: &str = "uml:Class";
    /// `xmi:type` of a UML instance specification.
    pub const UML_INSTANCE_SPECIFICATION: &str = "uml:InstanceSpecification";
}
