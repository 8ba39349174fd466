//! UML lookups over an XMI tree: class, owned attributes, instances.

use indexmap::IndexMap;

use super::names;
use super::{ExtractError, XmiDocument, XmlElement};

/// Predicate selecting the target class element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    /// Local tag name of the element holding the class.
    pub element_tag: String,
    /// Required `xmi:type` value.
    pub type_marker: String,
    /// Required `name` value.
    pub name: String,
}

impl ClassSelector {
    /// A `packagedElement` of type `uml:Class` with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            element_tag: names::PACKAGED_ELEMENT.to_string(),
            type_marker: names::UML_CLASS.to_string(),
            name: name.into(),
        }
    }

    pub fn matches(&self, element: &XmlElement) -> bool {
        element.is(&self.element_tag)
            && element.attr(names::XMI_TYPE) == Some(self.type_marker.as_str())
            && element.attr(names::NAME) == Some(self.name.as_str())
    }
}

/// The class found by [`locate_class`].
#[derive(Debug, Clone, Copy)]
pub struct LocatedClass<'a> {
    /// The class's `xmi:id`.
    pub id: &'a str,
    pub element: &'a XmlElement,
}

/// Find the first element matching `selector`.
///
/// Returns `Ok(None)` when nothing matches. A matching element without an
/// `xmi:id` cannot be cross-referenced and is reported as an error.
pub fn locate_class<'a>(
    doc: &'a XmiDocument,
    selector: &ClassSelector,
) -> Result<Option<LocatedClass<'a>>, ExtractError> {
    let Some(element) = doc.elements().find(|e| selector.matches(e)) else {
        tracing::debug!(class = %selector.name, "no matching class element");
        return Ok(None);
    };

    let id = element.attr(names::XMI_ID).ok_or_else(|| {
        ExtractError::missing_attribute(format!("xmi:id of class '{}'", selector.name))
    })?;
    tracing::info!(class = %selector.name, id, "located class");
    Ok(Some(LocatedClass { id, element }))
}

/// Identifiers of the class's owned attributes, in document order.
pub fn list_owned_attributes(class: &XmlElement) -> Vec<&str> {
    class
        .find_all(names::OWNED_ATTRIBUTE)
        .filter_map(|attribute| {
            let id = attribute.attr(names::XMI_ID);
            if id.is_none() {
                tracing::debug!(
                    name = attribute.attr(names::NAME),
                    "skipping ownedAttribute without xmi:id"
                );
            }
            id
        })
        .collect()
}

/// Instance specifications whose `classifier` is `class_id`, in document order.
pub fn find_instances<'a>(doc: &'a XmiDocument, class_id: &str) -> Vec<&'a XmlElement> {
    let instances: Vec<_> = doc
        .elements()
        .filter(|e| {
            e.is(names::PACKAGED_ELEMENT)
                && e.attr(names::XMI_TYPE) == Some(names::UML_INSTANCE_SPECIFICATION)
                && e.attr(names::CLASSIFIER) == Some(class_id)
        })
        .collect();
    tracing::info!(class_id, count = instances.len(), "found instance specifications");
    instances
}

/// Attribute id to attribute name, over every `ownedAttribute` in a document.
///
/// Built once per run; slot resolution is then a map lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeIndex {
    by_id: IndexMap<String, String>,
}

impl AttributeIndex {
    pub fn build(doc: &XmiDocument) -> Self {
        let mut by_id = IndexMap::new();
        for attribute in doc.elements().filter(|e| e.is(names::OWNED_ATTRIBUTE)) {
            let Some(id) = attribute.attr(names::XMI_ID) else {
                continue;
            };
            let Some(name) = attribute.attr(names::NAME) else {
                tracing::trace!(id, "ownedAttribute has no name");
                continue;
            };
            // First declaration wins on duplicate ids.
            by_id
                .entry(id.to_string())
                .or_insert_with(|| name.to_string());
        }
        tracing::debug!(count = by_id.len(), "built attribute index");
        Self { by_id }
    }

    /// Name of the attribute declared with `id`.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }
}
