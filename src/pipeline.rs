//! End-to-end extraction: parse, locate, resolve, build, write.
//!
//! The run stops early, without writing anything, when the target class or
//! its instances are absent. Those are [`Outcome`]s, not errors.

use std::fmt::Write;
use std::path::PathBuf;

use crate::config::ExtractConfig;
use crate::interchange::{
    ClassSelector, ExtractError, StationRecord, XmiDocument, build_records, find_instances,
    list_owned_attributes, locate_class, write_json,
};

/// How a run finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No `uml:Class` with the configured name.
    ClassNotFound { class_name: String },
    /// The class exists but has no instance specifications.
    NoInstances {
        class_id: String,
        attribute_ids: Vec<String>,
    },
    /// Records were built and written to `output`.
    Written {
        class_id: String,
        attribute_ids: Vec<String>,
        records: Vec<StationRecord>,
        output: PathBuf,
    },
}

impl Outcome {
    /// Whether an output file was produced.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    /// Console narration of the run for the class named `class`.
    pub fn report(&self, class: &str) -> String {
        let mut out = String::new();
        match self {
            Self::ClassNotFound { class_name } => {
                let _ = writeln!(out, "No class '{class_name}' found in the file.");
            }
            Self::NoInstances {
                class_id,
                attribute_ids,
            } => {
                report_class(&mut out, class, class_id, attribute_ids);
                let _ = writeln!(out, "No instance of class '{class}' found in the file.");
            }
            Self::Written {
                class_id,
                attribute_ids,
                records,
                output,
            } => {
                report_class(&mut out, class, class_id, attribute_ids);
                for record in records {
                    let _ = writeln!(out, "\n{record}");
                }
                let _ = writeln!(out, "Station details saved to {}", output.display());
            }
        }
        out
    }
}

fn report_class(out: &mut String, class: &str, class_id: &str, attribute_ids: &[String]) {
    let _ = writeln!(out, "ID of class '{class}':\n  {class_id}\n");
    if attribute_ids.is_empty() {
        let _ = writeln!(out, "No attribute found for class '{class}'.");
        return;
    }
    let _ = writeln!(out, "  Attribute IDs of class '{class}':");
    for id in attribute_ids {
        let _ = writeln!(out, "    {id}");
    }
}

/// Run one extraction with `config`.
pub fn run(config: &ExtractConfig) -> Result<Outcome, ExtractError> {
    tracing::debug!(input = %config.input.display(), class = %config.class_name, "starting extraction");
    let doc = XmiDocument::from_path(&config.input)?;

    let selector = ClassSelector::named(config.class_name.as_str());
    let Some(class) = locate_class(&doc, &selector)? else {
        return Ok(Outcome::ClassNotFound {
            class_name: config.class_name.clone(),
        });
    };

    let attribute_ids: Vec<String> = list_owned_attributes(class.element)
        .into_iter()
        .map(str::to_string)
        .collect();
    if attribute_ids.is_empty() {
        tracing::warn!(class = %config.class_name, "class declares no owned attributes");
    }

    let instances = find_instances(&doc, class.id);
    if instances.is_empty() {
        return Ok(Outcome::NoInstances {
            class_id: class.id.to_string(),
            attribute_ids,
        });
    }

    let records = build_records(&instances, &doc)?;
    write_json(&records, &config.output)?;

    Ok(Outcome::Written {
        class_id: class.id.to_string(),
        attribute_ids,
        records,
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::AttributeValue;
    use tempfile::TempDir;

    #[test]
    fn test_report_class_not_found() {
        let outcome = Outcome::ClassNotFound {
            class_name: "Station".into(),
        };
        assert_eq!(
            outcome.report("Station"),
            "No class 'Station' found in the file.\n"
        );
    }

    #[test]
    fn test_report_no_instances_without_attributes() {
        let outcome = Outcome::NoInstances {
            class_id: "C1".into(),
            attribute_ids: vec![],
        };
        assert_eq!(
            outcome.report("Station"),
            "ID of class 'Station':\n  C1\n\n\
             No attribute found for class 'Station'.\n\
             No instance of class 'Station' found in the file.\n"
        );
    }

    #[test]
    fn test_report_written() {
        let outcome = Outcome::Written {
            class_id: "C1".into(),
            attribute_ids: vec!["A1".into(), "A2".into()],
            records: vec![StationRecord {
                station_name: "UPS1".into(),
                attributes: vec![AttributeValue {
                    attribute_name: "Name".into(),
                    attribute_value: "North Gate".into(),
                }],
            }],
            output: PathBuf::from("station_details.json"),
        };
        assert_eq!(
            outcome.report("Station"),
            "ID of class 'Station':\n  C1\n\n\
             \x20 Attribute IDs of class 'Station':\n\
             \x20   A1\n\
             \x20   A2\n\
             \nStation: UPS1\n  - Name : North Gate\n\
             Station details saved to station_details.json\n"
        );
    }

    #[test]
    fn test_unparseable_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.xmi");
        let output = dir.path().join("out.json");
        std::fs::write(&input, "<xmi:XMI><packagedElement></xmi:XMI>").unwrap();

        let err = run(&ExtractConfig::new(&input, &output)).unwrap_err();
        assert!(matches!(err, ExtractError::Xml(_)), "got {err:?}");
        assert!(!output.exists());
    }

    #[test]
    fn test_no_attributes_still_resolves_instances() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("model.xmi");
        let output = dir.path().join("out.json");
        std::fs::write(
            &input,
            r#"<xmi:XMI>
  <packagedElement xmi:type="uml:Class" xmi:id="C1" name="Station"/>
  <packagedElement xmi:type="uml:InstanceSpecification" xmi:id="I1" name="UPS1" classifier="C1"/>
</xmi:XMI>"#,
        )
        .unwrap();

        let outcome = run(&ExtractConfig::new(&input, &output)).unwrap();
        match outcome {
            Outcome::Written {
                attribute_ids,
                records,
                ..
            } => {
                assert!(attribute_ids.is_empty());
                assert_eq!(records.len(), 1);
                assert!(records[0].attributes.is_empty());
            }
            other => panic!("expected Written, got {other:?}"),
        }
        assert!(output.exists());
    }
}
