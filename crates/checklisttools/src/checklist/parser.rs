//! Checklist XML parser.
//!
//! The XML is first read into a small element tree with `quick-xml`, then the
//! tree is mapped onto the [`Checklist`] model. Missing required elements are
//! reported as [`ChecklistError::MalformedChecklist`].

use std::fs;
use std::path::Path;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::error::{ChecklistError, Result};
use super::field::{Field, FieldKind, FieldPattern, Mandatory};
use super::model::{Checklist, FieldGroup};

const CHECKLIST_SET: &str = "CHECKLIST_SET";
const CHECKLIST: &str = "CHECKLIST";
const TEXT_FIELD: &str = "TEXT_FIELD";
const TEXT_CHOICE_FIELD: &str = "TEXT_CHOICE_FIELD";

/// Parse a checklist file.
pub fn parse_checklist_file(path: impl AsRef<Path>) -> Result<Checklist> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ChecklistError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let xml = fs::read_to_string(path).map_err(|e| ChecklistError::io(path, e))?;
    parse_checklist(&xml)
}

/// Parse the first checklist of a document.
///
/// The document root may be a `CHECKLIST_SET` or a bare `CHECKLIST`.
pub fn parse_checklist(xml: &str) -> Result<Checklist> {
    parse_checklist_set(xml)?
        .into_iter()
        .next()
        .ok_or_else(|| ChecklistError::malformed("missing element CHECKLIST"))
}

/// Parse every checklist of a document.
pub fn parse_checklist_set(xml: &str) -> Result<Vec<Checklist>> {
    let root = read_tree(xml)?;
    let elements: Vec<&XmlElement> = match root.name.as_str() {
        CHECKLIST_SET => root.children(CHECKLIST).collect(),
        CHECKLIST => vec![&root],
        other => {
            return Err(ChecklistError::malformed(format!(
                "unexpected root element {}",
                other
            )));
        }
    };

    let checklists = elements
        .into_iter()
        .map(checklist_from_element)
        .collect::<Result<Vec<_>>>()?;
    debug!(count = checklists.len(), "parsed checklist document");
    Ok(checklists)
}

fn checklist_from_element(element: &XmlElement) -> Result<Checklist> {
    let descriptor = element.require(&["DESCRIPTOR"], CHECKLIST)?;

    let field_groups = descriptor
        .children("FIELD_GROUP")
        .map(field_group_from_element)
        .collect::<Result<Vec<_>>>()?;

    Ok(Checklist {
        accession: element.require_attribute("accession", CHECKLIST)?,
        checklist_type: element.require_attribute("checklistType", CHECKLIST)?,
        primary_id: element.require_text(&["IDENTIFIERS", "PRIMARY_ID"], CHECKLIST)?,
        label: descriptor.require_text(&["LABEL"], "CHECKLIST/DESCRIPTOR")?,
        name: descriptor.require_text(&["NAME"], "CHECKLIST/DESCRIPTOR")?,
        description: descriptor.require_text(&["DESCRIPTION"], "CHECKLIST/DESCRIPTOR")?,
        authority: descriptor.require_text(&["AUTHORITY"], "CHECKLIST/DESCRIPTOR")?,
        field_groups,
    })
}

fn field_group_from_element(element: &XmlElement) -> Result<FieldGroup> {
    let fields = element
        .children("FIELD")
        .map(field_from_element)
        .collect::<Result<Vec<_>>>()?;

    Ok(FieldGroup {
        name: element.require_text(&["NAME"], "FIELD_GROUP")?,
        restriction: element.attribute("restrictionType").map(str::to_string),
        fields,
    })
}

fn field_from_element(element: &XmlElement) -> Result<Field> {
    let name = element.require_text(&["NAME"], "FIELD")?;
    let context = format!("FIELD '{}'", name);

    let mandatory_text = element.require_text(&["MANDATORY"], &context)?;
    let mandatory = Mandatory::parse(&mandatory_text).ok_or_else(|| {
        ChecklistError::malformed(format!(
            "{}: unknown MANDATORY value '{}'",
            context, mandatory_text
        ))
    })?;

    let field_type = element.require(&["FIELD_TYPE"], &context)?;
    let kind = field_kind_from_element(&name, field_type)?;

    Ok(Field {
        label: element.require_text(&["LABEL"], &context)?,
        description: element.require_text(&["DESCRIPTION"], &context)?,
        synonyms: element.children("SYNONYM").map(XmlElement::text).collect(),
        mandatory,
        multiplicity: element.require_text(&["MULTIPLICITY"], &context)?,
        units: element
            .find(&["UNITS"])
            .map(|units| units.children("UNIT").map(XmlElement::text).collect())
            .unwrap_or_default(),
        kind,
        name,
    })
}

/// Resolve the variant from the first child of `FIELD_TYPE`.
fn field_kind_from_element(name: &str, field_type: &XmlElement) -> Result<FieldKind> {
    let type_element = field_type.elements.first().ok_or_else(|| {
        ChecklistError::malformed(format!("FIELD '{}': FIELD_TYPE has no type element", name))
    })?;

    match type_element.name.as_str() {
        TEXT_CHOICE_FIELD => {
            let mut values = Vec::new();
            type_element.collect_descendants("VALUE", &mut values);
            if values.is_empty() {
                return Err(ChecklistError::malformed(format!(
                    "FIELD '{}': TEXT_CHOICE_FIELD declares no VALUE",
                    name
                )));
            }
            Ok(FieldKind::TextChoice {
                text_choice_values: values.into_iter().map(XmlElement::text).collect(),
            })
        }
        TEXT_FIELD => {
            let regex_value = type_element
                .find(&["REGEX_VALUE"])
                .map(|e| FieldPattern::new(e.text()))
                .transpose()?;
            Ok(FieldKind::Text { regex_value })
        }
        other => Err(ChecklistError::UnsupportedFieldType {
            field: name.to_string(),
            field_type: other.to_string(),
        }),
    }
}

/// Minimal element tree built from reader events.
#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    elements: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn text(&self) -> String {
        self.text.trim().to_string()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements.iter().filter(move |e| e.name == name)
    }

    fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |element, name| element.children(name).next())
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for element in &self.elements {
            if element.name == name {
                out.push(element);
            }
            element.collect_descendants(name, out);
        }
    }

    fn require(&self, path: &[&str], context: &str) -> Result<&XmlElement> {
        self.find(path).ok_or_else(|| {
            ChecklistError::malformed(format!("{}: missing element {}", context, path.join("/")))
        })
    }

    fn require_text(&self, path: &[&str], context: &str) -> Result<String> {
        self.require(path, context).map(XmlElement::text)
    }

    fn require_attribute(&self, key: &str, context: &str) -> Result<String> {
        self.attribute(key).map(str::to_string).ok_or_else(|| {
            ChecklistError::malformed(format!("{}: missing attribute {}", context, key))
        })
    }
}

fn read_tree(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(XmlElement::from_start(&e)?),
            Event::Empty(e) => {
                let element = XmlElement::from_start(&e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.decode().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.decode().map_err(quick_xml::Error::from)?);
                }
            }
            Event::GeneralRef(e) => {
                if let Some(current) = stack.last_mut() {
                    match e.resolve_char_ref()? {
                        Some(ch) => current.text.push(ch),
                        None => {
                            let entity = e.decode().map_err(quick_xml::Error::from)?;
                            let resolved = resolve_predefined_entity(&entity).ok_or_else(|| {
                                ChecklistError::malformed(format!("unknown entity &{};", entity))
                            })?;
                            current.text.push_str(resolved);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ChecklistError::malformed("unexpected end of document"));
    }
    root.ok_or_else(|| ChecklistError::malformed("document has no root element"))
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.elements.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
