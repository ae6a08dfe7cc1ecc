//! Episode descriptor documents
//!
//! [`DescriptorBuilder`] turns an [`EpisodeRecord`] and its identifier into an
//! ordered [`Element`] tree; [`serializer::DescriptorSerializer`] renders that
//! tree to text.

pub mod serializer;

pub use serializer::{DECLARATION, DescriptorSerializer};

use crate::episode::EpisodeRecord;
use serde::{Deserialize, Serialize};

/// Root element name of an episode descriptor
pub const ROOT_ELEMENT: &str = "episodedetails";

/// Default placeholder elements emitted under the empty-element policy
pub const DEFAULT_EXTRA_ELEMENTS: &[&str] = &["plot", "credits", "aired", "userrating"];

/// Default `type` attribute of the `uniqueid` element
pub const DEFAULT_UNIQUE_ID_TYPE: &str = "hashpath";

/// A node of the descriptor tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append an attribute; order is preserved
    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Emission settings for descriptor documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorOptions {
    /// Label written to the `type` attribute of `uniqueid`
    pub unique_id_type: String,
    /// Emit unknown fields and extra placeholders as empty elements
    pub emit_empty_elements: bool,
    /// Placeholder element names, in output order
    pub extra_elements: Vec<String>,
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        Self {
            unique_id_type: DEFAULT_UNIQUE_ID_TYPE.to_string(),
            emit_empty_elements: true,
            extra_elements: DEFAULT_EXTRA_ELEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Assembles descriptor trees
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    options: DescriptorOptions,
}

impl DescriptorBuilder {
    pub fn new(options: DescriptorOptions) -> Self {
        Self { options }
    }

    /// Build the descriptor tree for one episode
    pub fn build(&self, record: &EpisodeRecord, identifier: &str) -> Element {
        let emit_empty = self.options.emit_empty_elements;
        let mut root = Element::new(ROOT_ELEMENT);

        root.push(Element::new("title").with_text(record.title().unwrap_or_default()));

        if let Some(element) = numbered_element("season", record.season_number(), emit_empty) {
            root.push(element);
        }
        if let Some(element) = numbered_element("episode", record.episode_number(), emit_empty) {
            root.push(element);
        }

        root.push(
            Element::new("uniqueid")
                .with_attribute("type", self.options.unique_id_type.as_str())
                .with_text(identifier),
        );

        if emit_empty {
            for name in &self.options.extra_elements {
                root.push(Element::new(name));
            }
        }

        root
    }
}

fn numbered_element(name: &str, value: Option<u32>, emit_empty: bool) -> Option<Element> {
    match value {
        Some(number) => Some(Element::new(name).with_text(number.to_string())),
        None if emit_empty => Some(Element::new(name).with_text("")),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(element: &Element) -> Vec<&str> {
        element.children().iter().map(|c| c.name()).collect()
    }

    fn builder(emit_empty: bool) -> DescriptorBuilder {
        DescriptorBuilder::new(DescriptorOptions {
            emit_empty_elements: emit_empty,
            ..Default::default()
        })
    }

    #[test]
    fn test_full_record_order() {
        let record = EpisodeRecord::new(Some("Finale"), Some(15), Some(3));
        let tree = builder(false).build(&record, "abc123");

        assert_eq!(tree.name(), ROOT_ELEMENT);
        assert_eq!(names(&tree), vec!["title", "season", "episode", "uniqueid"]);
        assert_eq!(tree.child("title").unwrap().text(), Some("Finale"));
        assert_eq!(tree.child("season").unwrap().text(), Some("3"));
        assert_eq!(tree.child("episode").unwrap().text(), Some("15"));

        let unique_id = tree.child("uniqueid").unwrap();
        assert_eq!(unique_id.attribute("type"), Some("hashpath"));
        assert_eq!(unique_id.text(), Some("abc123"));
    }

    #[test]
    fn test_empty_policy_emits_unknown_fields_and_extras() {
        let record = EpisodeRecord::new(Some("Pilot"), Some(1), None);
        let tree = builder(true).build(&record, "id");

        assert_eq!(
            names(&tree),
            vec![
                "title",
                "season",
                "episode",
                "uniqueid",
                "plot",
                "credits",
                "aired",
                "userrating"
            ]
        );
        assert_eq!(tree.child("season").unwrap().text(), Some(""));
        assert_eq!(tree.child("plot").unwrap().text(), None);
    }

    #[test]
    fn test_without_empty_policy_unknown_fields_are_omitted() {
        let record = EpisodeRecord::new(Some("Pilot"), Some(1), None);
        let tree = builder(false).build(&record, "id");

        assert!(tree.child("season").is_none());
        assert!(tree.child("plot").is_none());
        assert_eq!(names(&tree), vec!["title", "episode", "uniqueid"]);
    }

    #[test]
    fn test_title_is_always_present() {
        let tree = builder(false).build(&EpisodeRecord::default(), "id");
        assert_eq!(names(&tree), vec!["title", "uniqueid"]);
        assert_eq!(tree.child("title").unwrap().text(), Some(""));
    }

    #[test]
    fn test_season_zero_is_emitted() {
        let record = EpisodeRecord::new(Some("Bonus"), None, Some(0));
        let tree = builder(false).build(&record, "id");
        assert_eq!(tree.child("season").unwrap().text(), Some("0"));
    }

    #[test]
    fn test_custom_extras_and_label() {
        let builder = DescriptorBuilder::new(DescriptorOptions {
            unique_id_type: "md5".to_string(),
            emit_empty_elements: true,
            extra_elements: vec!["rating".to_string(), "plot".to_string()],
        });
        let tree = builder.build(&EpisodeRecord::new(Some("x"), Some(1), Some(1)), "id");

        assert_eq!(
            names(&tree),
            vec!["title", "season", "episode", "uniqueid", "rating", "plot"]
        );
        assert_eq!(tree.child("uniqueid").unwrap().attribute("type"), Some("md5"));
    }
}
