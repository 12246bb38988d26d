//! Element payload: the tag name and the ordered attribute table.

/// The tag name and attributes of an element.
///
/// Attributes keep their insertion order. Names are not forced to be unique;
/// lookups and updates always act on the first entry with a matching name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    tag_name: String,
    attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Creates an element payload with no attributes.
    pub fn new(tag_name: impl Into<String>) -> Self {
        ElementData {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Returns the tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Returns the value of the first attribute called `name`, or the empty
    /// string when there is none.
    pub fn get_attribute(&self, name: &str) -> &str {
        self.attribute(name).unwrap_or("")
    }

    /// Returns the value of the first attribute called `name`, if any.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.attributes[i].1.as_str())
    }

    /// Overwrites the first attribute called `name`, or appends a new one.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => self.attributes[i].1 = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Removes the first attribute called `name`. Returns whether one was
    /// removed.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.attributes.remove(i);
                true
            }
            None => false,
        }
    }

    /// Returns true if an attribute called `name` exists.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Returns the name and value of the attribute at `index`.
    pub fn attribute_at(&self, index: usize) -> Option<(&str, &str)> {
        self.attributes
            .get(index)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|(n, _)| n == name)
    }
}
