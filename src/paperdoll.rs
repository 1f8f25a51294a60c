//! The paperdoll aggregate.

use crate::layer::LayerDescriptor;

/// A character to be drawn: body, worn items in paint order, name and title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paperdoll {
    body: LayerDescriptor,
    items: Vec<LayerDescriptor>,
    name: String,
    title: String,
}

impl Paperdoll {
    pub fn new(body: LayerDescriptor) -> Self {
        Self {
            body,
            items: Vec::new(),
            name: String::new(),
            title: String::new(),
        }
    }

    /// Appends an item layer; it is drawn over every layer added before it.
    pub fn with_item(mut self, item: LayerDescriptor) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = LayerDescriptor>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn body(&self) -> &LayerDescriptor {
        &self.body
    }

    pub fn items(&self) -> &[LayerDescriptor] {
        &self.items
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}
