use crate::domain::{ActivityInstanceId, PageIndex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attribute naming the activity a page hosts
pub const ACTIVITY_ATTRIBUTE: &str = "data-activity";

/// Kind of input an activity listens for on its page subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    Click,
    Drag,
    Drop,
    Key,
}

/// Listener attached by an activity, tagged with its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListener {
    pub kind: ListenerKind,
    pub owner: ActivityInstanceId,
}

/// Owned handle to a page subtree
///
/// An activity takes ownership of its page element when constructed, so
/// every mutation it makes is scoped to this tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageElement {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub classes: BTreeSet<String>,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub children: Vec<PageElement>,

    /// Listeners currently attached (never serialized, a fresh copy has none)
    #[serde(skip)]
    listeners: Vec<EventListener>,
}

impl PageElement {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Builders =====

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: PageElement) -> Self {
        self.children.push(child);
        self
    }

    /// Declare the activity this page hosts
    pub fn with_activity(self, activity_id: &str) -> Self {
        self.with_attribute(ACTIVITY_ATTRIBUTE, activity_id)
    }

    // ===== Queries =====

    /// Activity declared through `data-activity`, if any
    pub fn activity_id(&self) -> Option<&str> {
        self.attributes.get(ACTIVITY_ATTRIBUTE).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Depth-first search for the first element with `class` (self included)
    pub fn find_by_class(&self, class: &str) -> Option<&PageElement> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&PageElement> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut PageElement> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// All elements carrying `class`, in document order
    pub fn find_all_by_class(&self, class: &str) -> Vec<&PageElement> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a PageElement>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }

    // ===== Mutation =====

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.insert(class.into());
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    // ===== Listeners =====

    pub fn attach_listener(&mut self, kind: ListenerKind, owner: ActivityInstanceId) {
        self.listeners.push(EventListener { kind, owner });
    }

    /// Detach everything `owner` attached anywhere in this subtree
    /// Returns the number of listeners removed
    pub fn detach_listeners_for(&mut self, owner: ActivityInstanceId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.owner != owner);
        let mut removed = before - self.listeners.len();

        for child in &mut self.children {
            removed += child.detach_listeners_for(owner);
        }
        removed
    }

    /// Listeners attached anywhere in this subtree
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
            + self
                .children
                .iter()
                .map(PageElement::listener_count)
                .sum::<usize>()
    }

    pub fn listeners(&self) -> &[EventListener] {
        &self.listeners
    }
}

/// Where a page sits in the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    FrontMatter,
    /// Numbered content page (the printed page number)
    Numbered(u32),
    BackMatter,
}

impl PageKind {
    pub fn is_numbered(&self) -> bool {
        matches!(self, PageKind::Numbered(_))
    }
}

/// Page template; every visit works on a fresh clone of `element`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BookPage {
    pub kind: PageKind,

    #[serde(default)]
    pub element: PageElement,

    #[serde(default)]
    pub has_audio: bool,

    #[serde(default)]
    pub has_video: bool,
}

impl BookPage {
    pub fn numbered(number: u32, element: PageElement) -> Self {
        Self {
            kind: PageKind::Numbered(number),
            element,
            has_audio: false,
            has_video: false,
        }
    }

    pub fn front_matter() -> Self {
        Self {
            kind: PageKind::FrontMatter,
            element: PageElement::new(),
            has_audio: false,
            has_video: false,
        }
    }

    pub fn back_matter() -> Self {
        Self {
            kind: PageKind::BackMatter,
            element: PageElement::new(),
            has_audio: false,
            has_video: false,
        }
    }

    pub fn with_audio(mut self) -> Self {
        self.has_audio = true;
        self
    }

    pub fn with_video(mut self) -> Self {
        self.has_video = true;
        self
    }
}

/// Ordered pages of a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    pub pages: Vec<BookPage>,
}

impl Book {
    pub fn new(pages: Vec<BookPage>) -> Self {
        Self { pages }
    }

    pub fn page(&self, index: PageIndex) -> Option<&BookPage> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the last numbered page, if the book has any
    pub fn last_numbered_index(&self) -> Option<PageIndex> {
        self.pages.iter().rposition(|p| p.kind.is_numbered())
    }
}
