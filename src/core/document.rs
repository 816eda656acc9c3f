use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::{EnhanceError, EnhanceResult};
use crate::interaction::{ActionListener, ActionOutcome, ConfirmPrompt, HandlerBinding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Document,
    Doctype(String),
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Element node: tag, attributes in source order and bound action handlers.
///
/// Attribute names are stored lowercase, matching HTML's case-insensitive
/// attribute matching.
#[derive(Debug)]
pub struct Element {
    tag_name: String,
    attributes: IndexMap<String, String>,
    slot_handler: Option<Box<dyn ActionListener>>,
    listeners: SmallVec<[Box<dyn ActionListener>; 1]>,
}

impl Element {
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: IndexMap::new(),
            slot_handler: None,
            listeners: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes
            .contains_key(name.to_ascii_lowercase().as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Sets an attribute. Existing attributes keep their position.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.into());
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Human-readable handle for diagnostics: `#id` when present, the tag otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.id() {
            Some(id) if !id.is_empty() => format!("#{id}"),
            _ => format!("<{}>", self.tag_name),
        }
    }

    #[must_use]
    pub fn has_slot_handler(&self) -> bool {
        self.slot_handler.is_some()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_action_handlers(&self) -> bool {
        self.slot_handler.is_some() || !self.listeners.is_empty()
    }
}

/// Arena-backed document tree.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root.0].children.is_empty()
    }

    pub fn node(&self, id: NodeId) -> EnhanceResult<&Node> {
        self.nodes.get(id.0).ok_or(EnhanceError::UnknownNode(id.0))
    }

    pub fn element(&self, id: NodeId) -> EnhanceResult<&Element> {
        self.node(id)?
            .as_element()
            .ok_or(EnhanceError::NotAnElement(id.0))
    }

    pub fn element_mut(&mut self, id: NodeId) -> EnhanceResult<&mut Element> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(EnhanceError::UnknownNode(id.0))?;
        match &mut node.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(EnhanceError::NotAnElement(id.0)),
        }
    }

    pub fn create_element(&mut self, parent: NodeId, tag_name: &str) -> EnhanceResult<NodeId> {
        self.append_node(parent, NodeKind::Element(Element::new(tag_name)))
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> EnhanceResult<NodeId> {
        self.append_node(parent, NodeKind::Text(text.into()))
    }

    pub fn append_comment(
        &mut self,
        parent: NodeId,
        comment: impl Into<String>,
    ) -> EnhanceResult<NodeId> {
        self.append_node(parent, NodeKind::Comment(comment.into()))
    }

    pub fn append_doctype(&mut self, name: impl Into<String>) -> EnhanceResult<NodeId> {
        self.append_node(self.root, NodeKind::Doctype(name.into()))
    }

    fn append_node(&mut self, parent: NodeId, kind: NodeKind) -> EnhanceResult<NodeId> {
        match self.node(parent)?.kind {
            NodeKind::Document | NodeKind::Element(_) => {}
            _ => return Err(EnhanceError::NotAnElement(parent.0)),
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> EnhanceResult<Option<&str>> {
        Ok(self.element(id)?.attribute(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> EnhanceResult<bool> {
        Ok(self.element(id)?.has_attribute(name))
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> EnhanceResult<()> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    /// Iterates every node below `from` (excluding `from`) in document order.
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.nodes.get(from.0) {
            stack.extend(node.children.iter().rev().copied());
        }
        Descendants {
            document: self,
            stack,
        }
    }

    /// Elements carrying `name`, in document order. Equivalent to `[name]` selection.
    #[must_use]
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        let name = name.to_ascii_lowercase();
        self.descendants(self.root)
            .filter(|id| {
                self.nodes[id.0]
                    .as_element()
                    .is_some_and(|element| element.attributes.contains_key(name.as_str()))
            })
            .collect()
    }

    /// First element in document order whose `id` attribute equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root).find(|node| {
            self.nodes[node.0]
                .as_element()
                .is_some_and(|element| element.id() == Some(id))
        })
    }

    /// Every `id` attribute in the document, mapped to the first element
    /// carrying it in document order.
    #[must_use]
    pub fn element_ids(&self) -> IndexMap<String, NodeId> {
        let mut ids = IndexMap::new();
        for node in self.descendants(self.root) {
            if let Some(id) = self.nodes[node.0].as_element().and_then(Element::id) {
                ids.entry(id.to_owned()).or_insert(node);
            }
        }
        ids
    }

    /// Concatenated text of every text node below `id`.
    pub fn text_content(&self, id: NodeId) -> EnhanceResult<String> {
        self.node(id)?;
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeKind::Text(text) = &self.nodes[node.0].kind {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    /// Registers an additional action listener.
    pub fn add_action_listener(
        &mut self,
        id: NodeId,
        listener: Box<dyn ActionListener>,
    ) -> EnhanceResult<()> {
        self.element_mut(id)?.listeners.push(listener);
        Ok(())
    }

    /// Assigns the single handler slot and returns the handler it replaced.
    pub fn set_slot_handler(
        &mut self,
        id: NodeId,
        handler: Box<dyn ActionListener>,
    ) -> EnhanceResult<Option<Box<dyn ActionListener>>> {
        Ok(self.element_mut(id)?.slot_handler.replace(handler))
    }

    pub fn bind_action_handler(
        &mut self,
        id: NodeId,
        binding: HandlerBinding,
        handler: Box<dyn ActionListener>,
    ) -> EnhanceResult<()> {
        match binding {
            HandlerBinding::Listener => self.add_action_listener(id, handler),
            HandlerBinding::ReplaceSlot => self.set_slot_handler(id, handler).map(|_| ()),
        }
    }

    /// Runs the element's primary action handlers: the slot handler first, then
    /// listeners in registration order.
    ///
    /// Every handler runs; the action proceeds only if none of them suppressed it.
    pub fn dispatch_action(
        &mut self,
        id: NodeId,
        prompt: &mut dyn ConfirmPrompt,
    ) -> EnhanceResult<ActionOutcome> {
        let element = self.element_mut(id)?;
        let mut outcome = ActionOutcome::Proceed;
        let handlers = element
            .slot_handler
            .iter_mut()
            .chain(element.listeners.iter_mut());
        for handler in handlers {
            if handler.on_action(prompt) == ActionOutcome::Suppressed {
                outcome = ActionOutcome::Suppressed;
            }
        }
        Ok(outcome)
    }
}

pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(node) = self.document.nodes.get(id.0) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(id)
    }
}
