use serde::{Deserialize, Serialize};
use slab::Slab;

use crate::error::{RenderError, Result};

/// Handle to a node of an [`OutputTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A rendered output node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
	/// Element such as `p`, `code` or `span`.
	Element { tag: String, children: Vec<NodeId> },
	/// Literal text.
	Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
	node: OutputNode,
	parent: Option<NodeId>,
}

/// Arena holding one rendered output tree.
#[derive(Debug, Clone, Default)]
pub struct OutputTree {
	nodes: Slab<Slot>,
}

/// Serialized form of an output tree.
///
/// ```json
/// { "tag": "p", "children": ["Hi ", { "tag": "code", "children": [":smile:"] }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputSpec {
	Text(String),
	Element {
		tag: String,
		#[serde(default)]
		children: Vec<OutputSpec>,
	},
}

impl OutputTree {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a tree from its serialized form, returning the root.
	pub fn from_spec(spec: &OutputSpec) -> (Self, NodeId) {
		let mut tree = Self::new();
		let root = tree.insert_spec(spec);
		(tree, root)
	}

	/// Parses a JSON [`OutputSpec`].
	pub fn from_json(json: &str) -> Result<(Self, NodeId)> {
		let spec: OutputSpec = serde_json::from_str(json)?;
		Ok(Self::from_spec(&spec))
	}

	fn insert_spec(&mut self, spec: &OutputSpec) -> NodeId {
		match spec {
			OutputSpec::Text(text) => self.text(text),
			OutputSpec::Element { tag, children } => {
				let id = self.element(tag);
				for child in children {
					let child = self.insert_spec(child);
					self.link(id, child);
				}
				id
			}
		}
	}

	/// Creates a detached element.
	pub fn element(&mut self, tag: &str) -> NodeId {
		self.insert(OutputNode::Element {
			tag: tag.to_string(),
			children: Vec::new(),
		})
	}

	/// Creates a detached text node.
	pub fn text(&mut self, text: &str) -> NodeId {
		self.insert(OutputNode::Text(text.to_string()))
	}

	fn insert(&mut self, node: OutputNode) -> NodeId {
		NodeId(self.nodes.insert(Slot { node, parent: None }))
	}

	/// Appends `child` to the element `parent`.
	pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
		self.slot(child)?;
		match &self.slot(parent)?.node {
			OutputNode::Element { .. } => {}
			OutputNode::Text(_) => return Err(RenderError::NotElement(parent)),
		}
		self.unlink(child);
		self.link(parent, child);
		Ok(())
	}

	fn link(&mut self, parent: NodeId, child: NodeId) {
		if let Some(Slot {
			node: OutputNode::Element { children, .. },
			..
		}) = self.nodes.get_mut(parent.0)
		{
			children.push(child);
		}
		if let Some(slot) = self.nodes.get_mut(child.0) {
			slot.parent = Some(parent);
		}
	}

	fn unlink(&mut self, child: NodeId) {
		let Some(parent) = self.nodes.get(child.0).and_then(|s| s.parent) else {
			return;
		};
		if let Some(Slot {
			node: OutputNode::Element { children, .. },
			..
		}) = self.nodes.get_mut(parent.0)
		{
			children.retain(|c| *c != child);
		}
		if let Some(slot) = self.nodes.get_mut(child.0) {
			slot.parent = None;
		}
	}

	fn slot(&self, id: NodeId) -> Result<&Slot> {
		self.nodes.get(id.0).ok_or(RenderError::Missing(id))
	}

	pub fn get(&self, id: NodeId) -> Option<&OutputNode> {
		self.nodes.get(id.0).map(|s| &s.node)
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes.get(id.0).and_then(|s| s.parent)
	}

	/// Number of live nodes, attached or not.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Detaches `id` from its parent and drops its subtree.
	pub fn remove(&mut self, id: NodeId) -> Result<()> {
		self.slot(id)?;
		self.unlink(id);
		self.remove_subtree(id);
		Ok(())
	}

	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.contains(id.0)
	}

	/// Tag of an element node.
	pub fn tag(&self, id: NodeId) -> Option<&str> {
		match self.get(id)? {
			OutputNode::Element { tag, .. } => Some(tag),
			OutputNode::Text(_) => None,
		}
	}

	/// Concatenated text of `id` and its descendants.
	pub fn inner_text(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.collect_text(id, &mut out);
		out
	}

	fn collect_text(&self, id: NodeId, out: &mut String) {
		match self.get(id) {
			Some(OutputNode::Text(text)) => out.push_str(text),
			Some(OutputNode::Element { children, .. }) => {
				for &child in children {
					self.collect_text(child, out);
				}
			}
			None => {}
		}
	}

	/// Elements tagged `tag` under `root` (inclusive), in document order.
	pub fn find_all(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
		let mut found = Vec::new();
		let mut stack = vec![root];
		while let Some(id) = stack.pop() {
			if let Some(OutputNode::Element { tag: t, children }) = self.get(id) {
				if t == tag {
					found.push(id);
				}
				stack.extend(children.iter().rev().copied());
			}
		}
		found
	}

	/// Puts `new` where `old` sits in its parent and drops `old`'s subtree.
	pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> Result<()> {
		self.slot(new)?;
		let parent = self.slot(old)?.parent.ok_or(RenderError::Detached(old))?;
		self.unlink(new);
		if let Some(Slot {
			node: OutputNode::Element { children, .. },
			..
		}) = self.nodes.get_mut(parent.0)
			&& let Some(pos) = children.iter().position(|c| *c == old)
		{
			children[pos] = new;
		}
		if let Some(slot) = self.nodes.get_mut(new.0) {
			slot.parent = Some(parent);
		}
		self.remove_subtree(old);
		Ok(())
	}

	fn remove_subtree(&mut self, id: NodeId) {
		let mut stack = vec![id];
		while let Some(id) = stack.pop() {
			if let Some(slot) = self.nodes.try_remove(id.0)
				&& let OutputNode::Element { children, .. } = slot.node
			{
				stack.extend(children);
			}
		}
	}

	/// Serializes `id` as markup with escaped text.
	pub fn to_markup(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.write_markup(id, &mut out);
		out
	}

	fn write_markup(&self, id: NodeId, out: &mut String) {
		match self.get(id) {
			Some(OutputNode::Text(text)) => {
				for ch in text.chars() {
					match ch {
						'&' => out.push_str("&amp;"),
						'<' => out.push_str("&lt;"),
						'>' => out.push_str("&gt;"),
						_ => out.push(ch),
					}
				}
			}
			Some(OutputNode::Element { tag, children }) => {
				out.push('<');
				out.push_str(tag);
				out.push('>');
				for &child in children {
					self.write_markup(child, out);
				}
				out.push_str("</");
				out.push_str(tag);
				out.push('>');
			}
			None => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_from_json_and_markup() {
		let (tree, root) =
			OutputTree::from_json(r#"{"tag":"p","children":["a < b ",{"tag":"code","children":["x"]}]}"#).unwrap();
		assert_eq!(tree.to_markup(root), "<p>a &lt; b <code>x</code></p>");
		assert_eq!(tree.inner_text(root), "a < b x");
	}

	#[test]
	fn test_find_all_document_order() {
		let (tree, root) = OutputTree::from_json(
			r#"{"tag":"div","children":[{"tag":"code","children":["1"]},{"tag":"p","children":[{"tag":"code","children":["2"]}]},{"tag":"code","children":["3"]}]}"#,
		)
		.unwrap();
		let texts: Vec<_> = tree
			.find_all(root, "code")
			.into_iter()
			.map(|id| tree.inner_text(id))
			.collect();
		assert_eq!(texts, ["1", "2", "3"]);
	}

	#[test]
	fn test_replace_with_drops_subtree() {
		let (mut tree, root) =
			OutputTree::from_json(r#"{"tag":"p","children":["a",{"tag":"code","children":["x"]},"b"]}"#).unwrap();
		let code = tree.find_all(root, "code")[0];
		let span = tree.element("span");
		let glyph = tree.text("y");
		tree.append(span, glyph).unwrap();

		tree.replace_with(code, span).unwrap();
		assert_eq!(tree.to_markup(root), "<p>a<span>y</span>b</p>");
		assert!(!tree.contains(code));
		assert_eq!(tree.parent(span), Some(root));
		assert!(matches!(tree.replace_with(code, span), Err(RenderError::Missing(_))));
	}

	#[test]
	fn test_replace_root_fails() {
		let mut tree = OutputTree::new();
		let root = tree.element("p");
		let other = tree.element("span");
		assert!(matches!(tree.replace_with(root, other), Err(RenderError::Detached(_))));
	}

	#[test]
	fn test_remove_detaches_subtree() {
		let (mut tree, root) =
			OutputTree::from_json(r#"{"tag":"p","children":["a",{"tag":"em","children":["b"]}]}"#).unwrap();
		let em = tree.find_all(root, "em")[0];
		assert_eq!(tree.len(), 4);
		tree.remove(em).unwrap();
		assert_eq!(tree.len(), 2);
		assert!(!tree.contains(em));
		assert_eq!(tree.to_markup(root), "<p>a</p>");
		assert!(matches!(tree.remove(em), Err(RenderError::Missing(_))));
	}

	#[test]
	fn test_append_to_text_fails() {
		let mut tree = OutputTree::new();
		let text = tree.text("a");
		let span = tree.element("span");
		assert!(matches!(tree.append(text, span), Err(RenderError::NotElement(_))));
	}
}
