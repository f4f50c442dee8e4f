//! Tree sink that records node provenance
//!
//! Tree construction is delegated to `RcDom`. The sink only reports created
//! elements, appended text and merged attributes to the source tracker.

use std::borrow::Cow;
use std::rc::Rc;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::attribute_name;
use super::tracker::SourceTracker;

pub(crate) struct TrackingSink<'a> {
    dom: RcDom,
    tracker: Rc<SourceTracker<'a>>,
}

impl<'a> TrackingSink<'a> {
    pub fn new(dom: RcDom, tracker: Rc<SourceTracker<'a>>) -> Self {
        Self { dom, tracker }
    }
}

fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

fn previous_sibling(node: &Handle) -> Option<Handle> {
    let parent = parent_of(node)?;
    let children = parent.children.borrow();
    let idx = children.iter().position(|child| Rc::ptr_eq(child, node))?;
    idx.checked_sub(1).map(|prev| Rc::clone(&children[prev]))
}

fn is_text(child: &NodeOrText<Handle>) -> bool {
    matches!(child, NodeOrText::AppendText(_))
}

impl<'a> TreeSink for TrackingSink<'a> {
    type Handle = Handle;
    type Output = Self;
    type ElemName<'b>
        = <RcDom as TreeSink>::ElemName<'b>
    where
        Self: 'b;

    fn finish(self) -> Self {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        tracing::trace!(%msg, "engine reported a parse error");
        self.tracker.record_error(msg);
    }

    fn get_document(&self) -> Handle {
        self.dom.get_document()
    }

    fn elem_name<'b>(&'b self, target: &'b Handle) -> Self::ElemName<'b> {
        self.dom.elem_name(target)
    }

    fn create_element(&self, name: QualName, attrs: Vec<Attribute>, flags: ElementFlags) -> Handle {
        let node = self.dom.create_element(name, attrs, flags);
        self.tracker.element_created(&node);
        node
    }

    fn create_comment(&self, text: StrTendril) -> Handle {
        self.dom.create_comment(text)
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Handle {
        self.dom.create_pi(target, data)
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        let text = is_text(&child);
        self.dom.append(parent, child);
        if text {
            // Either a new node or merged into the previous text child
            if let Some(node) = parent.children.borrow().last() {
                self.tracker.text_appended(node);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &Handle, child: NodeOrText<Handle>) {
        let text = is_text(&child);
        self.dom.append_before_sibling(sibling, child);
        if text {
            if let Some(node) = previous_sibling(sibling) {
                self.tracker.text_appended(&node);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Handle,
        prev_element: &Handle,
        child: NodeOrText<Handle>,
    ) {
        if parent_of(element).is_some() {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        self.dom.append_doctype_to_document(name, public_id, system_id);
    }

    fn mark_script_already_started(&self, node: &Handle) {
        self.dom.mark_script_already_started(node);
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        self.dom.get_template_contents(target)
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        self.dom.same_node(x, y)
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.dom.set_quirks_mode(mode);
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<Attribute>) {
        let added = match &target.data {
            NodeData::Element { attrs: existing, .. } => {
                let existing = existing.borrow();
                attrs
                    .iter()
                    .filter(|attr| !existing.iter().any(|e| e.name == attr.name))
                    .map(|attr| attribute_name(&attr.name))
                    .collect()
            }
            _ => Vec::new(),
        };
        self.dom.add_attrs_if_missing(target, attrs);
        self.tracker.attributes_added(target, added);
    }

    fn remove_from_parent(&self, target: &Handle) {
        self.dom.remove_from_parent(target);
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        self.dom.reparent_children(node, new_parent);
    }

    fn is_mathml_annotation_xml_integration_point(&self, handle: &Handle) -> bool {
        self.dom.is_mathml_annotation_xml_integration_point(handle)
    }
}
