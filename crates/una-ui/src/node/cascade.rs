use std::collections::BTreeSet;
use std::rc::Rc;

use super::{NodeError, NodeId, NodeSubject, NodeTree};
use crate::style::ComputedStyle;
use crate::stylesheet::{cascade, StyleSheet};

impl NodeTree {
    /// Resolves the computed style of every style-dirty node under `root`.
    ///
    /// Runs top-down. A node is recomputed when it is style-dirty or when its
    /// parent's computed style or effective tags changed in this pass. The
    /// rules in scope are those of every ancestor's stylesheet (outermost
    /// first) followed by the node's own.
    ///
    /// Changes that can move boxes mark the node layout-dirty; font changes
    /// also drop its text measurement.
    pub fn resolve_styles(&mut self, root: NodeId) -> Result<(), NodeError> {
        self.get(root)?;

        let ancestors = self.ancestors(root);
        let mut sheets: Vec<Rc<StyleSheet>> = ancestors
            .iter()
            .rev()
            .filter_map(|a| self.nodes.get(*a).and_then(|n| n.stylesheet.clone()))
            .collect();
        let parent = ancestors.first().and_then(|p| self.nodes.get(*p));
        let parent_style = parent.map(|p| p.computed);
        let parent_tags = parent.map(|p| p.effective_tags.clone()).unwrap_or_default();

        let mut resolved = 0usize;
        self.resolve_node(root, &mut sheets, parent_style.as_ref(), &parent_tags, false, &mut resolved);
        if resolved > 0 {
            log::trace!("style pass under {root:?}: {resolved} nodes resolved");
        }
        Ok(())
    }

    fn resolve_node(
        &mut self,
        id: NodeId,
        sheets: &mut Vec<Rc<StyleSheet>>,
        parent: Option<&ComputedStyle>,
        parent_tags: &BTreeSet<String>,
        force: bool,
        resolved: &mut usize,
    ) {
        let Some(data) = self.nodes.get(id) else { return };
        let own_sheet = data.stylesheet.clone();
        if let Some(sheet) = &own_sheet {
            sheets.push(sheet.clone());
        }

        let mut changed = false;
        if force || data.dirty.style {
            let mut tags = data.tags.clone();
            if data.inherit_tags {
                tags.extend(parent_tags.iter().cloned());
            }
            let mut style = cascade(sheets.iter().map(|s| s.as_ref()), &NodeSubject::new(data, &tags));
            style.overlay(&data.inline_style);
            let computed = ComputedStyle::resolve(&style, parent);

            let previous = data.computed;
            let layout = computed.affects_layout(&previous);
            changed = computed != previous || tags != data.effective_tags;

            if let Some(data) = self.nodes.get_mut(id) {
                if computed.affects_text(&previous) {
                    data.text.valid = false;
                }
                data.computed = computed;
                data.effective_tags = tags;
                data.dirty.style = false;
            }
            if layout {
                self.mark_layout_dirty(id);
            }
            *resolved += 1;
        }

        let Some(data) = self.nodes.get(id) else { return };
        let computed = data.computed;
        let tags = data.effective_tags.clone();
        for child in self.children(id) {
            self.resolve_node(child, sheets, Some(&computed), &tags, changed, resolved);
        }

        if own_sheet.is_some() {
            sheets.pop();
        }
    }
}
