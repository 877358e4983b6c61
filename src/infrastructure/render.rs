//! Tree rendering
//!
//! Observers that draw the tree to a writer after each change. They only ever see
//! a [`TreeView`], so rendering cannot disturb the tree.

use std::fmt::Display;
use std::io::Write;

use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, warn};

use crate::config::RenderStyle;
use crate::domain::{ChangeEvent, TreeObserver, TreeView};

/// Label for the missing side of a node that has exactly one child.
pub const EMPTY_SLOT: &str = "·";

/// Label for an empty tree.
pub const EMPTY_TREE: &str = "(empty)";

pub trait ToTermTree {
    /// Builds a termtree diagram; with `annotate` each label carries `(h=, b=)`.
    fn to_term_tree(&self, annotate: bool) -> Tree<String>;
}

impl<K: Display> ToTermTree for TreeView<'_, K> {
    fn to_term_tree(&self, annotate: bool) -> Tree<String> {
        if self.is_empty() {
            return Tree::new(EMPTY_TREE.to_string());
        }
        build_tree(*self, annotate)
    }
}

fn build_tree<K: Display>(view: TreeView<'_, K>, annotate: bool) -> Tree<String> {
    let mut tree = Tree::new(label(view, annotate));
    if view.is_leaf() {
        return tree;
    }
    // Both slots are always pushed so left and right stay distinguishable
    for child in [view.left(), view.right()] {
        if child.is_empty() {
            tree.push(Tree::new(EMPTY_SLOT.to_string()));
        } else {
            tree.push(build_tree(child, annotate));
        }
    }
    tree
}

fn label<K: Display>(view: TreeView<'_, K>, annotate: bool) -> String {
    let value = view
        .value()
        .map_or_else(|| EMPTY_SLOT.to_string(), |v| v.to_string());
    if annotate {
        format!("{} (h={}, b={})", value, view.height(), view.balance())
    } else {
        value
    }
}

/// `[a, b, c]` in ascending order.
pub fn render_in_order<K: Display>(view: TreeView<'_, K>) -> String {
    format!("[{}]", view.in_order().join(", "))
}

/// Renders `view` in the given style; `None` for [`RenderStyle::Quiet`].
pub fn render_view<K: Display>(
    view: TreeView<'_, K>,
    style: RenderStyle,
    annotate: bool,
) -> Option<String> {
    match style {
        RenderStyle::Tree => Some(view.to_term_tree(annotate).to_string()),
        RenderStyle::Inorder => Some(format!("{}\n", render_in_order(view))),
        RenderStyle::Quiet => None,
    }
}

/// One-line description of a change, e.g. `insert 5` or `delete 7 (no change)`.
pub fn describe<K: Display>(event: &ChangeEvent<K>) -> String {
    let mut text = match &event.value {
        Some(value) => format!("{} {}", event.op, value),
        None => event.op.to_string(),
    };
    if !event.changed {
        text.push_str(" (no change)");
    }
    text
}

/// Writes a header line and the rendered tree after each change.
pub struct ChangeRenderer<W> {
    out: W,
    style: RenderStyle,
    annotate: bool,
    redraw_noops: bool,
}

impl<W: Write> ChangeRenderer<W> {
    pub fn new(out: W, style: RenderStyle) -> Self {
        Self {
            out,
            style,
            annotate: false,
            redraw_noops: false,
        }
    }

    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn redraw_noops(mut self, redraw_noops: bool) -> Self {
        self.redraw_noops = redraw_noops;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<K: Display, W: Write> TreeObserver<K> for ChangeRenderer<W> {
    fn on_change(&mut self, event: &ChangeEvent<K>, root: TreeView<'_, K>) {
        if !event.changed && !self.redraw_noops {
            return;
        }
        let Some(rendered) = render_view(root, self.style, self.annotate) else {
            return;
        };
        let result = writeln!(self.out, "{}:", describe(event))
            .and_then(|()| write!(self.out, "{}", rendered))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("failed to render tree: {}", e);
        }
    }
}

/// Logs every change at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<K: Display> TreeObserver<K> for TracingObserver {
    fn on_change(&mut self, event: &ChangeEvent<K>, root: TreeView<'_, K>) {
        debug!(
            op = %event.op,
            changed = event.changed,
            height = root.height(),
            root = %root.value().map_or_else(|| "-".to_string(), |v| v.to_string()),
            "{}",
            describe(event)
        );
    }
}
