//! Immutable arena trees shared by the Java and doc-comment grammars.
//!
//! A [`Tree`] stores every node in one `Vec`; parent, child and sibling
//! relations are precomputed [`NodeId`] indices filled in when the
//! [`TreeBuilder`] finishes. Checks only ever see [`Node`] handles, which are
//! `Copy` read-only views: there is no way to mutate a tree once built.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::kind::NodeKind;
use crate::lexer::Span;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData<K> {
    kind: K,
    /// Own text: the whole token for leaves, the anchor token for anchored
    /// composites, empty otherwise.
    span: Span,
    line: usize,
    column: usize,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    child_count: usize,
    /// Whether the subtree holds any non-comment text.
    has_code: bool,
}

/// A finished, immutable syntax tree over some source text.
#[derive(Debug, Clone)]
pub struct Tree<K> {
    source: Arc<str>,
    nodes: Vec<NodeData<K>>,
    root: NodeId,
}

impl<K: NodeKind> Tree<K> {
    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> Node<'_, K> {
        self.node(self.root)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_, K> {
        assert!(id.index() < self.nodes.len(), "node id out of range");
        Node { tree: self, id }
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// The text node spans index into.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shared handle to the source text.
    #[must_use]
    pub fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    /// Renders an indented outline of the tree, one node per line:
    /// `KIND -> text [line:column]`.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let _ = writeln!(
                out,
                "{:indent$}{} -> {} [{}:{}]",
                "",
                node.kind().name(),
                node.text().escape_debug(),
                node.line(),
                node.column(),
                indent = depth * 2
            );
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
        }
        out
    }

    fn data(&self, id: NodeId) -> &NodeData<K> {
        &self.nodes[id.index()]
    }
}

/// A read-only handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'t, K> {
    tree: &'t Tree<K>,
    id: NodeId,
}

impl<K> PartialEq for Node<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.tree, other.tree)
    }
}

impl<K> Eq for Node<'_, K> {}

impl<K: NodeKind> std::fmt::Debug for Node<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}:{} {:?}",
            self.kind().name(),
            self.line(),
            self.column(),
            self.text()
        )
    }
}

impl<'t, K: NodeKind> Node<'t, K> {
    fn data(&self) -> &'t NodeData<K> {
        self.tree.data(self.id)
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    /// Arena id, stable for the lifetime of the tree.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'t Tree<K> {
        self.tree
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> K {
        self.data().kind
    }

    /// Whether this node has the given kind.
    #[must_use]
    pub fn is(&self, kind: K) -> bool {
        self.kind() == kind
    }

    /// Own text of the node. Composite nodes without an anchor token have
    /// empty text.
    #[must_use]
    pub fn text(&self) -> &'t str {
        let span = self.data().span;
        &self.tree.source[span.start..span.end]
    }

    /// Byte range of the node's own text.
    #[must_use]
    pub fn span(&self) -> Span {
        self.data().span
    }

    /// 1-based line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.data().line
    }

    /// 0-based raw (tab-unexpanded) code-point column.
    #[must_use]
    pub fn column(&self) -> usize {
        self.data().column
    }

    /// Whether this node is a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind().is_comment()
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.wrap(self.data().parent)
    }

    /// First child.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.wrap(self.data().first_child)
    }

    /// Last child.
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.wrap(self.data().last_child)
    }

    /// Next sibling.
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        self.wrap(self.data().next)
    }

    /// Previous sibling.
    #[must_use]
    pub fn previous_sibling(&self) -> Option<Self> {
        self.wrap(self.data().prev)
    }

    /// Next sibling that is not a comment.
    #[must_use]
    pub fn next_code_sibling(&self) -> Option<Self> {
        let mut cur = self.next_sibling();
        while let Some(node) = cur {
            if !node.is_comment() {
                return Some(node);
            }
            cur = node.next_sibling();
        }
        None
    }

    /// Previous sibling that is not a comment.
    #[must_use]
    pub fn previous_code_sibling(&self) -> Option<Self> {
        let mut cur = self.previous_sibling();
        while let Some(node) = cur {
            if !node.is_comment() {
                return Some(node);
            }
            cur = node.previous_sibling();
        }
        None
    }

    /// Children in source order. Each call starts a fresh iteration.
    #[must_use]
    pub fn children(&self) -> Children<'t, K> {
        Children {
            tree: self.tree,
            next: self.data().first_child,
        }
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.data().child_count
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn find_first_child(&self, kind: K) -> Option<Self> {
        self.children().find(|c| c.kind() == kind)
    }

    /// Whether any direct child has the given kind.
    #[must_use]
    pub fn has_child(&self, kind: K) -> bool {
        self.find_first_child(kind).is_some()
    }

    /// All nodes below this one in pre-order, excluding the node itself.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'t, K> {
        Descendants {
            tree: self.tree,
            root: self.id,
            next: self.data().first_child,
        }
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'t, K>> {
        std::iter::successors(self.parent(), Node::parent)
    }
}

/// Iterator over the direct children of a node.
#[derive(Clone)]
pub struct Children<'t, K> {
    tree: &'t Tree<K>,
    next: Option<NodeId>,
}

impl<'t, K: NodeKind> Iterator for Children<'t, K> {
    type Item = Node<'t, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.data(id).next;
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}

/// Pre-order iterator over the nodes below a subtree root.
#[derive(Clone)]
pub struct Descendants<'t, K> {
    tree: &'t Tree<K>,
    root: NodeId,
    next: Option<NodeId>,
}

impl<'t, K: NodeKind> Iterator for Descendants<'t, K> {
    type Item = Node<'t, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let data = self.tree.data(id);
        self.next = data.first_child.or_else(|| {
            let mut cur = id;
            loop {
                if cur == self.root {
                    return None;
                }
                let d = self.tree.data(cur);
                if let Some(next) = d.next {
                    return Some(next);
                }
                cur = d.parent?;
            }
        });
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}

/// Position and own text of a token handed to the [`TreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    /// Byte range of the token.
    pub span: Span,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
}

impl From<crate::lexer::Token> for Anchor {
    fn from(token: crate::lexer::Token) -> Self {
        Self {
            span: token.span,
            line: token.line,
            column: token.column,
        }
    }
}

/// Marks a position in the child list that a node can later be wrapped around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug)]
struct OpenNode<K> {
    kind: K,
    first: usize,
    anchor: Option<Anchor>,
    fallback: Anchor,
}

/// Event-style builder used by the parsers.
///
/// Finished nodes are pushed on a child stack; `finish_node` collects the
/// children opened since the matching `start_node` and wires their links.
#[derive(Debug)]
pub struct TreeBuilder<K> {
    source: Arc<str>,
    nodes: Vec<NodeData<K>>,
    children: Vec<NodeId>,
    open: Vec<OpenNode<K>>,
}

impl<K: NodeKind> TreeBuilder<K> {
    /// Creates a builder over the given source text.
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            children: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Source text spans refer to.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Remembers the current child position.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Opens a composite node. `fallback` positions the node if it ends up
    /// without anchor and without code children.
    pub fn start_node(&mut self, kind: K, fallback: Anchor) {
        let first = self.children.len();
        self.open.push(OpenNode {
            kind,
            first,
            anchor: None,
            fallback,
        });
    }

    /// Opens a composite node that adopts every child produced since
    /// `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: K, fallback: Anchor) {
        let first = checkpoint.0.min(self.children.len());
        self.open.push(OpenNode {
            kind,
            first,
            anchor: None,
            fallback,
        });
    }

    /// Gives the innermost open node its own text and position.
    pub fn anchor(&mut self, anchor: Anchor) {
        if let Some(node) = self.open.last_mut() {
            node.anchor = Some(anchor);
        }
    }

    /// Changes the kind of the innermost open node.
    pub fn relabel(&mut self, kind: K) {
        if let Some(node) = self.open.last_mut() {
            node.kind = kind;
        }
    }

    /// Appends a leaf node.
    pub fn token(&mut self, kind: K, anchor: Anchor) -> NodeId {
        let id = self.push(kind, anchor);
        self.children.push(id);
        id
    }

    /// Appends a leaf node and immediately nests leaves under it; used for
    /// comment and text-block tokens that expose their parts as children.
    pub fn token_with_parts(&mut self, kind: K, anchor: Anchor, parts: &[(K, Anchor)]) -> NodeId {
        let first = self.children.len();
        for &(part_kind, part) in parts {
            let part_id = self.push(part_kind, part);
            self.children.push(part_id);
        }
        let id = self.push(kind, anchor);
        self.adopt(id, first);
        self.children.push(id);
        id
    }

    /// Closes the innermost open node.
    pub fn finish_node(&mut self) -> Option<NodeId> {
        let open = self.open.pop()?;
        let own = &self.children[open.first..];
        let has_code = open.anchor.is_some() || own.iter().any(|c| self.nodes[c.index()].has_code);
        let position = open.anchor.unwrap_or_else(|| {
            let (start, line, column) = own
                .iter()
                .map(|&c| &self.nodes[c.index()])
                .find(|d| d.has_code)
                .map_or(
                    (open.fallback.span.start, open.fallback.line, open.fallback.column),
                    |d| (d.span.start, d.line, d.column),
                );
            Anchor {
                span: Span::new(start, start),
                line,
                column,
            }
        });
        let id = self.push(open.kind, position);
        self.nodes[id.index()].has_code = has_code;
        self.adopt(id, open.first);
        self.children.push(id);
        Some(id)
    }

    /// Number of nodes still open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Closes every open node and freezes the tree. The outermost node becomes
    /// the root; stray top-level nodes are adopted by it.
    #[must_use]
    pub fn finish(mut self) -> Tree<K> {
        while self.open.len() > 1 {
            self.finish_node();
        }
        let root = if self.open.is_empty() {
            // Only reachable when the caller never opened a root; wrap the
            // top-level nodes in the last one produced.
            self.children.pop().unwrap_or_else(|| NodeId::new(0))
        } else {
            // The root adopts everything still on the child stack.
            if let Some(open) = self.open.last_mut() {
                open.first = 0;
            }
            self.finish_node().unwrap_or_else(|| NodeId::new(0))
        };
        Tree {
            source: self.source,
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, kind: K, anchor: Anchor) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            span: anchor.span,
            line: anchor.line,
            column: anchor.column,
            parent: None,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
            child_count: 0,
            has_code: !kind.is_comment(),
        });
        id
    }

    fn adopt(&mut self, parent: NodeId, first: usize) {
        let kids: Vec<NodeId> = self.children.drain(first..).collect();
        let mut prev: Option<NodeId> = None;
        for &kid in &kids {
            let data = &mut self.nodes[kid.index()];
            data.parent = Some(parent);
            data.prev = prev;
            if let Some(p) = prev {
                self.nodes[p.index()].next = Some(kid);
            }
            prev = Some(kid);
        }
        let data = &mut self.nodes[parent.index()];
        data.first_child = kids.first().copied();
        data.last_child = kids.last().copied();
        data.child_count = kids.len();
    }
}

/// Line-oriented view of a source file for column arithmetic.
#[derive(Debug, Clone)]
pub struct FileText {
    text: Arc<str>,
    /// Byte offset of every line start.
    line_starts: Vec<usize>,
}

impl FileText {
    /// Indexes the line starts of `text`, honouring `\n`, `\r\n` and `\r`.
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(i + 1),
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push(i + 1);
                }
                _ => {}
            }
            i += 1;
        }
        Self { text, line_starts }
    }

    /// Whole text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the whole text.
    #[must_use]
    pub fn shared(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Number of lines. A trailing terminator does not open an extra line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let n = self.line_starts.len();
        if n > 1 && self.line_starts[n - 1] == self.text.len() {
            n - 1
        } else {
            n
        }
    }

    /// Text of a 1-based line without its terminator.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len());
        if start > self.text.len() {
            return None;
        }
        Some(self.text[start..end].trim_end_matches(['\n', '\r']))
    }

    /// Iterates over `(line_number, text)` pairs.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        (1..=self.line_count()).filter_map(|n| self.line(n).map(|l| (n, l)))
    }

    /// Column of a raw 0-based code-point position after expanding tabs to
    /// `tab_width` stops. Out-of-range lines return the raw column.
    #[must_use]
    pub fn expanded_column(&self, line: usize, column: usize, tab_width: usize) -> usize {
        self.line(line).map_or(column, |text| {
            expanded_width(text.chars().take(column), tab_width)
        })
    }

    /// Code-point length of a line after tab expansion.
    #[must_use]
    pub fn line_length(&self, line: usize, tab_width: usize) -> usize {
        self.line(line)
            .map_or(0, |text| expanded_width(text.chars(), tab_width))
    }
}

/// Width of a run of characters with tabs advancing to the next multiple of
/// `tab_width`.
#[must_use]
pub fn expanded_width(chars: impl Iterator<Item = char>, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    chars.fold(0, |len, c| {
        if c == '\t' {
            (len / tab_width + 1) * tab_width
        } else {
            len + 1
        }
    })
}
