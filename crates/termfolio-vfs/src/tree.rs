//! Arena-backed directory tree, path resolution and canonical paths.

use std::collections::BTreeMap;
use std::fmt;

use termfolio_types::error::{FolioError, Result};

/// Index of a node inside one [`Vfs`]. Only meaningful for the tree that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root directory of every tree.
    pub const ROOT: NodeId = NodeId(0);
}

/// Where a file's text comes from.
pub enum FileContent {
    /// Fixed text.
    Static(String),
    /// Produced on every read.
    Computed(Box<dyn Fn() -> String>),
}

impl FileContent {
    pub fn computed(producer: impl Fn() -> String + 'static) -> Self {
        Self::Computed(Box::new(producer))
    }

    /// Current text of the file. Computed content is evaluated per call.
    pub fn read(&self) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Computed(producer) => producer(),
        }
    }
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(&text.len()).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

/// Whether a node is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

#[derive(Debug)]
enum Entry {
    Dir(BTreeMap<String, NodeId>),
    File(FileContent),
}

/// A directory or file in the tree.
#[derive(Debug)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    entry: Entry,
}

impl Node {
    /// Entry name. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Containing directory. `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> NodeKind {
        match self.entry {
            Entry::Dir(_) => NodeKind::Directory,
            Entry::File(_) => NodeKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::File
    }

    /// Child with exactly this name (case-sensitive).
    pub fn child(&self, name: &str) -> Option<NodeId> {
        match &self.entry {
            Entry::Dir(children) => children.get(name).copied(),
            Entry::File(_) => None,
        }
    }

    /// Children sorted by name. Empty for files.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        let map = match &self.entry {
            Entry::Dir(children) => Some(children),
            Entry::File(_) => None,
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(name, id)| (name.as_str(), *id)))
    }

    /// File content. `None` for directories.
    pub fn content(&self) -> Option<&FileContent> {
        match &self.entry {
            Entry::File(content) => Some(content),
            Entry::Dir(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Read-only tree
// ---------------------------------------------------------------------------

/// The assembled, immutable tree.
#[derive(Debug)]
pub struct Vfs {
    nodes: Vec<Node>,
    home: NodeId,
}

impl Vfs {
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The home directory: default working directory and the target of `~`.
    pub fn home(&self) -> NodeId {
        self.home
    }

    /// Look up a node. Panics if `id` came from a different tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Look up a node, returning `None` for foreign ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node id, root first.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Resolve `path` starting from the directory `start`.
    ///
    /// A leading `/` starts at the root, `~` or a leading `~/` at home,
    /// anything else at `start`. Empty and `.` segments are skipped, `..`
    /// moves to the parent (staying put at the root). A file is only
    /// accepted as the last segment. Returns `None` when any segment fails
    /// to resolve or `start` is not a directory.
    pub fn find_node(&self, path: &str, start: NodeId) -> Option<NodeId> {
        let (mut current, rest) = if let Some(rest) = path.strip_prefix('/') {
            (NodeId::ROOT, rest)
        } else if path == "~" {
            (self.home, "")
        } else if let Some(rest) = path.strip_prefix("~/") {
            (self.home, rest)
        } else {
            (start, path)
        };

        if !self.get(current)?.is_dir() {
            return None;
        }

        let segments: Vec<&str> = rest
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let last = segments.len().saturating_sub(1);

        for (i, segment) in segments.iter().enumerate() {
            if *segment == ".." {
                if let Some(parent) = self.node(current).parent() {
                    current = parent;
                }
                continue;
            }
            let next = self.node(current).child(segment)?;
            if self.node(next).is_file() {
                return (i == last).then_some(next);
            }
            current = next;
        }
        Some(current)
    }

    /// Resolve `path` from the root.
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        self.find_node(path, NodeId::ROOT)
    }

    /// Canonical display path: `~` for home, `/` for the root, `~/<rel>` for
    /// anything below home, `/<abs>` otherwise.
    pub fn get_path(&self, id: NodeId) -> String {
        if id == self.home {
            return "~".to_string();
        }
        if id == NodeId::ROOT {
            return "/".to_string();
        }
        let mut names = Vec::new();
        let mut current = id;
        loop {
            if current == self.home {
                names.reverse();
                return format!("~/{}", names.join("/"));
            }
            let node = self.node(current);
            match node.parent() {
                Some(parent) => {
                    names.push(node.name());
                    current = parent;
                },
                None => break,
            }
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Absolute path from the root, never abbreviated with `~`.
    pub fn absolute_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent() {
            names.push(self.node(current).name());
            current = parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Text of a file, evaluating computed content. `None` for directories.
    pub fn read(&self, id: NodeId) -> Option<String> {
        self.get(id)?.content().map(FileContent::read)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assembles a [`Vfs`]. The only way to add nodes.
#[derive(Debug)]
pub struct VfsBuilder {
    nodes: Vec<Node>,
    home: NodeId,
}

impl VfsBuilder {
    /// Start a tree whose home directory lives at the absolute `home_path`
    /// (e.g. `/home/aayush`). Intermediate directories are created.
    pub fn new(home_path: &str) -> Result<Self> {
        let rest = home_path.strip_prefix('/').ok_or_else(|| {
            FolioError::Vfs(format!("home path must be absolute: {home_path}"))
        })?;
        let mut builder = Self {
            nodes: vec![Node {
                name: String::new(),
                parent: None,
                entry: Entry::Dir(BTreeMap::new()),
            }],
            home: NodeId::ROOT,
        };
        let mut current = NodeId::ROOT;
        for segment in rest.split('/').filter(|s| !s.is_empty()) {
            current = builder.dir(current, segment)?;
        }
        if current == NodeId::ROOT {
            return Err(FolioError::Vfs("home cannot be the root".to_string()));
        }
        builder.home = current;
        Ok(builder)
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn home(&self) -> NodeId {
        self.home
    }

    /// Add a directory, or return the existing one with that name.
    pub fn dir(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        if let Some(existing) = self.existing_child(parent, name)? {
            if self.nodes[existing.0].is_dir() {
                return Ok(existing);
            }
            return Err(FolioError::Vfs(format!("a file named '{name}' already exists")));
        }
        self.insert(parent, name, Entry::Dir(BTreeMap::new()))
    }

    /// Add a file. Sibling names must be unique.
    pub fn file(
        &mut self,
        parent: NodeId,
        name: &str,
        content: impl Into<FileContent>,
    ) -> Result<NodeId> {
        if self.existing_child(parent, name)?.is_some() {
            return Err(FolioError::Vfs(format!("duplicate entry: {name}")));
        }
        self.insert(parent, name, Entry::File(content.into()))
    }

    pub fn build(self) -> Vfs {
        log::debug!("VFS built with {} nodes", self.nodes.len());
        Vfs {
            nodes: self.nodes,
            home: self.home,
        }
    }

    fn existing_child(&self, parent: NodeId, name: &str) -> Result<Option<NodeId>> {
        validate_name(name)?;
        let node = self
            .nodes
            .get(parent.0)
            .ok_or_else(|| FolioError::Vfs("unknown parent node".to_string()))?;
        match &node.entry {
            Entry::Dir(children) => Ok(children.get(name).copied()),
            Entry::File(_) => Err(FolioError::Vfs(format!(
                "not a directory: {}",
                node.name
            ))),
        }
    }

    fn insert(&mut self, parent: NodeId, name: &str, entry: Entry) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        match &mut self.nodes[parent.0].entry {
            Entry::Dir(children) => {
                children.insert(name.to_string(), id);
            },
            Entry::File(_) => {
                return Err(FolioError::Vfs(format!("not a directory: {name}")));
            },
        }
        self.nodes.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            entry,
        });
        Ok(id)
    }
}

/// Names are single non-special path segments.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name == "~" || name.contains('/') {
        return Err(FolioError::Vfs(format!("invalid entry name: '{name}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `/home/me/{docs/{notes.txt}, readme.md}`, `/srv`.
    fn sample() -> Vfs {
        let mut b = VfsBuilder::new("/home/me").unwrap();
        let home = b.home();
        let docs = b.dir(home, "docs").unwrap();
        b.file(docs, "notes.txt", "n").unwrap();
        b.file(home, "readme.md", "hello").unwrap();
        b.dir(NodeId::ROOT, "srv").unwrap();
        b.build()
    }

    #[test]
    fn root_has_no_parent() {
        let vfs = sample();
        assert_eq!(vfs.node(vfs.root()).parent(), None);
        assert!(vfs.node(vfs.root()).is_dir());
    }

    #[test]
    fn tilde_resolves_home_from_anywhere() {
        let vfs = sample();
        for start in vfs.ids().filter(|id| vfs.node(*id).is_dir()) {
            assert_eq!(vfs.find_node("~", start), Some(vfs.home()));
        }
    }

    #[test]
    fn tilde_slash_prefix() {
        let vfs = sample();
        let docs = vfs.find_node("~/docs", NodeId::ROOT).unwrap();
        assert_eq!(vfs.node(docs).name(), "docs");
        assert_eq!(vfs.find_node("~/", NodeId::ROOT), Some(vfs.home()));
    }

    #[test]
    fn absolute_ignores_start() {
        let vfs = sample();
        let docs = vfs.lookup("/home/me/docs").unwrap();
        assert_eq!(vfs.find_node("/srv", docs), vfs.lookup("srv"));
    }

    #[test]
    fn dotdot_moves_to_parent_and_stops_at_root() {
        let vfs = sample();
        let docs = vfs.lookup("/home/me/docs").unwrap();
        assert_eq!(vfs.find_node("..", docs), Some(vfs.home()));
        assert_eq!(vfs.find_node("..", NodeId::ROOT), Some(NodeId::ROOT));
        assert_eq!(vfs.find_node("../../../../..", docs), Some(NodeId::ROOT));
    }

    #[test]
    fn dot_segments_are_noops() {
        let vfs = sample();
        assert_eq!(vfs.find_node("./docs/.", vfs.home()), vfs.lookup("~/docs"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let vfs = sample();
        assert_eq!(vfs.find_node("Docs", vfs.home()), None);
    }

    #[test]
    fn file_only_valid_as_last_segment() {
        let vfs = sample();
        let readme = vfs.find_node("readme.md", vfs.home()).unwrap();
        assert!(vfs.node(readme).is_file());
        assert_eq!(vfs.find_node("readme.md/x", vfs.home()), None);
        assert_eq!(vfs.find_node("readme.md/..", vfs.home()), None);
    }

    #[test]
    fn missing_segment_is_none() {
        let vfs = sample();
        assert_eq!(vfs.find_node("nope", vfs.home()), None);
        assert_eq!(vfs.find_node("/home/you", NodeId::ROOT), None);
    }

    #[test]
    fn start_at_file_is_none() {
        let vfs = sample();
        let readme = vfs.lookup("~/readme.md").unwrap();
        assert_eq!(vfs.find_node("x", readme), None);
    }

    #[test]
    fn canonical_paths() {
        let vfs = sample();
        assert_eq!(vfs.get_path(vfs.home()), "~");
        assert_eq!(vfs.get_path(NodeId::ROOT), "/");
        assert_eq!(vfs.get_path(vfs.lookup("~/docs").unwrap()), "~/docs");
        assert_eq!(vfs.get_path(vfs.lookup("/srv").unwrap()), "/srv");
        assert_eq!(vfs.get_path(vfs.lookup("/home").unwrap()), "/home");
    }

    #[test]
    fn absolute_path_expands_home() {
        let vfs = sample();
        assert_eq!(vfs.absolute_path(vfs.home()), "/home/me");
        assert_eq!(vfs.absolute_path(NodeId::ROOT), "/");
        assert_eq!(vfs.absolute_path(vfs.lookup("~/docs").unwrap()), "/home/me/docs");
    }

    #[test]
    fn every_child_points_back_to_parent() {
        let vfs = sample();
        for id in vfs.ids() {
            for (name, child) in vfs.node(id).children() {
                assert_eq!(vfs.node(child).parent(), Some(id));
                assert_eq!(vfs.node(child).name(), name);
            }
        }
    }

    #[test]
    fn duplicate_file_rejected() {
        let mut b = VfsBuilder::new("/home/me").unwrap();
        let home = b.home();
        b.file(home, "a", "1").unwrap();
        assert!(b.file(home, "a", "2").is_err());
        assert!(b.dir(home, "a").is_err());
    }

    #[test]
    fn dir_is_idempotent() {
        let mut b = VfsBuilder::new("/home/me").unwrap();
        let first = b.dir(NodeId::ROOT, "etc").unwrap();
        let second = b.dir(NodeId::ROOT, "etc").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn file_cannot_have_children() {
        let mut b = VfsBuilder::new("/home/me").unwrap();
        let home = b.home();
        let f = b.file(home, "f", "x").unwrap();
        assert!(b.file(f, "g", "y").is_err());
    }

    #[test]
    fn invalid_names_rejected() {
        let mut b = VfsBuilder::new("/home/me").unwrap();
        for bad in ["", ".", "..", "~", "a/b"] {
            assert!(b.dir(NodeId::ROOT, bad).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn home_must_be_absolute_and_not_root() {
        assert!(VfsBuilder::new("home/me").is_err());
        assert!(VfsBuilder::new("/").is_err());
    }

    #[test]
    fn computed_content_evaluated_per_read() {
        use std::cell::Cell;
        use std::rc::Rc;

        let counter = Rc::new(Cell::new(0));
        let seen = Rc::clone(&counter);
        let mut b = VfsBuilder::new("/home/me").unwrap();
        let home = b.home();
        let id = b
            .file(
                home,
                "count",
                FileContent::computed(move || {
                    seen.set(seen.get() + 1);
                    seen.get().to_string()
                }),
            )
            .unwrap();
        let vfs = b.build();
        assert_eq!(vfs.read(id).as_deref(), Some("1"));
        assert_eq!(vfs.read(id).as_deref(), Some("2"));
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn read_directory_is_none() {
        let vfs = sample();
        assert_eq!(vfs.read(vfs.home()), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn random_tree(paths: &[Vec<String>]) -> Vfs {
            let mut b = VfsBuilder::new("/home/me").unwrap();
            for path in paths {
                let mut current = if path.len() % 2 == 0 {
                    b.home()
                } else {
                    NodeId::ROOT
                };
                for seg in path {
                    current = b.dir(current, seg).unwrap();
                }
            }
            b.build()
        }

        proptest! {
            #[test]
            fn canonical_path_round_trips(
                paths in proptest::collection::vec(
                    proptest::collection::vec("[a-z]{1,4}", 1..4),
                    0..8,
                ),
            ) {
                let vfs = random_tree(&paths);
                for id in vfs.ids() {
                    let path = vfs.get_path(id);
                    prop_assert_eq!(vfs.find_node(&path, NodeId::ROOT), Some(id), "path {}", path);
                }
            }

            #[test]
            fn dotdot_is_parent(
                paths in proptest::collection::vec(
                    proptest::collection::vec("[a-z]{1,4}", 1..4),
                    0..8,
                ),
            ) {
                let vfs = random_tree(&paths);
                for id in vfs.ids() {
                    let expected = vfs.node(id).parent().unwrap_or(NodeId::ROOT);
                    prop_assert_eq!(vfs.find_node("..", id), Some(expected));
                }
            }
        }
    }
}
