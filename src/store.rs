//! Store Module
//!
//! The root handle that ties the page cache to the keyed leaf.
//!
//! ## Responsibilities
//! - Load the root page on open
//! - Route insert/lookup/iterate to the leaf layout
//! - Flush the owning page after every successful insert
//! - Flush all resident pages on close

use std::fmt;
use std::path::Path;

use crate::btree::{Geometry, Insertion, LeafNode, LeafNodeMut, Records};
use crate::config::Config;
use crate::error::{LeafError, Result};
use crate::pager::{PageId, Pager, PAGE_SIZE};

/// An open key-value store
///
/// Owns its pager; the pager owns its page buffers. Every store holds
/// values of exactly one length, fixed by the geometry given to `open`.
pub struct Store {
    /// Page number of the active node (always the root leaf today)
    node: PageId,

    /// Page cache and backing file
    pager: Pager,

    /// Levels above the leaf; reserved for multi-level trees
    height: u32,

    /// Layout parameters for the stored value type
    geometry: Geometry,
}

impl Store {
    /// Page number of the root node
    const ROOT_PAGE: PageId = 0;

    /// Open a store over an already opened pager
    ///
    /// Loads page 0. Its leading page-number field doubles as the initial
    /// height, which is 0 for the single-leaf layout.
    pub fn open(mut pager: Pager, geometry: Geometry) -> Result<Self> {
        let page = pager.get(Self::ROOT_PAGE)?;
        let height = LeafNode::new(&page[..], geometry)?.page_number();

        tracing::info!(
            path = %pager.path().display(),
            pages = pager.page_count(),
            no_pairs = geometry.no_pairs(),
            value_length = geometry.value_length(),
            "Opened store"
        );

        Ok(Self {
            node: Self::ROOT_PAGE,
            pager,
            height,
            geometry,
        })
    }

    /// Open the pager described by `config` and the store on top of it
    pub fn open_with_config(config: &Config, value_length: usize) -> Result<Self> {
        let geometry = Geometry::new(value_length)?;
        let pager = Pager::open(config)?;
        Self::open(pager, geometry)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: &Path, value_length: usize) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open_with_config(&config, value_length)
    }

    /// Insert a key/value pair and flush the owning page
    ///
    /// Returns `DuplicateKey` for a key already present and `NodeFull`
    /// once the leaf has no free slot; neither modifies the page.
    pub fn insert(&mut self, key: u32, value: &[u8]) -> Result<()> {
        let page = self.pager.get(self.node)?;
        let mut node = LeafNodeMut::new(&mut page[..], self.geometry)?;

        match node.insert(key, value)? {
            Insertion::Inserted { slot } => {
                // The header word is the height, not the page location
                tracing::debug!(key, slot, page = self.node, "Inserted key");
                self.pager.flush(self.node, PAGE_SIZE)
            }
            Insertion::Full => self.split_leaf(key),
        }
    }

    /// Look up the value stored under `key`
    pub fn lookup(&self, key: u32) -> Result<Option<&[u8]>> {
        self.node()?.lookup(key)
    }

    /// All values, in ascending key order
    pub fn iterate_all(&self) -> Result<Records<'_>> {
        self.node()?.iterate()
    }

    /// Diagnostics snapshot of the geometry and the root leaf
    pub fn dump(&self) -> Result<TreeDump> {
        let node = self.node()?;
        Ok(TreeDump {
            k: self.geometry.k(),
            max_keys: self.geometry.max_keys(),
            value_length: self.geometry.value_length(),
            no_pairs: self.geometry.no_pairs(),
            height: self.height,
            leaf_page: self.node,
            keys: node.keys()?,
        })
    }

    /// Close the store, writing back every resident page
    pub fn close(mut self) -> Result<()> {
        self.pager.flush_all()?;
        self.pager.sync()?;

        tracing::info!(path = %self.pager.path().display(), "Closed store");
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Read-only view of the active node
    fn node(&self) -> Result<LeafNode<'_>> {
        let page = self
            .pager
            .page(self.node)
            .ok_or(LeafError::MissingPage { page: self.node })?;
        LeafNode::new(&page[..], self.geometry)
    }

    /// Overflow path for a full leaf
    ///
    /// A multi-page tree would split the leaf here and grow `height`;
    /// until then the insert is refused and the page stays as it was.
    fn split_leaf(&mut self, key: u32) -> Result<()> {
        tracing::warn!(
            key,
            page = self.node,
            no_pairs = self.geometry.no_pairs(),
            "Leaf is full, refusing insert"
        );
        Err(LeafError::NodeFull { page: self.node })
    }
}

/// Geometry and root-leaf snapshot for the `.btree` diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDump {
    pub k: usize,
    pub max_keys: usize,
    pub value_length: usize,
    pub no_pairs: usize,
    pub height: u32,
    pub leaf_page: PageId,
    pub keys: Vec<u32>,
}

impl fmt::Display for TreeDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "k={}", self.k)?;
        writeln!(f, "maximum keys={}", self.max_keys)?;
        writeln!(f, "value length={}", self.value_length)?;
        writeln!(f, "no_pairs={} (values per one page)", self.no_pairs)?;
        writeln!(f, "height={}", self.height)?;
        writeln!(f)?;
        writeln!(f, "leaf node {}", self.leaf_page)?;

        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "keys=[{}]", keys.join(", "))
    }
}
