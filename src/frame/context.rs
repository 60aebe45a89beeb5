//! Frame: the per-request element tree and everything accumulated with it.

use std::path::Path;

use tracing::trace;

use super::extension::{render_extensions, Extension, ExtensionKind};
use super::ids::IdAllocator;
use super::request::Services;
use super::swap::SwapRequest;
use crate::config::UiConfig;
use crate::dom::{ElementData, ElementId, Tree};
use crate::element::style::Style;
use crate::element::{ElementMut, ElementSpec};
use crate::error::{Result, UiError};

/// Request-scoped render context.
///
/// A frame owns the element arena, the construction cursor, the id
/// allocator and everything collected while building: inline scripts,
/// extension assets, out-of-band elements and page metadata. It renders
/// exactly once; after [`render`](Self::render) the tree is gone.
pub struct Frame {
    tree: Tree,
    cursor: Vec<ElementId>,
    ids: IdAllocator,
    pub(crate) scripts: Vec<String>,
    extensions: Vec<Extension>,
    pub(crate) oob: Vec<ElementId>,
    title: Option<String>,
    description: Option<String>,
    pub(crate) services: Services,
    pub(crate) rendered: bool,
}

impl Frame {
    /// Create a frame for one request.
    pub fn new(services: Services, swap: Option<SwapRequest>) -> Self {
        let ids = IdAllocator::new(services.config.id_prefix.clone(), swap);
        Self {
            tree: Tree::new(),
            cursor: Vec::new(),
            ids,
            scripts: Vec::new(),
            extensions: Vec::new(),
            oob: Vec::new(),
            title: None,
            description: None,
            services,
            rendered: false,
        }
    }

    /// A frame with default services and no swap request.
    pub fn standalone() -> Self {
        Self::new(Services::default(), None)
    }

    pub fn config(&self) -> &UiConfig {
        &self.services.config
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// The partial-update signal this frame answers, if any.
    pub fn swap(&self) -> Option<&SwapRequest> {
        self.ids.swap()
    }

    /// Next DOM id in construction order.
    pub fn allocate_id(&mut self) -> String {
        self.ids.allocate()
    }

    // ── Construction ─────────────────────────────────────────────────

    /// Construct an element under the current cursor, or as a new root.
    pub fn create(&mut self, spec: impl Into<ElementSpec>) -> ElementMut<'_> {
        let spec = spec.into();
        let dom_id = match spec.fixed_id {
            Some(id) => id,
            None => self.ids.allocate(),
        };

        let mut data = ElementData::new(spec.tag, spec.kind);
        data.attributes.set("id", dom_id);
        for (key, value) in spec.attrs {
            data.attributes.set(key, value);
        }
        data.oob = spec.oob;
        data.render_html = spec.render_html;
        data.style = Style::new(spec.style);
        data.style.apply_classes(&mut data.attributes, "");
        if let Some(content) = spec.content {
            data.set_content(&content);
        }

        let oob = data.oob;
        let id = match self.cursor.last() {
            Some(&parent) => self.tree.insert_child(parent, data),
            None => self.tree.insert_root(data),
        };
        if oob {
            self.oob.push(id);
        }
        ElementMut::new(self, id)
    }

    /// Construct a plain element.
    pub fn element(&mut self, tag: &str) -> ElementMut<'_> {
        self.create(ElementSpec::new(tag))
    }

    /// Construct a plain element with escaped text content.
    pub fn text(&mut self, tag: &str, content: &str) -> ElementMut<'_> {
        self.create(ElementSpec::new(tag).content(content))
    }

    /// Mutation handle for an existing element.
    pub fn element_mut(&mut self, id: ElementId) -> Result<ElementMut<'_>> {
        if !self.tree.contains(id) {
            return Err(UiError::UnknownElement(id));
        }
        Ok(ElementMut::new(self, id))
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.tree.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.tree.get_mut(id)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Top-level elements in construction order.
    pub fn roots(&self) -> &[ElementId] {
        self.tree.roots()
    }

    /// Element carrying the given DOM id.
    pub fn find(&self, dom_id: &str) -> Option<ElementId> {
        self.tree.query_by_dom_id(dom_id)
    }

    // ── Cursor ───────────────────────────────────────────────────────

    pub(crate) fn push_cursor(&mut self, id: ElementId) {
        self.cursor.push(id);
    }

    pub(crate) fn pop_cursor(&mut self) -> Option<ElementId> {
        self.cursor.pop()
    }

    /// Make `id` the element new elements attach to.
    ///
    /// The element may live anywhere in the tree; [`close`](Self::close)
    /// restores whatever was open before.
    pub fn open(&mut self, id: ElementId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(UiError::UnknownElement(id));
        }
        self.push_cursor(id);
        Ok(())
    }

    /// Close the most recently opened element.
    pub fn close(&mut self) -> Option<ElementId> {
        self.pop_cursor()
    }

    /// Build children of `id` inside `f`, restoring the cursor afterwards.
    ///
    /// Anything `f` opened and left open is closed as well, so an early
    /// return from `f` cannot leak an open element.
    pub fn within<R>(&mut self, id: ElementId, f: impl FnOnce(&mut Frame) -> R) -> Result<R> {
        let depth = self.cursor_depth();
        self.open(id)?;
        let result = f(self);
        self.truncate_cursor(depth);
        Ok(result)
    }

    /// The currently open element.
    pub fn current(&self) -> Option<ElementId> {
        self.cursor.last().copied()
    }

    pub(crate) fn cursor_depth(&self) -> usize {
        self.cursor.len()
    }

    /// Close everything opened past `depth`.
    pub(crate) fn truncate_cursor(&mut self, depth: usize) {
        if self.cursor.len() > depth {
            trace!(unclosed = self.cursor.len() - depth, "closing elements left open");
            self.cursor.truncate(depth);
        }
    }

    /// Move pending out-of-band elements under `host` as regular children.
    ///
    /// Used when a full document renders and the side channel is a real
    /// element of the page.
    pub(crate) fn absorb_oob(&mut self, host: ElementId) {
        for id in std::mem::take(&mut self.oob) {
            if self.tree.reparent(id, host) {
                if let Some(data) = self.tree.get_mut(id) {
                    data.oob = false;
                }
            }
        }
    }

    /// Move `node` and its subtree to the end of `parent`'s children.
    pub fn adopt(&mut self, node: ElementId, parent: ElementId) -> Result<()> {
        for id in [node, parent] {
            if !self.tree.contains(id) {
                return Err(UiError::UnknownElement(id));
            }
        }
        if !self.tree.reparent(node, parent) {
            return Err(UiError::InvalidArgument(
                "an element cannot be moved into its own subtree".to_owned(),
            ));
        }
        trace!(?node, ?parent, "element reparented");
        Ok(())
    }

    // ── Accumulated output ───────────────────────────────────────────

    /// Queue an inline script, emitted after the rendered tree.
    pub fn add_script(&mut self, script: impl Into<String>) {
        self.scripts.push(script.into());
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Register a CSS or JS asset owned by an element kind.
    ///
    /// The asset is served under
    /// `<static>/extension/<version>/<owner>/<file>`. Adding the same asset
    /// twice keeps a single reference. Returns the endpoint.
    pub fn add_extension(&mut self, owner: &str, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let kind = ExtensionKind::from_path(path)?;
        let file = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| UiError::UnsupportedExtension(path.display().to_string()))?;

        let endpoint = format!(
            "{}/extension/{}/{owner}/{file}",
            self.services.config.static_prefix, self.services.config.version
        );
        self.services
            .assets
            .register(format!("{owner}/{file}"), path.to_path_buf());
        if !self.extensions.iter().any(|ext| ext.endpoint == endpoint) {
            self.extensions.push(Extension {
                endpoint: endpoint.clone(),
                kind,
            });
        }
        Ok(endpoint)
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Extension tags as `(scripts, stylesheets)`.
    pub fn render_extensions(&self) -> (String, String) {
        render_extensions(&self.extensions)
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_meta_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether [`render`](Self::render) already ran.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub(crate) fn teardown(&mut self) {
        self.tree.clear();
        self.cursor.clear();
        self.oob.clear();
        self.scripts.clear();
        self.rendered = true;
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("elements", &self.tree.len())
            .field("cursor", &self.cursor)
            .field("ids", &self.ids)
            .field("scripts", &self.scripts.len())
            .field("extensions", &self.extensions)
            .field("rendered", &self.rendered)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
