//! Path segments of the generated resource hierarchy.
//!
//! A [`PathSegment`] is one level of the resource path. Traversal pushes a
//! segment when it enters a container, list or rpc and drops it when it
//! leaves, so only the chain from the module root to the active segment is
//! alive at any time. Segments are immutable and shared through [`Rc`]; a
//! child holds its parent, never the other way round.
//!
//! ## Examples
//!
//! ```
//! use swagger_gen::segment::PathSegment;
//!
//! let root = PathSegment::root("acme");
//! let interfaces = root.push("interfaces", "acme", false, &[]);
//! let interface = interfaces.push("interface", "acme", true, &["name".to_string()]);
//!
//! assert!(interface.is_read_only());
//! assert_eq!(interface.params(), vec!["name".to_string()]);
//! assert_eq!(interface.pop().unwrap().name(), "interfaces");
//! ```

use std::rc::Rc;

/// One level of the resource path.
#[derive(Debug)]
pub struct PathSegment {
    name: String,
    module: String,
    read_only: bool,
    keys: Vec<String>,
    params: Vec<String>,
    parent: Option<Rc<PathSegment>>,
}

impl PathSegment {
    /// Creates the root of a module's hierarchy.
    pub fn root(module: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: String::new(),
            module: module.into(),
            read_only: false,
            keys: Vec::new(),
            params: Vec::new(),
            parent: None,
        })
    }

    /// Enters a child level.
    ///
    /// The child is read-only if either `read_only` is set or this segment
    /// is read-only. A non-empty `keys` slice makes it a list segment with
    /// one path parameter per key.
    pub fn push(
        self: &Rc<Self>,
        name: impl Into<String>,
        module: impl Into<String>,
        read_only: bool,
        keys: &[String],
    ) -> Rc<Self> {
        let name = name.into();
        let mut taken = self.params();
        let mut params = Vec::with_capacity(keys.len());

        for key in keys {
            let param = unique_param(&name, key, &taken);
            taken.push(param.clone());
            params.push(param);
        }

        Rc::new(Self {
            name,
            module: module.into(),
            read_only: read_only || self.read_only,
            keys: keys.to_vec(),
            params,
            parent: Some(Rc::clone(self)),
        })
    }

    /// Leaves this level, returning the parent.
    ///
    /// Returns `None` for a root segment.
    pub fn pop(self: Rc<Self>) -> Option<Rc<Self>> {
        self.parent.clone()
    }

    /// Local name (empty for the root).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Effective read-only flag.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_list(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn parent(&self) -> Option<&Rc<PathSegment>> {
        self.parent.as_ref()
    }

    /// Key leaf names of a list segment.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Path parameters introduced by this segment.
    pub fn local_params(&self) -> &[String] {
        &self.params
    }

    /// All path parameters from the root down to this segment.
    pub fn params(&self) -> Vec<String> {
        let mut params = Vec::new();
        for segment in self.chain() {
            params.extend(segment.params.iter().cloned());
        }
        params
    }

    /// Non-root segments from the root down to this one.
    pub fn segments(&self) -> Vec<&PathSegment> {
        self.chain().into_iter().filter(|s| !s.is_root()).collect()
    }

    /// Number of non-root segments up to this one.
    pub fn depth(&self) -> usize {
        self.segments().len()
    }

    fn chain(&self) -> Vec<&PathSegment> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }
}

fn unique_param(segment: &str, key: &str, taken: &[String]) -> String {
    let is_free = |candidate: &str| !taken.iter().any(|t| t == candidate);

    if is_free(key) {
        return key.to_string();
    }

    let qualified = format!("{segment}-{key}");
    if is_free(&qualified) {
        return qualified;
    }

    (2..)
        .map(|n| format!("{qualified}-{n}"))
        .find(|candidate| is_free(candidate))
        .unwrap_or(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn root_has_no_segments_or_params() {
        let root = PathSegment::root("m");
        assert!(root.is_root());
        assert_eq!(root.module(), "m");
        assert!(root.segments().is_empty());
        assert!(root.params().is_empty());
        assert!(root.pop().is_none());
    }

    #[test]
    fn read_only_propagates_to_descendants() {
        let root = PathSegment::root("m");
        let state = root.push("state", "m", true, &[]);
        let child = state.push("counters", "m", false, &[]);
        assert!(child.is_read_only());

        let config = root.push("config", "m", false, &[]);
        assert!(!config.is_read_only());
    }

    #[test]
    fn segments_run_root_to_leaf() {
        let root = PathSegment::root("m");
        let c = root.push("a", "m", false, &[]).push("b", "m", false, &[]).push("c", "m", false, &[]);
        let names: Vec<_> = c.segments().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn clashing_keys_are_qualified_with_segment_name() {
        let root = PathSegment::root("m");
        let outer = root.push("outer", "m", false, &keys(&["name"]));
        let inner = outer.push("inner", "m", false, &keys(&["name", "id"]));
        assert_eq!(inner.local_params(), keys(&["inner-name", "id"]));
        assert_eq!(inner.params(), keys(&["name", "inner-name", "id"]));
    }

    #[test]
    fn repeated_clashes_get_numeric_suffix() {
        let root = PathSegment::root("m");
        let a = root.push("x", "m", false, &keys(&["id"]));
        let b = a.push("x", "m", false, &keys(&["id"]));
        let c = b.push("x", "m", false, &keys(&["id"]));
        assert_eq!(c.params(), keys(&["id", "x-id", "x-id-2"]));
    }

    #[test]
    fn pop_returns_parent_and_releases_child() {
        let root = PathSegment::root("m");
        let child = root.push("a", "m", false, &[]);
        assert_eq!(Rc::strong_count(&root), 2);

        let parent = child.pop().unwrap();
        assert!(Rc::ptr_eq(&parent, &root));
        drop(parent);
        assert_eq!(Rc::strong_count(&root), 1);
    }
}
