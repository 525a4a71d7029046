//! Operation tag strategies.
//!
//! Tags group operations in Swagger tooling. A [`TagGenerator`] derives tags
//! from the segment an operation belongs to; the path strategy applies every
//! registered generator in turn.

use crate::segment::PathSegment;

/// Derives tags for the operations of one segment.
pub trait TagGenerator {
    fn tags(&self, segment: &PathSegment) -> Vec<String>;
}

/// Tags operations with the module owning their segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleTagGenerator;

impl TagGenerator for ModuleTagGenerator {
    fn tags(&self, segment: &PathSegment) -> Vec<String> {
        if segment.module().is_empty() {
            Vec::new()
        } else {
            vec![segment.module().to_string()]
        }
    }
}

/// Tags operations with their leading segment names.
///
/// ## Examples
///
/// ```
/// use swagger_gen::segment::PathSegment;
/// use swagger_gen::tags::{SegmentTagGenerator, TagGenerator};
///
/// let leaf = PathSegment::root("m")
///     .push("system", "m", false, &[])
///     .push("dns", "m", false, &[])
///     .push("server", "m", false, &[]);
///
/// assert_eq!(SegmentTagGenerator::new(1).tags(&leaf), vec!["system".to_string()]);
/// assert_eq!(SegmentTagGenerator::new(2).tags(&leaf), vec!["system.dns".to_string()]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SegmentTagGenerator {
    depth: usize,
}

impl SegmentTagGenerator {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
        }
    }
}

impl Default for SegmentTagGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TagGenerator for SegmentTagGenerator {
    fn tags(&self, segment: &PathSegment) -> Vec<String> {
        let names: Vec<&str> = segment
            .segments()
            .into_iter()
            .take(self.depth)
            .map(PathSegment::name)
            .collect();

        if names.is_empty() {
            Vec::new()
        } else {
            vec![names.join(".")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_tag_uses_segment_module() {
        let seg = PathSegment::root("acme").push("ext", "other", false, &[]);
        assert_eq!(ModuleTagGenerator.tags(&seg), vec!["other".to_string()]);
    }

    #[test]
    fn segment_tag_on_root_is_empty() {
        let root = PathSegment::root("acme");
        assert!(SegmentTagGenerator::default().tags(&root).is_empty());
    }

    #[test]
    fn segment_tag_depth_is_capped_by_path_length() {
        let seg = PathSegment::root("acme").push("a", "acme", false, &[]);
        assert_eq!(SegmentTagGenerator::new(5).tags(&seg), vec!["a".to_string()]);
    }
}
