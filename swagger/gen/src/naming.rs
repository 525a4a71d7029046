//! Definition naming.
//!
//! Definition names are the UpperCamelCase form of a node's local name.
//! [`NameRegistry`] keeps them unique across a generation run: a name already
//! claimed by a different node is qualified with ancestor names, innermost
//! first, and finally with a numeric suffix.

use std::collections::{HashMap, HashSet};

use swagger_define::SchemaPath;

/// Converts a schema identifier to UpperCamelCase.
///
/// ## Examples
///
/// ```
/// use swagger_gen::naming::camel_case;
///
/// assert_eq!(camel_case("evc-id"), "EvcId");
/// assert_eq!(camel_case("interface"), "Interface");
/// assert_eq!(camel_case("ip_v4.address"), "IpV4Address");
/// ```
pub fn camel_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Ancestor names of `path` usable as name qualifiers, outermost first.
///
/// The innermost name and the `grouping` marker of grouping paths are left
/// out.
pub fn qualifiers(path: &SchemaPath) -> Vec<String> {
    let names = path.names();
    let Some((_, ancestors)) = names.split_last() else {
        return Vec::new();
    };
    ancestors
        .iter()
        .enumerate()
        .filter(|(i, name)| !(*i == 1 && name.as_str() == "grouping"))
        .map(|(_, name)| name.clone())
        .collect()
}

/// Unique definition names keyed by schema path.
#[derive(Debug, Default)]
pub struct NameRegistry {
    assigned: HashMap<SchemaPath, String>,
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name previously assigned to `key`.
    pub fn get(&self, key: &SchemaPath) -> Option<&str> {
        self.assigned.get(key).map(String::as_str)
    }

    /// Assigns a name to `key`, or returns the one it already has.
    ///
    /// `qualifiers` are ancestor names, outermost first.
    pub fn assign(&mut self, key: &SchemaPath, base: &str, qualifiers: &[String]) -> String {
        if let Some(name) = self.assigned.get(key) {
            return name.clone();
        }

        let mut candidate = base.to_string();
        let mut outer = qualifiers.iter().rev();
        while self.taken.contains(&candidate) {
            match outer.next() {
                Some(qualifier) => candidate = format!("{}{}", camel_case(qualifier), candidate),
                None => break,
            }
        }

        if self.taken.contains(&candidate) {
            let stem = candidate.clone();
            let mut n = 2;
            while self.taken.contains(&candidate) {
                candidate = format!("{stem}{n}");
                n += 1;
            }
        }

        self.taken.insert(candidate.clone());
        self.assigned.insert(key.clone(), candidate.clone());
        candidate
    }
}
