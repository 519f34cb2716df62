//! Stable node addresses for the tree view.

use std::fmt;

use anyhow::bail;

use crate::value::JsonValue;

/// One step from a node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// The address of a node: the key/index segments from the root. The root is
/// the empty path. Displayed as an RFC 6901 JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TreePath(Vec<Segment>);

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Nesting depth; the root is 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn child_key(&self, key: &str) -> TreePath {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        TreePath(segments)
    }

    pub fn child_index(&self, index: usize) -> TreePath {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        TreePath(segments)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => {
                    write!(f, "/{}", key.replace('~', "~0").replace('/', "~1"))?;
                }
                Segment::Index(index) => write!(f, "/{index}")?,
            }
        }
        Ok(())
    }
}

/// Resolve an RFC 6901 JSON pointer against `root`, producing the typed path
/// of the addressed node along with the node itself.
pub fn resolve_pointer<'v>(
    root: &'v JsonValue,
    pointer: &str,
) -> anyhow::Result<(TreePath, &'v JsonValue)> {
    if pointer.is_empty() {
        return Ok((TreePath::root(), root));
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        bail!("JSON pointer `{pointer}` must be empty or start with `/`");
    };

    let mut path = TreePath::root();
    let mut current = root;
    for token in rest.split('/') {
        let token = token.replace("~1", "/").replace("~0", "~");
        match current {
            JsonValue::Object(members) => {
                let Some(next) = members.get(token.as_str()) else {
                    bail!("no member \"{token}\" in object at `{path}`");
                };
                path = path.child_key(&token);
                current = next;
            }
            JsonValue::Array(elems) => {
                let Ok(index) = token.parse::<usize>() else {
                    bail!("`{token}` is not an index into the array at `{path}`");
                };
                if index >= elems.len() {
                    bail!(
                        "index {index} is out of bounds for the array at `{path}` ({} elements)",
                        elems.len()
                    );
                }
                path = path.child_index(index);
                current = &elems[index];
            }
            other => {
                bail!("cannot descend into {} value at `{path}`", other.kind_desc());
            }
        }
    }
    Ok((path, current))
}
