//! Rendering explanations as indented trees.

use ravel_stack::ensure_sufficient_stack;

use crate::{JustificationError, JustificationId, JustificationKind, JustificationRegistry};

const NEWLINE_DASH: &str = "\n|-";
const NEWLINE_INDENT: &str = "\n| ";

impl JustificationRegistry {
    /// `describe()` followed by the descriptions of the direct supporters.
    pub fn explain(&self, id: JustificationId) -> Result<String, JustificationError> {
        let node = self.get(id)?;
        let mut description = node.describe();
        if !node.supporters().is_empty() {
            let reasons: Vec<String> = node
                .supporters()
                .iter()
                .map(|&supporter| self.node(supporter).describe())
                .collect();
            description.push_str(" because ");
            description.push_str(&reasons.join(", and "));
        }
        Ok(description)
    }

    /// The node and its direct supporters, each on its own `| ` line.
    pub fn explain_one_level(&self, id: JustificationId) -> Result<String, JustificationError> {
        let node = self.get(id)?;
        let mut description = node.describe_with_id();
        if !node.supporters().is_empty() {
            description.push_str(" because");
        }
        for &supporter in node.supporters() {
            for line in self.node(supporter).describe_with_id().split('\n') {
                description.push_str(NEWLINE_INDENT);
                description.push_str(line);
            }
        }
        Ok(description)
    }

    /// Render the explanation tree rooted at `id`.
    ///
    /// `max_depth` of `None` renders the whole tree. At depth zero a node with
    /// causes is cut off with a `(more)` marker.
    ///
    /// ```text
    /// - (#4) top because
    /// |-- (#3) middle because
    /// | |-- (#0) a
    /// | |
    /// | |-- (#1) b
    /// |
    /// |-- (#2) c
    /// ```
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn explain_recursive(
        &self,
        id: JustificationId,
        max_depth: Option<usize>,
    ) -> Result<String, JustificationError> {
        let node = self.get(id)?;
        let mut description = node.describe_with_id();

        if max_depth == Some(0) {
            if !node.supporters().is_empty() {
                description.push_str(" because");
                description.push_str(NEWLINE_DASH);
                description.push_str(" (more)");
            }
            return Ok(description);
        }

        let children = self.interesting_children(id)?;
        if !children.is_empty() {
            description.push_str(" because");
        }
        let child_depth = max_depth.map(|depth| depth - 1);
        let calling = match node.kind() {
            JustificationKind::Full { calling, .. } => Some(*calling),
            _ => None,
        };

        for (index, &child) in children.iter().enumerate() {
            if index > 0 {
                description.push_str(NEWLINE_INDENT);
            }
            let rendered = ensure_sufficient_stack(|| self.explain_recursive(child, child_depth))?;
            match calling {
                Some(calling) => {
                    description.push_str(NEWLINE_DASH);
                    description.push_str(if child == calling {
                        "Called because"
                    } else {
                        "True because"
                    });
                    for line in rendered.split('\n') {
                        description.push_str(NEWLINE_INDENT);
                        description.push_str(line);
                    }
                }
                None => {
                    for (line_index, line) in rendered.split('\n').enumerate() {
                        description.push_str(if line_index == 0 {
                            NEWLINE_DASH
                        } else {
                            NEWLINE_INDENT
                        });
                        description.push_str(line);
                    }
                }
            }
        }
        Ok(description)
    }
}
