//! The append-only justification arena.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::justification::Supporters;
use crate::{Justification, JustificationError, JustificationId, JustificationKind, SourceLoc};

/// Every justification created during one interpreter session.
///
/// Ids index directly into the arena, so lookup by id is O(1).
#[derive(Debug, Default)]
pub struct JustificationRegistry {
    nodes: Vec<Justification>,
}

impl JustificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The id the next registered node will receive.
    pub fn next_id(&self) -> JustificationId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a session creating over u32::MAX justifications has long exhausted memory"
        )]
        let raw = self.nodes.len() as u32;
        JustificationId::new(raw)
    }

    /// Register a node supported by `supporters`.
    ///
    /// Fails if any supporter does not already exist, which is exactly the
    /// case where its id would not be smaller than the new node's.
    /// Without an explicit `location`, the node inherits the first located
    /// supporter's.
    pub fn add(
        &mut self,
        kind: JustificationKind,
        supporters: impl IntoIterator<Item = JustificationId>,
        location: Option<SourceLoc>,
    ) -> Result<JustificationId, JustificationError> {
        let id = self.next_id();
        let supporters: Supporters = supporters.into_iter().collect();
        let mut location = location;
        for &supporter in &supporters {
            if supporter >= id {
                return Err(JustificationError::InvariantViolation {
                    supporter,
                    supportee: id,
                });
            }
            if location.is_none() {
                location = self.nodes[supporter.index()].location;
            }
        }
        tracing::trace!(%id, supporters = supporters.len(), "new justification");
        self.nodes.push(Justification {
            id,
            kind,
            supporters,
            interesting: true,
            location,
        });
        Ok(id)
    }

    /// An axiom.
    pub fn text(&mut self, message: impl Into<String>) -> JustificationId {
        self.push_leaf(JustificationKind::text(message))
    }

    /// "No explanation tracked".
    pub fn unknown(&mut self) -> JustificationId {
        self.push_leaf(JustificationKind::Unknown)
    }

    fn push_leaf(&mut self, kind: JustificationKind) -> JustificationId {
        let id = self.next_id();
        self.nodes.push(Justification {
            id,
            kind,
            supporters: Supporters::new(),
            interesting: true,
            location: None,
        });
        id
    }

    /// A description supported by all of `supporters`.
    pub fn and(
        &mut self,
        description: impl Into<String>,
        supporters: impl IntoIterator<Item = JustificationId>,
    ) -> Result<JustificationId, JustificationError> {
        self.add(JustificationKind::and(description), supporters, None)
    }

    /// Like [`and`](Self::and), tagged with the location that produced it.
    pub fn and_at(
        &mut self,
        description: impl Into<String>,
        supporters: impl IntoIterator<Item = JustificationId>,
        location: SourceLoc,
    ) -> Result<JustificationId, JustificationError> {
        self.add(JustificationKind::and(description), supporters, Some(location))
    }

    /// `item` equals `value`, because of `supporter`.
    pub fn equal(
        &mut self,
        item: impl Into<String>,
        value: impl Into<String>,
        supporter: JustificationId,
    ) -> Result<JustificationId, JustificationError> {
        self.add(JustificationKind::equal(item, value), [supporter], None)
    }

    /// `name = value` at `location`, called because of `calling`, with
    /// `values` as the causes of the value.
    pub fn full(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        location: SourceLoc,
        calling: JustificationId,
        values: impl IntoIterator<Item = JustificationId>,
    ) -> Result<JustificationId, JustificationError> {
        let values: SmallVec<[JustificationId; 2]> = values.into_iter().collect();
        let supporters: Supporters = std::iter::once(calling).chain(values.iter().copied()).collect();
        self.add(
            JustificationKind::Full {
                name: name.into(),
                value: value.into(),
                calling,
                values,
            },
            supporters,
            Some(location),
        )
    }

    /// Look a node up by id.
    pub fn get(&self, id: JustificationId) -> Result<&Justification, JustificationError> {
        self.nodes
            .get(id.index())
            .ok_or(JustificationError::UnknownJustification { id: id.raw() })
    }

    /// Look a node up by the number a user typed.
    pub fn lookup(&self, raw: u32) -> Result<&Justification, JustificationError> {
        self.get(JustificationId::new(raw))
    }

    /// Hide a node from explanations; its interesting causes take its place.
    ///
    /// The flag only affects rendering, never the graph's edges.
    pub fn mark_boring(&mut self, id: JustificationId) -> Result<(), JustificationError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(JustificationError::UnknownJustification { id: id.raw() })?;
        node.interesting = false;
        Ok(())
    }

    /// Node by id; callers only hold ids this registry handed out.
    pub(crate) fn node(&self, id: JustificationId) -> &Justification {
        &self.nodes[id.index()]
    }

    /// The causes an explanation of `id` lists directly.
    ///
    /// Boring supporters are transparent: their own interesting descendants
    /// are listed in their place. Each node appears once, in the order a
    /// depth-first walk of the supporter lists first reaches it.
    pub fn interesting_children(
        &self,
        id: JustificationId,
    ) -> Result<Vec<JustificationId>, JustificationError> {
        let root = self.get(id)?;
        let mut children = Vec::new();
        let mut listed = FxHashSet::default();
        let mut expanded = FxHashSet::default();
        let mut pending: Vec<JustificationId> =
            root.display_supporters().iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            let node = self.node(next);
            if node.interesting {
                if listed.insert(next) {
                    children.push(next);
                }
            } else if expanded.insert(next) {
                pending.extend(node.display_supporters().iter().rev().copied());
            }
        }
        Ok(children)
    }
}
