//! Justification nodes.

use smallvec::SmallVec;

use crate::{JustificationId, SourceLoc};

/// Supporter lists are short: most nodes have one to three causes.
pub(crate) type Supporters = SmallVec<[JustificationId; 4]>;

/// What a justification asserts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JustificationKind {
    /// A fixed message with no causes (an axiom: a literal, an input, a built-in).
    Text { message: String },
    /// "No explanation tracked", for opaque host operations.
    Unknown,
    /// A description supported by a conjunction of causes.
    And { description: String },
    /// `item` equals the literal `value`.
    Equal { item: String, value: String },
    /// `name = value`, computed at a location because of `calling`, with
    /// `values` supplying the operands.
    Full {
        name: String,
        value: String,
        calling: JustificationId,
        values: SmallVec<[JustificationId; 2]>,
    },
}

impl JustificationKind {
    pub fn text(message: impl Into<String>) -> Self {
        JustificationKind::Text {
            message: message.into(),
        }
    }

    pub fn and(description: impl Into<String>) -> Self {
        JustificationKind::And {
            description: description.into(),
        }
    }

    pub fn equal(item: impl Into<String>, value: impl Into<String>) -> Self {
        JustificationKind::Equal {
            item: item.into(),
            value: value.into(),
        }
    }
}

/// One node of the justification graph.
///
/// Immutable once registered, except for the display-only `interesting` flag.
#[derive(Clone, Debug)]
pub struct Justification {
    pub(crate) id: JustificationId,
    pub(crate) kind: JustificationKind,
    pub(crate) supporters: Supporters,
    pub(crate) interesting: bool,
    pub(crate) location: Option<SourceLoc>,
}

impl Justification {
    #[inline]
    pub fn id(&self) -> JustificationId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &JustificationKind {
        &self.kind
    }

    #[inline]
    pub fn supporters(&self) -> &[JustificationId] {
        &self.supporters
    }

    /// Whether explanations show this node, or skip to its causes.
    #[inline]
    pub fn is_interesting(&self) -> bool {
        self.interesting
    }

    #[inline]
    pub fn location(&self) -> Option<SourceLoc> {
        self.location
    }

    /// One-line human-readable reason.
    pub fn describe(&self) -> String {
        match &self.kind {
            JustificationKind::Text { message } => message.clone(),
            JustificationKind::Unknown => "Idk.".to_string(),
            JustificationKind::And { description } => {
                format!("{}{description}", self.location_prefix())
            }
            JustificationKind::Equal { item, value } => format!("{item} equals \"{value}\""),
            JustificationKind::Full { name, value, .. } => {
                format!(
                    "{}{} = {value}",
                    self.location_prefix(),
                    to_variable_text(name)
                )
            }
        }
    }

    /// `describe()` prefixed by the id, the way explanations list nodes.
    pub fn describe_with_id(&self) -> String {
        format!("{}{}", self.id_text(), self.describe())
    }

    /// `"- (#12) "`.
    pub fn id_text(&self) -> String {
        format!("- ({}) ", self.id)
    }

    fn location_prefix(&self) -> String {
        match self.location {
            Some(loc) if !loc.is_builtin() => format!("[{loc}]: "),
            _ => String::new(),
        }
    }

    /// The supporters the explanation walks through.
    ///
    /// A boring `Full` node hides why it was *called* and only passes on the
    /// causes of its value.
    pub(crate) fn display_supporters(&self) -> &[JustificationId] {
        match &self.kind {
            JustificationKind::Full { values, .. } if !self.interesting => values,
            _ => &self.supporters,
        }
    }
}

/// Parenthesize a name containing spaces so `owner.field` stays readable.
pub fn to_variable_text(name: &str) -> String {
    if name.contains(' ') {
        format!("({name})")
    } else {
        name.to_string()
    }
}
