//! Elaboration collected while relating two types.

use bitflags::bitflags;

bitflags! {
    /// Why a comparison failed. Several bits may be set when the failure is
    /// nested (a property whose signature has an incompatible return type).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ComparisonFlags: u16 {
        const MISSING_PROPERTY = 1 << 0;
        const INCOMPATIBLE_PROPERTY_TYPES = 1 << 1;
        const INCONSISTENT_PRIVACY = 1 << 2;
        const INCOMPATIBLE_SIGNATURES = 1 << 3;
        const INCOMPATIBLE_PARAMETERS = 1 << 4;
        const INCOMPATIBLE_RETURN_TYPES = 1 << 5;
        const ARITY_MISMATCH = 1 << 6;
        const MISSING_SIGNATURE = 1 << 7;
        const MISSING_INDEX_SIGNATURE = 1 << 8;
    }
}

/// Failure reasons and the elaboration chain of one relation query.
///
/// Messages are pushed innermost first while the relation unwinds; `message`
/// renders them outermost first, each line indented one level deeper than its
/// nesting depth so the chain sits below a diagnostic head line.
#[derive(Clone, Debug, Default)]
pub struct TypeComparisonInfo {
    pub flags: ComparisonFlags,
    messages: Vec<(u32, String)>,
}

impl TypeComparisonInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, depth: u32, text: String) {
        self.messages.push((depth, text));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.flags = ComparisonFlags::empty();
        self.messages.clear();
    }

    /// The chain as one string, one line per message.
    #[must_use]
    pub fn message(&self) -> String {
        let mut out = String::new();
        for (depth, text) in self.messages.iter().rev() {
            if !out.is_empty() {
                out.push('\n');
            }
            for _ in 0..=*depth {
                out.push_str("  ");
            }
            out.push_str(text);
        }
        out
    }
}
