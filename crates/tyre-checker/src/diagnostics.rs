//! Diagnostic collection and reporting.
//!
//! Reports only happen while the context carries `TYPE_CHECK`, or inside a
//! provisional frame. Provisional reports go to the context's provisional
//! buffer, where the overload resolver counts and discards them, in either
//! mode so overload choice does not depend on it. Everything else lands in
//! the collector, deduplicated by position and code.

use crate::context::ContextFlags;
use crate::state::CheckerState;
use rustc_hash::FxHashSet;
use tracing::trace;
use tyre_binder::{DeclId, TypeId};
use tyre_common::Diagnostic;
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::TypeFormatter;
use tyre_syntax::NodeIndex;

/// Where reported diagnostics go.
pub trait DiagnosticSink {
    fn post_error(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn post_error(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// The final diagnostic list of a resolver instance.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(String, u32, u32, u32)>,
}

impl DiagnosticSink for DiagnosticCollector {
    fn post_error(&mut self, diagnostic: Diagnostic) {
        let key = (
            diagnostic.file.clone(),
            diagnostic.start,
            diagnostic.length,
            diagnostic.code,
        );
        if self.seen.insert(key) {
            self.diagnostics.push(diagnostic);
        }
    }
}

impl DiagnosticCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Codes in report order.
    #[must_use]
    pub fn codes(&self) -> Vec<u32> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.seen.clear();
        std::mem::take(&mut self.diagnostics)
    }
}

// =============================================================================
// Reporting
// =============================================================================

impl<'a> CheckerState<'a> {
    /// Report `code` at `node` of the current unit.
    pub(crate) fn error_at_node(&mut self, node: NodeIndex, code: u32, args: &[&str]) {
        self.error_at_node_with_chain(node, code, args, "");
    }

    /// Report `code` at `node` with a relation elaboration below the head line.
    pub(crate) fn error_at_node_with_chain(
        &mut self,
        node: NodeIndex,
        code: u32,
        args: &[&str],
        chain: &str,
    ) {
        if let Some(diagnostic) = self.diagnostic_at(node, code, args) {
            self.post(diagnostic.with_chain(chain));
        }
    }

    /// Report `code` at `node`, pointing back at another declaration of `name`.
    pub(crate) fn error_at_node_with_related(
        &mut self,
        node: NodeIndex,
        code: u32,
        args: &[&str],
        related: DeclId,
        name: &str,
    ) {
        let Some(diagnostic) = self.diagnostic_at(node, code, args) else {
            return;
        };
        let declaration = self.declarations.get(related);
        let unit = self.program.unit(declaration.unit);
        let span = unit.arena().span(declaration.node);
        let diagnostic = diagnostic.with_related(
            unit.path().to_string(),
            span.start,
            span.len(),
            diagnostic_codes::WAS_ALSO_DECLARED_HERE,
            &[name],
        );
        self.post(diagnostic);
    }

    fn diagnostic_at(&self, node: NodeIndex, code: u32, args: &[&str]) -> Option<Diagnostic> {
        if !self.ctx.flags.contains(ContextFlags::TYPE_CHECK) && !self.ctx.is_provisional() {
            trace!(code, node = node.0, "dropped diagnostic outside of type check");
            return None;
        }
        let unit = self.program.unit(self.ctx.unit);
        let span = unit.arena().span(node);
        Some(Diagnostic::from_code(
            unit.path().to_string(),
            span.start,
            span.len(),
            code,
            args,
        ))
    }

    fn post(&mut self, diagnostic: Diagnostic) {
        if self.ctx.is_provisional() {
            trace!(code = diagnostic.code, "provisional diagnostic");
            self.ctx.provisional_errors.post_error(diagnostic);
        } else {
            self.diagnostics.post_error(diagnostic);
        }
    }

    #[must_use]
    pub fn format_type(&self, ty: TypeId) -> String {
        TypeFormatter::new(&self.symbols, self.program.interner()).format(ty)
    }

    pub(crate) fn atom_text(&self, atom: tyre_common::Atom) -> String {
        self.program.interner().resolve(atom).to_string()
    }
}
