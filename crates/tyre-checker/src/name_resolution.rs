//! Name lookup over the declaration tree.
//!
//! A simple name is looked up from the enclosing declaration outward, one
//! parent at a time. Modules also see the exported declarations of every
//! other declaration merged into the same module symbol; the script level
//! sees the top-level declarations of every unit.

use crate::state::CheckerState;
use smallvec::SmallVec;
use tyre_binder::{DeclFilter, DeclId, DeclKind, SymbolRef, TypeId, ValueId};
use tyre_common::Atom;
use tyre_syntax::{NodeIndex, UnitId};

/// Why a dotted name did not resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameError {
    NotFound(Atom),
    MissingExport { module: Atom, member: Atom },
}

impl<'a> CheckerState<'a> {
    /// Nearest declaration of `name` in the space selected by `filter`.
    pub(crate) fn lookup_declaration(
        &self,
        from: Option<DeclId>,
        name: Atom,
        filter: DeclFilter,
    ) -> Option<DeclId> {
        let mut current = from;
        while let Some(scope) = current {
            let decl = self.decl(scope);
            match decl.kind {
                DeclKind::Script => {
                    if let Some(found) = self
                        .declarations
                        .search_child_declarations(scope, name, filter)
                        .next()
                    {
                        return Some(found);
                    }
                    return self.lookup_global(name, filter);
                }
                DeclKind::Module => {
                    if let Some(found) = self.lookup_in_module(scope, name, filter) {
                        return Some(found);
                    }
                }
                _ => {
                    if let Some(found) = self
                        .declarations
                        .search_child_declarations(scope, name, filter)
                        .next()
                    {
                        return Some(found);
                    }
                }
            }
            current = decl.parent;
        }
        self.lookup_global(name, filter)
    }

    /// Top-level declaration of `name` in any unit.
    pub(crate) fn lookup_global(&self, name: Atom, filter: DeclFilter) -> Option<DeclId> {
        self.declarations.roots().iter().find_map(|&root| {
            self.declarations
                .search_child_declarations(root, name, filter)
                .next()
        })
    }

    fn lookup_in_module(&self, module: DeclId, name: Atom, filter: DeclFilter) -> Option<DeclId> {
        if let Some(found) = self
            .declarations
            .search_child_declarations(module, name, filter)
            .next()
        {
            return Some(found);
        }
        self.module_declarations(module)
            .into_iter()
            .filter(|&other| other != module)
            .find_map(|other| self.exported_child(other, name, filter))
    }

    fn exported_child(&self, container: DeclId, name: Atom, filter: DeclFilter) -> Option<DeclId> {
        self.declarations
            .search_child_declarations(container, name, filter)
            .find(|&child| self.decl(child).is_exported())
    }

    /// Every declaration merged into the module symbol of `module`.
    pub(crate) fn module_declarations(&self, module: DeclId) -> SmallVec<[DeclId; 2]> {
        match self.decl(module).symbol {
            Some(SymbolRef::Value(value)) => self.symbols.value(value).declarations.clone(),
            _ => SmallVec::from_slice(&[module]),
        }
    }

    /// `A.B.C`: every segment but the last names a module, the last a type.
    pub(crate) fn resolve_qualified_name(
        &self,
        from: Option<DeclId>,
        names: &[Atom],
    ) -> Result<DeclId, NameError> {
        let Some((&first, rest)) = names.split_first() else {
            return Err(NameError::NotFound(Atom::NONE));
        };
        if rest.is_empty() {
            return self
                .lookup_declaration(from, first, DeclFilter::Type)
                .ok_or(NameError::NotFound(first));
        }
        let mut container = self
            .lookup_declaration(from, first, DeclFilter::Container)
            .ok_or(NameError::NotFound(first))?;
        let mut container_name = first;
        for (i, &segment) in rest.iter().enumerate() {
            let filter = if i + 1 == rest.len() {
                DeclFilter::Type
            } else {
                DeclFilter::Container
            };
            let found = self
                .module_declarations(container)
                .into_iter()
                .find_map(|decl| self.exported_child(decl, segment, filter));
            match found {
                Some(next) => {
                    container = next;
                    container_name = segment;
                }
                None => {
                    return Err(NameError::MissingExport {
                        module: container_name,
                        member: segment,
                    });
                }
            }
        }
        Ok(container)
    }

    // =========================================================================
    // Declaration to symbol
    // =========================================================================

    /// The value a declaration introduces, if any.
    pub(crate) fn value_of_declaration(&self, decl: DeclId) -> Option<ValueId> {
        match self.decl(decl).symbol? {
            SymbolRef::Value(value) => Some(value),
            SymbolRef::Type(ty) => self.symbols.ty(ty).value,
            SymbolRef::Signature(_) => None,
        }
    }

    /// The type a declaration introduces, if any.
    pub(crate) fn type_of_declaration(&self, decl: DeclId) -> Option<TypeId> {
        match self.decl(decl).symbol? {
            SymbolRef::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// Innermost declaration around `node` (not `node`'s own declaration).
    pub(crate) fn enclosing_declaration(&self, unit: UnitId, node: NodeIndex) -> Option<DeclId> {
        self.arena(unit)
            .ancestors(node)
            .find_map(|ancestor| self.declarations.declaration_for_node(unit, ancestor))
            .or_else(|| self.declarations.unit_root(unit))
    }

    /// The class declaration around the current position.
    pub(crate) fn enclosing_class(&self) -> Option<DeclId> {
        let from = self.ctx.enclosing?;
        self.declarations
            .enclosing(from, |kind| kind == DeclKind::Class)
    }
}
