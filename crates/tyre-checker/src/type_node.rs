//! Type annotations.

use crate::name_resolution::NameError;
use crate::state::CheckerState;
use tyre_binder::{TypeId, TypeKind};
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::{TypeDatabase, TypeSubstitution, instantiate_type, is_assignable, specialize_type};
use tyre_syntax::{KeywordType, NodeIndex, SignatureData, TypeLiteralData, TypeReferenceData};

impl<'a> CheckerState<'a> {
    pub(crate) const fn keyword_type(keyword: KeywordType) -> TypeId {
        match keyword {
            KeywordType::Any => TypeId::ANY,
            KeywordType::Number => TypeId::NUMBER,
            KeywordType::String => TypeId::STRING,
            KeywordType::Boolean => TypeId::BOOLEAN,
            KeywordType::Void => TypeId::VOID,
        }
    }

    /// `A`, `M.A`, `A<T, U>`.
    pub(crate) fn resolve_type_reference(
        &mut self,
        node: NodeIndex,
        reference: &'a TypeReferenceData,
    ) -> TypeId {
        let decl = match self.resolve_qualified_name(self.ctx.enclosing, &reference.name) {
            Ok(decl) => decl,
            Err(NameError::NotFound(name)) => {
                let text = self.atom_text(name);
                self.error_at_node(node, diagnostic_codes::CANNOT_FIND_NAME, &[&text]);
                return self.symbols.error_type(name);
            }
            Err(NameError::MissingExport { module, member }) => {
                let (module_text, member_text) = (self.atom_text(module), self.atom_text(member));
                self.error_at_node(
                    node,
                    diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER,
                    &[&module_text, &member_text],
                );
                return self.symbols.error_type(member);
            }
        };
        let Some(ty) = self.type_of_declaration(decl) else {
            return TypeId::ANY;
        };

        let arguments: Vec<TypeId> = reference
            .type_arguments
            .iter()
            .map(|argument| self.resolve_ast(argument, false))
            .collect();
        let name = self.atom_text(self.symbols.ty(ty).name);

        if matches!(self.symbols.kind(ty), TypeKind::Alias) {
            if !arguments.is_empty() {
                self.error_at_node(node, diagnostic_codes::TYPE_IS_NOT_GENERIC, &[&name]);
            }
            return self.resolve_type(ty);
        }

        let parameters = self.symbols.ty(ty).type_parameters.clone();
        if parameters.is_empty() {
            if !arguments.is_empty() {
                self.error_at_node(node, diagnostic_codes::TYPE_IS_NOT_GENERIC, &[&name]);
            }
            return ty;
        }
        if arguments.is_empty() {
            self.error_at_node(
                node,
                diagnostic_codes::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
                &[&name, &parameters.len().to_string()],
            );
            let any = vec![TypeId::ANY; parameters.len()];
            return specialize_type(self, ty, &any);
        }
        if arguments.len() != parameters.len() {
            self.error_at_node(
                node,
                diagnostic_codes::EXPECTED_TYPE_ARGUMENTS_BUT_GOT,
                &[&parameters.len().to_string(), &arguments.len().to_string()],
            );
        } else if self.ctx.is_checking() {
            self.check_type_argument_constraints(&reference.type_arguments.nodes, &parameters, &arguments);
        }
        specialize_type(self, ty, &arguments)
    }

    /// Report every type argument that does not satisfy its parameter's
    /// constraint, instantiated with the given arguments. Constraints still
    /// being resolved are skipped.
    pub(crate) fn check_type_argument_constraints(
        &mut self,
        nodes: &[NodeIndex],
        parameters: &[TypeId],
        arguments: &[TypeId],
    ) {
        let substitution = TypeSubstitution::from_pairs(parameters, arguments);
        for (i, (&parameter, &argument)) in parameters.iter().zip(arguments).enumerate() {
            let Some(constraint) = self.instantiated_constraint(parameter, &substitution) else {
                continue;
            };
            if !is_assignable(self, argument, constraint) {
                let at = nodes.get(i).copied().unwrap_or(NodeIndex::NONE);
                let (argument_text, constraint_text) =
                    (self.format_type(argument), self.format_type(constraint));
                self.error_at_node(
                    at,
                    diagnostic_codes::TYPE_DOES_NOT_SATISFY_THE_CONSTRAINT,
                    &[&argument_text, &constraint_text],
                );
            }
        }
    }

    /// The constraint of `parameter` under `substitution`, if it has one that
    /// is already known.
    pub(crate) fn instantiated_constraint(
        &mut self,
        parameter: TypeId,
        substitution: &TypeSubstitution,
    ) -> Option<TypeId> {
        self.resolve_type(parameter);
        let symbol = self.symbols.ty(parameter);
        if !symbol.state.is_resolved() {
            return None;
        }
        let constraint = symbol.constraint?;
        Some(instantiate_type(self, constraint, substitution))
    }

    /// `{ ... }` in a type position. Its members are checked in type-check
    /// mode.
    pub(crate) fn resolve_type_literal(&mut self, node: NodeIndex, literal: &'a TypeLiteralData) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::ANY;
        };
        let Some(ty) = self.type_of_declaration(decl) else {
            return TypeId::ANY;
        };
        if self.ctx.is_checking() {
            let mut scope = self.scope();
            scope.ctx.enclosing = Some(decl);
            for member in literal.members.iter() {
                scope.resolve_ast(member, false);
            }
        }
        ty
    }

    /// `(x: T) => U` and `new (x: T) => U`.
    pub(crate) fn resolve_function_type_node(
        &mut self,
        node: NodeIndex,
        signature: &'a SignatureData,
    ) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::ANY;
        };
        let Some(ty) = self.type_of_declaration(decl) else {
            return TypeId::ANY;
        };
        if self.ctx.is_checking() {
            let mut scope = self.scope();
            scope.ctx.enclosing = Some(decl);
            for parameter in signature.type_parameters.iter().chain(signature.parameters.iter()) {
                scope.resolve_ast(parameter, false);
            }
            scope.resolve_ast(signature.return_type, false);
        }
        ty
    }

    /// Method, call and construct signatures inside interfaces and type
    /// literals.
    pub(crate) fn check_member_signature(&mut self, node: NodeIndex, signature: &'a SignatureData) -> TypeId {
        for parameter in signature.type_parameters.iter().chain(signature.parameters.iter()) {
            self.resolve_ast(parameter, false);
        }
        self.resolve_ast(signature.return_type, false);
        if let Some(resolved) = self.declaration_of(node).and_then(|decl| self.decl(decl).signature) {
            self.resolve_signature(resolved);
        }
        self.declaration_node_type(node)
    }
}
