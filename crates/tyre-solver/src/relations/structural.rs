//! Member-wise and signature-wise comparison of object types.

use super::{ComparisonFlags, RelationChecker, TypeComparisonInfo};
use crate::apparent::{IndexKind, find_member, index_signature_of, signatures_of};
use crate::db::TypeDatabase;
use crate::instantiate::{TypeSubstitution, instantiate_signature};
use tyre_binder::{SignatureId, SignatureKind, TypeId, ValueId};
use tyre_common::diagnostics::diagnostic_messages::{self, message_chain};
use tyre_common::{Atom, format_message};

impl<D: TypeDatabase + ?Sized> RelationChecker<'_, D> {
    fn atom_text(&self, name: Atom) -> String {
        self.db.interner().resolve(name).to_string()
    }

    fn elaborate(
        &self,
        info: Option<&mut TypeComparisonInfo>,
        flag: ComparisonFlags,
        template: &str,
        args: &[&str],
    ) {
        if let Some(info) = info {
            info.flags |= flag;
            info.add_message(self.depth, format_message(template, args));
        }
    }

    /// Relate one level deeper, so elaboration from the nested pair indents
    /// under the message that will explain it.
    fn relate_nested(
        &mut self,
        source: TypeId,
        target: TypeId,
        info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        self.depth += 1;
        let related = self.relate(source, target, info);
        self.depth -= 1;
        related
    }

    // =========================================================================
    // Subtype / assignable
    // =========================================================================

    pub(super) fn structural(
        &mut self,
        source: TypeId,
        target: TypeId,
        mut info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        self.db.resolve_type(source);
        self.db.resolve_type(target);

        let members: Vec<(Atom, ValueId)> = self.db.symbols().ty(target).members.iter().collect();
        for (name, target_member) in members {
            if !self.relate_member(source, target, name, target_member, info.as_deref_mut()) {
                return false;
            }
        }

        for kind in [SignatureKind::Call, SignatureKind::Construct] {
            if !self.relate_signature_group(source, target, kind, info.as_deref_mut()) {
                return false;
            }
        }

        for kind in [IndexKind::String, IndexKind::Number] {
            if !self.relate_index(source, target, kind, info.as_deref_mut()) {
                return false;
            }
        }
        true
    }

    fn relate_member(
        &mut self,
        source: TypeId,
        target: TypeId,
        name: Atom,
        target_member: ValueId,
        mut info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        let name_text = self.atom_text(name);
        let Some(source_member) = find_member(self.db, source, name) else {
            if self.db.symbols().value(target_member).is_optional() {
                return true;
            }
            if info.is_some() {
                let source_text = self.type_name(source);
                self.elaborate(
                    info,
                    ComparisonFlags::MISSING_PROPERTY,
                    diagnostic_messages::PROPERTY_IS_MISSING_IN_TYPE,
                    &[&name_text, &source_text],
                );
            }
            return false;
        };

        let symbols = self.db.symbols();
        let source_value = symbols.value(source_member);
        let target_value = symbols.value(target_member);
        let source_private = source_value.is_private();
        let target_private = target_value.is_private();
        let same_declaration = source_value.first_declaration() == target_value.first_declaration();

        if source_private != target_private {
            if info.is_some() {
                let (private_side, public_side) = if source_private {
                    (source, target)
                } else {
                    (target, source)
                };
                let private_text = self.type_name(private_side);
                let public_text = self.type_name(public_side);
                self.elaborate(
                    info,
                    ComparisonFlags::INCONSISTENT_PRIVACY,
                    message_chain::PROPERTY_DEFINED_AS_PRIVATE_IN_TYPE_IS_DEFINED_AS_PUBLIC_IN_TYPE,
                    &[&name_text, &private_text, &public_text],
                );
            }
            return false;
        }
        if source_private && !same_declaration {
            self.elaborate(
                info,
                ComparisonFlags::INCONSISTENT_PRIVACY,
                message_chain::TYPES_HAVE_SEPARATE_DECLARATIONS_OF_A_PRIVATE_PROPERTY,
                &[&name_text],
            );
            return false;
        }

        let source_type = self.db.value_type(source_member);
        let target_type = self.db.value_type(target_member);
        if self.relate_nested(source_type, target_type, info.as_deref_mut()) {
            return true;
        }
        if info.is_some() {
            let source_text = self.type_name(source);
            let target_text = self.type_name(target);
            self.elaborate(
                info,
                ComparisonFlags::INCOMPATIBLE_PROPERTY_TYPES,
                message_chain::TYPES_OF_PROPERTY_OF_TYPES_ARE_INCOMPATIBLE,
                &[&name_text, &source_text, &target_text],
            );
        }
        false
    }

    /// Every target signature of `kind` needs a related source signature.
    fn relate_signature_group(
        &mut self,
        source: TypeId,
        target: TypeId,
        kind: SignatureKind,
        mut info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        let target_signatures = signatures_of(self.db, target, kind);
        if target_signatures.is_empty() {
            return true;
        }
        let source_signatures = signatures_of(self.db, source, kind);
        let (missing, incompatible) = match kind {
            SignatureKind::Construct => (
                message_chain::TYPE_REQUIRES_A_CONSTRUCT_SIGNATURE_BUT_TYPE_LACKS_ONE,
                message_chain::CONSTRUCT_SIGNATURES_OF_TYPES_ARE_INCOMPATIBLE,
            ),
            _ => (
                message_chain::TYPE_REQUIRES_A_CALL_SIGNATURE_BUT_TYPE_LACKS_ONE,
                message_chain::CALL_SIGNATURES_OF_TYPES_ARE_INCOMPATIBLE,
            ),
        };

        if source_signatures.is_empty() {
            if info.is_some() {
                let target_text = self.type_name(target);
                let source_text = self.type_name(source);
                self.elaborate(
                    info,
                    ComparisonFlags::MISSING_SIGNATURE,
                    missing,
                    &[&target_text, &source_text],
                );
            }
            return false;
        }

        for &target_signature in &target_signatures {
            let matched = source_signatures
                .iter()
                .any(|&source_signature| self.relate_signatures(source_signature, target_signature, None));
            if matched {
                continue;
            }
            if let Some(info) = info.as_deref_mut() {
                // Elaborate against the first candidate.
                self.depth += 1;
                self.relate_signatures(source_signatures[0], target_signature, Some(&mut *info));
                self.depth -= 1;
                let source_text = self.type_name(source);
                let target_text = self.type_name(target);
                self.elaborate(
                    Some(info),
                    ComparisonFlags::INCOMPATIBLE_SIGNATURES,
                    incompatible,
                    &[&source_text, &target_text],
                );
            }
            return false;
        }
        true
    }

    /// A number index in the target may be satisfied by a string index in the
    /// source. Only element types are compared.
    fn relate_index(
        &mut self,
        source: TypeId,
        target: TypeId,
        kind: IndexKind,
        mut info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        let Some(target_index) = index_signature_of(self.db, target, kind) else {
            return true;
        };
        let source_index = match index_signature_of(self.db, source, kind) {
            Some(sig) => Some(sig),
            None if kind == IndexKind::Number => index_signature_of(self.db, source, IndexKind::String),
            None => None,
        };
        let Some(source_index) = source_index else {
            if info.is_some() {
                let template = match kind {
                    IndexKind::String => message_chain::TYPE_REQUIRES_A_STRING_INDEX_SIGNATURE_BUT_TYPE_LACKS_ONE,
                    IndexKind::Number => message_chain::TYPE_REQUIRES_A_NUMBER_INDEX_SIGNATURE_BUT_TYPE_LACKS_ONE,
                };
                let target_text = self.type_name(target);
                let source_text = self.type_name(source);
                self.elaborate(
                    info,
                    ComparisonFlags::MISSING_INDEX_SIGNATURE,
                    template,
                    &[&target_text, &source_text],
                );
            }
            return false;
        };

        let source_element = self.db.return_type(source_index);
        let target_element = self.db.return_type(target_index);
        if self.relate_nested(source_element, target_element, info.as_deref_mut()) {
            return true;
        }
        if info.is_some() {
            let source_text = self.type_name(source);
            let target_text = self.type_name(target);
            self.elaborate(
                info,
                ComparisonFlags::INCOMPATIBLE_SIGNATURES,
                message_chain::INDEX_SIGNATURES_OF_TYPES_ARE_INCOMPATIBLE,
                &[&source_text, &target_text],
            );
        }
        false
    }

    /// Generic signatures are compared with their type parameters erased
    /// to `any`.
    fn erase(&mut self, signature: SignatureId) -> SignatureId {
        self.db.resolve_signature(signature);
        let type_parameters = self.db.symbols().signature(signature).type_parameters.clone();
        if type_parameters.is_empty() {
            return signature;
        }
        let substitution = TypeSubstitution::from_pairs(&type_parameters, &[]);
        instantiate_signature(self.db, signature, &substitution)
    }

    /// Type of parameter `index` as seen by an argument in that position.
    /// Positions covered by a rest parameter get its element type.
    fn parameter_type_at(&mut self, signature: SignatureId, index: usize) -> Option<TypeId> {
        let parameters = &self.db.symbols().signature(signature).parameters;
        let count = parameters.len();
        let last = parameters.last().copied();
        let varargs = self.db.symbols().has_varargs(signature);
        if varargs && index + 1 >= count {
            let rest = self.db.value_type(last?);
            return Some(self.db.symbols().array_element(rest).unwrap_or(TypeId::ANY));
        }
        let parameter = *self.db.symbols().signature(signature).parameters.get(index)?;
        Some(self.db.value_type(parameter))
    }

    /// Bivariant parameters, covariant return (ignored when the target
    /// returns `void`), and the source may not require more parameters than
    /// the target can supply.
    pub(super) fn relate_signatures(
        &mut self,
        source: SignatureId,
        target: SignatureId,
        mut info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        let source = self.erase(source);
        let target = self.erase(target);

        let symbols = self.db.symbols();
        let source_required = symbols.required_parameter_count(source);
        let source_count = symbols.signature(source).parameters.len();
        let target_count = symbols.signature(target).parameters.len();
        let target_varargs = symbols.has_varargs(target);

        if source_required > target_count && !target_varargs {
            self.elaborate(
                info,
                ComparisonFlags::ARITY_MISMATCH,
                message_chain::CALL_SIGNATURE_EXPECTS_OR_FEWER_PARAMETERS,
                &[&target_count.to_string()],
            );
            return false;
        }

        for index in 0..source_count.max(target_count) {
            let (Some(source_param), Some(target_param)) = (
                self.parameter_type_at(source, index),
                self.parameter_type_at(target, index),
            ) else {
                continue;
            };
            if self.relate_nested(target_param, source_param, None)
                || self.relate_nested(source_param, target_param, info.as_deref_mut())
            {
                continue;
            }
            if info.is_some() {
                let source_text = self.type_name(source_param);
                let target_text = self.type_name(target_param);
                self.elaborate(
                    info,
                    ComparisonFlags::INCOMPATIBLE_PARAMETERS,
                    message_chain::TYPES_OF_PARAMETERS_ARE_INCOMPATIBLE,
                    &[&source_text, &target_text],
                );
            }
            return false;
        }

        let target_return = self.db.return_type(target);
        if target_return == TypeId::VOID {
            return true;
        }
        let source_return = self.db.return_type(source);
        if self.relate_nested(source_return, target_return, info.as_deref_mut()) {
            return true;
        }
        if info.is_some() {
            let source_text = self.type_name(source_return);
            let target_text = self.type_name(target_return);
            self.elaborate(
                info,
                ComparisonFlags::INCOMPATIBLE_RETURN_TYPES,
                message_chain::RETURN_TYPES_ARE_INCOMPATIBLE,
                &[&source_text, &target_text],
            );
        }
        false
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub(super) fn identical_structure(&mut self, source: TypeId, target: TypeId) -> bool {
        self.db.resolve_type(source);
        self.db.resolve_type(target);

        let source_members: Vec<(Atom, ValueId)> =
            self.db.symbols().ty(source).members.iter().collect();
        let target_members: Vec<(Atom, ValueId)> =
            self.db.symbols().ty(target).members.iter().collect();
        if source_members.len() != target_members.len() {
            return false;
        }
        for (name, target_member) in target_members {
            let Some(source_member) = self.db.symbols().ty(source).members.get(name) else {
                return false;
            };
            let symbols = self.db.symbols();
            let a = symbols.value(source_member);
            let b = symbols.value(target_member);
            if a.is_optional() != b.is_optional() || a.is_private() != b.is_private() {
                return false;
            }
            if a.is_private() && a.first_declaration() != b.first_declaration() {
                return false;
            }
            let source_type = self.db.value_type(source_member);
            let target_type = self.db.value_type(target_member);
            if !self.relate(source_type, target_type, None) {
                return false;
            }
        }

        for kind in [SignatureKind::Call, SignatureKind::Construct, SignatureKind::Index] {
            let a = signatures_of(self.db, source, kind);
            let b = signatures_of(self.db, target, kind);
            if a.len() != b.len() {
                return false;
            }
            for (source_sig, target_sig) in a.into_iter().zip(b) {
                if !self.identical_signatures(source_sig, target_sig) {
                    return false;
                }
            }
        }
        true
    }

    fn identical_signatures(&mut self, source: SignatureId, target: SignatureId) -> bool {
        if source == target {
            return true;
        }
        self.db.resolve_signature(source);
        self.db.resolve_signature(target);
        let symbols = self.db.symbols();
        if symbols.signature(source).type_parameters.len()
            != symbols.signature(target).type_parameters.len()
        {
            return false;
        }
        let source = self.erase(source);
        let target = self.erase(target);

        let symbols = self.db.symbols();
        let source_params = symbols.signature(source).parameters.clone();
        let target_params = symbols.signature(target).parameters.clone();
        if source_params.len() != target_params.len()
            || symbols.required_parameter_count(source) != symbols.required_parameter_count(target)
            || symbols.has_varargs(source) != symbols.has_varargs(target)
        {
            return false;
        }
        for (a, b) in source_params.into_iter().zip(target_params) {
            let a = self.db.value_type(a);
            let b = self.db.value_type(b);
            if !self.relate(a, b, None) {
                return false;
            }
        }
        let source_return = self.db.return_type(source);
        let target_return = self.db.return_type(target);
        self.relate(source_return, target_return, None)
    }
}
