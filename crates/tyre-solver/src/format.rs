//! Type rendering for diagnostics.
//!
//! Read-only over the symbol arena: members whose types were never resolved
//! print as `any`, and nesting deeper than `MAX_FORMAT_DEPTH` prints as `...`.

use tyre_binder::{SignatureId, SymbolArena, SymbolFlags, TypeId, TypeKind, ValueKind};
use tyre_common::Interner;
use tyre_common::limits::MAX_FORMAT_DEPTH;

pub struct TypeFormatter<'a> {
    symbols: &'a SymbolArena,
    interner: &'a Interner,
}

impl<'a> TypeFormatter<'a> {
    #[must_use]
    pub fn new(symbols: &'a SymbolArena, interner: &'a Interner) -> Self {
        Self { symbols, interner }
    }

    #[must_use]
    pub fn format(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(ty, 0, &mut out);
        out
    }

    #[must_use]
    pub fn format_signature(&self, sig: SignatureId) -> String {
        let mut out = String::new();
        self.write_signature(sig, ": ", 0, &mut out);
        out
    }

    fn write_type(&self, ty: TypeId, depth: u32, out: &mut String) {
        if depth > MAX_FORMAT_DEPTH {
            out.push_str("...");
            return;
        }
        let symbol = self.symbols.ty(ty);
        match symbol.kind {
            TypeKind::Primitive(primitive) => out.push_str(primitive.name()),
            TypeKind::Error { name } => {
                if name.is_none() {
                    out.push_str("any");
                } else {
                    out.push_str(self.interner.resolve(name));
                }
            }
            TypeKind::Array { element } => {
                let wrap = self.is_function_literal(element);
                if wrap {
                    out.push('(');
                }
                self.write_type(element, depth + 1, out);
                if wrap {
                    out.push(')');
                }
                out.push_str("[]");
            }
            TypeKind::TypeParameter | TypeKind::Alias => {
                out.push_str(self.interner.resolve(symbol.name));
            }
            TypeKind::Class | TypeKind::Interface | TypeKind::Enum => {
                out.push_str(self.interner.resolve(symbol.name));
                let arguments = match &symbol.specialization {
                    Some(spec) if !spec.arguments.is_empty() => spec.arguments.as_slice(),
                    _ => symbol.type_parameters.as_slice(),
                };
                self.write_type_list(arguments, depth, out);
            }
            TypeKind::ConstructorType | TypeKind::Container => {
                out.push_str("typeof ");
                out.push_str(self.interner.resolve(symbol.name));
            }
            TypeKind::ObjectType => self.write_object(ty, depth, out),
        }
    }

    fn write_type_list(&self, types: &[TypeId], depth: u32, out: &mut String) {
        if types.is_empty() {
            return;
        }
        out.push('<');
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(ty, depth + 1, out);
        }
        out.push('>');
    }

    /// A member-less type with exactly one call or construct signature.
    fn is_function_literal(&self, ty: TypeId) -> bool {
        let symbol = self.symbols.ty(ty);
        matches!(symbol.kind, TypeKind::ObjectType)
            && symbol.members.is_empty()
            && symbol.index_signatures.is_empty()
            && symbol.call_signatures.len() + symbol.construct_signatures.len() == 1
    }

    fn write_object(&self, ty: TypeId, depth: u32, out: &mut String) {
        let symbol = self.symbols.ty(ty);

        if let Some(value) = symbol.value
            && matches!(
                self.symbols.value(value).kind,
                ValueKind::Enum | ValueKind::Module
            )
        {
            out.push_str("typeof ");
            out.push_str(self.interner.resolve(self.symbols.value(value).name));
            return;
        }

        if self.is_function_literal(ty) {
            if let Some(&sig) = symbol.call_signatures.first() {
                self.write_signature(sig, " => ", depth, out);
            } else if let Some(&sig) = symbol.construct_signatures.first() {
                out.push_str("new ");
                self.write_signature(sig, " => ", depth, out);
            }
            return;
        }

        if symbol.members.is_empty()
            && symbol.call_signatures.is_empty()
            && symbol.construct_signatures.is_empty()
            && symbol.index_signatures.is_empty()
        {
            out.push_str("{}");
            return;
        }

        out.push_str("{ ");
        for (name, member) in symbol.members.iter() {
            let value = self.symbols.value(member);
            out.push_str(self.interner.resolve(name));
            if value.is_optional() {
                out.push('?');
            }
            out.push_str(": ");
            self.write_type(value.ty.unwrap_or(TypeId::ANY), depth + 1, out);
            out.push_str("; ");
        }
        for &sig in &symbol.call_signatures {
            self.write_signature(sig, ": ", depth, out);
            out.push_str("; ");
        }
        for &sig in &symbol.construct_signatures {
            out.push_str("new ");
            self.write_signature(sig, ": ", depth, out);
            out.push_str("; ");
        }
        for &sig in &symbol.index_signatures {
            self.write_index_signature(sig, depth, out);
            out.push_str("; ");
        }
        out.push('}');
    }

    fn write_signature(&self, sig: SignatureId, arrow: &str, depth: u32, out: &mut String) {
        let signature = self.symbols.signature(sig);
        self.write_type_list(&signature.type_parameters, depth, out);
        out.push('(');
        for (i, &param) in signature.parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let value = self.symbols.value(param);
            if value.flags.contains(SymbolFlags::VARARG) {
                out.push_str("...");
            }
            out.push_str(self.interner.resolve(value.name));
            if value.is_optional() {
                out.push('?');
            }
            out.push_str(": ");
            self.write_type(value.ty.unwrap_or(TypeId::ANY), depth + 1, out);
        }
        out.push(')');
        out.push_str(arrow);
        self.write_type(signature.return_type.unwrap_or(TypeId::ANY), depth + 1, out);
    }

    fn write_index_signature(&self, sig: SignatureId, depth: u32, out: &mut String) {
        let signature = self.symbols.signature(sig);
        out.push('[');
        if let Some(&param) = signature.parameters.first() {
            let value = self.symbols.value(param);
            out.push_str(self.interner.resolve(value.name));
            out.push_str(": ");
            self.write_type(value.ty.unwrap_or(TypeId::ANY), depth + 1, out);
        }
        out.push_str("]: ");
        self.write_type(signature.return_type.unwrap_or(TypeId::ANY), depth + 1, out);
    }
}
