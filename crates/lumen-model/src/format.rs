//! Rendering types and declaration lists for diagnostics.

use crate::decl::DeclId;
use crate::model::TypeModel;
use crate::types::{TypeData, TypeId};
use std::fmt::Write;

impl TypeModel {
    /// Render `ty` in source syntax: `Map<K,V>`, `A|B`, `A&B`, `Nothing`.
    pub fn type_name(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: TypeId) {
        match self.lookup(ty) {
            Some(TypeData::Nothing) => out.push_str("Nothing"),
            Some(TypeData::Param(param)) => out.push_str(self.name(param)),
            Some(TypeData::Applied { decl, args }) => {
                out.push_str(self.name(decl));
                if !args.is_empty() {
                    out.push('<');
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        self.write_type(out, arg);
                    }
                    out.push('>');
                }
            }
            Some(TypeData::Union(members)) => self.write_members(out, &members, '|'),
            Some(TypeData::Intersection(members)) => self.write_members(out, &members, '&'),
            None => {
                let _ = write!(out, "<unknown type {}>", ty.0);
            }
        }
    }

    fn write_members(&self, out: &mut String, members: &[TypeId], separator: char) {
        for (i, &member) in members.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            self.write_type(out, member);
        }
    }

    /// Declaration names as an English list: `A`, `A and B`, `A, B and C`.
    pub fn type_list(&self, decls: &[DeclId]) -> String {
        let names: Vec<&str> = decls.iter().map(|&d| self.name(d)).collect();
        english_list(&names)
    }
}

pub(crate) fn english_list(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
