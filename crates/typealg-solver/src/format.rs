//! Textual rendering of types.
//!
//! | shape | rendering |
//! |-------|-----------|
//! | constructor | `List` |
//! | application | `List<out E, *>` |
//! | nullable | `T?`, `(A | B)?` |
//! | flexible | `A..B?` |
//! | union | `A | B` |
//! | intersection | `A & B` |
//!
//! Members that are themselves unions, intersections or flexible ranges are
//! parenthesized so the output reads back unambiguously.

use crate::types::{Constructor, FlexibleType, Projection, Type, TypeApplication, TypeList};
use std::fmt;

/// Whether `ty` needs parentheses when it appears as an operand of `?`,
/// `|`, `&` or `..`.
fn needs_parens(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Union(_) | Type::Intersection(_) | Type::Flexible(_)
    )
}

fn write_operand(f: &mut fmt::Formatter<'_>, ty: &Type) -> fmt::Result {
    if needs_parens(ty) {
        write!(f, "({ty})")
    } else {
        write!(f, "{ty}")
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &TypeList, separator: &str) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_operand(f, member)?;
    }
    Ok(())
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            write!(f, "{}", self.out_bound)
        } else if self.is_star() {
            f.write_str("*")
        } else if self.is_covariant() {
            write!(f, "out {}", self.out_bound)
        } else if self.is_contravariant() {
            write!(f, "in {}", self.in_bound)
        } else {
            write!(f, "{{in {}, out {}}}", self.in_bound, self.out_bound)
        }
    }
}

impl fmt::Display for TypeApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.constructor)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Display for FlexibleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_operand(f, &self.from)?;
        f.write_str("..")?;
        write_operand(f, &self.to)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Constructor(constructor) => write!(f, "{constructor}"),
            Type::Application(app) => write!(f, "{app}"),
            Type::Union(members) => write_members(f, members, " | "),
            Type::Intersection(members) => write_members(f, members, " & "),
            Type::Nullable(base) => {
                write_operand(f, base)?;
                f.write_str("?")
            }
            Type::Flexible(flexible) => write!(f, "{flexible}"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
