//! Built-in collection hierarchy and its relation matrix.
//!
//! ```text
//! Collection<out E> : Any
//! List<out E>       : Collection<out E>
//! MutableList<E>    : List<out E>
//! ArrayList<E>      : MutableList<E>
//! ```

use anyhow::{Context, Result};
use typealg_solver::{
    DeclEnvironment, NominalClosure, Projection, SubtypingRelation, Type, TypeAlgebra,
    TypeDeclaration, TypeParameter,
};
use tracing::debug;

fn element() -> Type {
    Type::constructor("E")
}

/// Register the collection hierarchy in a fresh environment.
pub fn collection_hierarchy(closure: NominalClosure) -> Result<DeclEnvironment> {
    let env = DeclEnvironment::new().with_closure(closure);
    let decls = [
        TypeDeclaration::new("Collection")
            .with_param(TypeParameter::covariant("E"))
            .with_supertype(Type::any()),
        TypeDeclaration::new("List")
            .with_param(TypeParameter::covariant("E"))
            .with_supertype(Type::application(
                "Collection",
                [Projection::covariant(element())],
            )),
        TypeDeclaration::new("MutableList")
            .with_param(TypeParameter::new("E"))
            .with_supertype(Type::application("List", [Projection::covariant(element())])),
        TypeDeclaration::new("ArrayList")
            .with_param(TypeParameter::new("E"))
            .with_supertype(Type::application(
                "MutableList",
                [Projection::invariant(element())],
            )),
    ];
    for decl in decls {
        let name = decl.constructor.clone();
        env.register(decl)
            .with_context(|| format!("registering `{name}`"))?;
    }
    debug!(declarations = env.len(), ?closure, "collection hierarchy ready");
    Ok(env)
}

/// Rows and columns of the printed matrix.
pub fn sample_types() -> Vec<Type> {
    let t = || Type::constructor("T");
    vec![
        Type::any(),
        Type::application("Collection", [Projection::covariant(t())]),
        Type::application("List", [Projection::invariant(t())]),
        Type::application("List", [Projection::star()]),
        Type::application("MutableList", [Projection::invariant(t())]),
        Type::application("ArrayList", [Projection::invariant(t())]),
        Type::nothing(),
    ]
}

/// Relation of every sample type to every other one.
pub struct RelationMatrix {
    pub types: Vec<Type>,
    cells: Vec<SubtypingRelation>,
}

impl RelationMatrix {
    pub fn compute(env: &DeclEnvironment, types: Vec<Type>) -> Result<Self> {
        let mut cells = Vec::with_capacity(types.len() * types.len());
        for left in &types {
            for right in &types {
                let relation = env
                    .relation(left, right)
                    .with_context(|| format!("relating `{left}` to `{right}`"))?;
                cells.push(relation);
            }
        }
        Ok(Self { types, cells })
    }

    /// Relation of row `left` to column `right`.
    pub fn get(&self, left: usize, right: usize) -> SubtypingRelation {
        self.cells[left * self.types.len() + right]
    }

    /// Off-diagonal cells as `(left, right, relation)`.
    pub fn pairs(&self) -> impl Iterator<Item = (&Type, &Type, SubtypingRelation)> + '_ {
        let size = self.types.len();
        (0..size)
            .flat_map(move |left| (0..size).map(move |right| (left, right)))
            .filter(|(left, right)| left != right)
            .map(|(left, right)| (&self.types[left], &self.types[right], self.get(left, right)))
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
