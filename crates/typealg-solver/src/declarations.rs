//! Declaration-backed typing environment.
//!
//! [`DeclEnvironment`] holds a registry of [`TypeDeclaration`]s keyed by
//! constructor. A declaration lists its type parameters (with declared
//! variance) and its direct supertypes, each written in terms of the
//! declaration's own parameters:
//!
//! ```ignore
//! let env = DeclEnvironment::new();
//! env.register(
//!     TypeDeclaration::new("MutableList")
//!         .with_param(TypeParameter::new("E"))
//!         .with_supertype(Type::application("List", [Projection::covariant(Type::constructor("E"))])),
//! )?;
//! ```
//!
//! ## Nominal closure
//!
//! | Mode | `nominal_relation` | `effective_supertype` |
//! |------|--------------------|-----------------------|
//! | `DirectOnly` | declared supertypes, one hop | declared entry only |
//! | `Transitive` | every declared ancestor | remappings composed along the path |
//!
//! `Transitive` is the default.

use crate::environment::{TypingEnvironment, default_relation};
use crate::error::{TypeError, TypeResult};
use crate::instantiate::{TypeInstantiator, TypeSubstitution};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::relation::SubtypingRelation;
use crate::types::{Constructor, Projection, Type, TypeApplication};
use crate::variance::Variance;
use dashmap::DashMap;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

// =============================================================================
// Declarations
// =============================================================================

/// A declared type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameter {
    pub constructor: Constructor,
    pub variance: Variance,
    /// Upper bounds. Recorded for clients; the relation engine does not use them.
    pub bounds: Vec<Type>,
}

impl TypeParameter {
    pub fn new(constructor: impl Into<Constructor>) -> Self {
        Self {
            constructor: constructor.into(),
            variance: Variance::Invariant,
            bounds: Vec::new(),
        }
    }

    pub fn covariant(constructor: impl Into<Constructor>) -> Self {
        Self::new(constructor).with_variance(Variance::Covariant)
    }

    pub fn contravariant(constructor: impl Into<Constructor>) -> Self {
        Self::new(constructor).with_variance(Variance::Contravariant)
    }

    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_bound(mut self, bound: Type) -> Self {
        if !self.bounds.contains(&bound) {
            self.bounds.push(bound);
        }
        self
    }
}

/// A generic (or plain) type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub constructor: Constructor,
    pub params: Vec<TypeParameter>,
    /// Direct supertypes: constructors or applications.
    pub supertypes: Vec<Type>,
}

impl TypeDeclaration {
    pub fn new(constructor: impl Into<Constructor>) -> Self {
        Self {
            constructor: constructor.into(),
            params: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: TypeParameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_supertype(mut self, supertype: Type) -> Self {
        if !self.supertypes.contains(&supertype) {
            self.supertypes.push(supertype);
        }
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The declared supertype whose head is `constructor`.
    pub fn supertype_by(&self, constructor: &Constructor) -> Option<&Type> {
        self.supertypes
            .iter()
            .find(|supertype| supertype.head_constructor() == Some(constructor))
    }

    /// This declaration applied to its own parameters, `List<E>` for `List<out E>`.
    pub fn self_application(&self) -> TypeApplication {
        TypeApplication::new(
            self.constructor.clone(),
            self.params
                .iter()
                .map(|param| Projection::invariant(Type::Constructor(param.constructor.clone()))),
        )
    }
}

/// How far `nominal_relation` and `effective_supertype` follow declared supertypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NominalClosure {
    /// Only direct declared supertypes are consulted.
    DirectOnly,
    /// Every ancestor reachable through declared supertypes.
    #[default]
    Transitive,
}

// =============================================================================
// DeclEnvironment
// =============================================================================

/// Environment backed by a registry of declarations.
///
/// Registration takes `&self`; the registry is a `DashMap`, so readers always
/// observe whole declarations. Register every constructor before relating
/// types that mention it.
#[derive(Debug, Default)]
pub struct DeclEnvironment {
    decls: DashMap<Constructor, Arc<TypeDeclaration>>,
    closure: NominalClosure,
}

impl DeclEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closure(mut self, closure: NominalClosure) -> Self {
        self.closure = closure;
        self
    }

    pub fn closure(&self) -> NominalClosure {
        self.closure
    }

    /// Register `decl`, replacing any previous declaration of the same constructor.
    pub fn register(&self, decl: TypeDeclaration) -> TypeResult<()> {
        for supertype in &decl.supertypes {
            if !supertype.is_base() {
                return Err(TypeError::InvalidSupertype {
                    constructor: decl.constructor.clone(),
                    supertype: supertype.clone(),
                });
            }
        }

        trace!(
            constructor = %decl.constructor,
            params = decl.params.len(),
            supertypes = decl.supertypes.len(),
            "DeclEnvironment::register"
        );
        let constructor = decl.constructor.clone();
        if self.decls.insert(constructor, Arc::new(decl)).is_some() {
            debug!("DeclEnvironment::register - replaced an existing declaration");
        }
        Ok(())
    }

    pub fn get(&self, constructor: &Constructor) -> Option<Arc<TypeDeclaration>> {
        self.decls.get(constructor).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, constructor: &Constructor) -> bool {
        self.decls.contains_key(constructor)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    fn require(&self, constructor: &Constructor) -> TypeResult<Arc<TypeDeclaration>> {
        self.get(constructor)
            .ok_or_else(|| TypeError::UnresolvedDeclaration {
                constructor: constructor.clone(),
            })
    }

    /// Every constructor reachable from `constructor` through declared
    /// supertypes, excluding `constructor` itself unless the hierarchy is cyclic.
    pub fn ancestors(&self, constructor: &Constructor) -> FxHashSet<Constructor> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        queue.push_back(constructor.clone());

        while let Some(current) = queue.pop_front() {
            let Some(decl) = self.get(&current) else {
                continue;
            };
            for supertype in &decl.supertypes {
                if let Some(head) = supertype.head_constructor() {
                    if seen.insert(head.clone()) {
                        queue.push_back(head.clone());
                    }
                }
            }
        }
        seen
    }

    fn direct_relation(&self, this: &Constructor, that: &Constructor) -> SubtypingRelation {
        let (Some(this_decl), Some(that_decl)) = (self.get(this), self.get(that)) else {
            return SubtypingRelation::Unrelated;
        };

        let literal = |decl: &TypeDeclaration, target: &Constructor| {
            decl.supertypes
                .iter()
                .any(|supertype| supertype.as_constructor() == Some(target))
        };
        if literal(&*this_decl, that) {
            return SubtypingRelation::Subtype;
        }
        if literal(&*that_decl, this) {
            return SubtypingRelation::Supertype;
        }

        if this_decl.supertype_by(that).is_some() {
            return SubtypingRelation::Subtype;
        }
        if that_decl.supertype_by(this).is_some() {
            return SubtypingRelation::Supertype;
        }
        SubtypingRelation::Unrelated
    }

    fn transitive_relation(&self, this: &Constructor, that: &Constructor) -> SubtypingRelation {
        let is_subtype = self.ancestors(this).contains(that);
        let is_supertype = self.ancestors(that).contains(this);
        match (is_subtype, is_supertype) {
            (true, false) => SubtypingRelation::Subtype,
            (false, true) => SubtypingRelation::Supertype,
            // Mutually inheriting declarations are treated as unrelated.
            _ => SubtypingRelation::Unrelated,
        }
    }

    /// Express `supertype`, written in terms of `holder`'s parameters, in
    /// terms of the concrete `via` instantiation of `holder`.
    fn specialize(&self, supertype: &Type, via: &Type) -> TypeResult<Type> {
        match via {
            Type::Application(app) => self.remap_type_arguments(supertype, app),
            Type::Constructor(constructor) => {
                let decl = self.require(constructor)?;
                if decl.params.is_empty() {
                    return Ok(supertype.clone());
                }
                // A raw generic supertype stands for its star projection.
                let starred = TypeApplication::new(
                    constructor.clone(),
                    decl.params.iter().map(|_| Projection::star()),
                );
                self.remap_type_arguments(supertype, &starred)
            }
            other => Err(TypeError::UnreachableTypeShape {
                detail: format!("supertype path through `{other}`"),
            }),
        }
    }

    /// Breadth-first search for the ancestor `that`, composing the declared
    /// supertypes along the way.
    fn transitive_supertype(&self, this: &Constructor, that: &Constructor) -> TypeResult<Type> {
        let mut guard: RecursionGuard<Constructor> =
            RecursionGuard::with_profile(RecursionProfile::NominalWalk);
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(this.clone());

        for supertype in &self.require(this)?.supertypes {
            queue.push_back(supertype.clone());
        }

        while let Some(path) = queue.pop_front() {
            let Some(head) = path.head_constructor().cloned() else {
                continue;
            };
            if head == *that {
                trace!(from = %this, to = %that, supertype = %path, "DeclEnvironment: effective supertype");
                return Ok(path);
            }
            if !visited.insert(head.clone()) {
                continue;
            }
            match guard.enter(head.clone()) {
                RecursionResult::Entered => {}
                denied => {
                    debug!(from = %this, to = %that, reason = ?denied, "DeclEnvironment: supertype walk stopped");
                    break;
                }
            }
            let expanded = self.expand_supertypes(&head, &path);
            guard.leave(&head);
            for next in expanded? {
                queue.push_back(next);
            }
        }

        self.missing_supertype(this, that)
    }

    fn expand_supertypes(&self, head: &Constructor, path: &Type) -> TypeResult<Vec<Type>> {
        let Some(decl) = self.get(head) else {
            return Ok(Vec::new());
        };
        decl.supertypes
            .iter()
            .map(|supertype| self.specialize(supertype, path))
            .collect()
    }

    fn missing_supertype(&self, this: &Constructor, that: &Constructor) -> TypeResult<Type> {
        if that.is_any() {
            return Ok(Type::any());
        }
        Err(TypeError::UnresolvedSupertype {
            subtype: this.clone(),
            supertype: that.clone(),
        })
    }
}

impl TypingEnvironment for DeclEnvironment {
    fn nominal_relation(&self, this: &Constructor, that: &Constructor) -> SubtypingRelation {
        let extremes = default_relation(this, that);
        if extremes != SubtypingRelation::Unrelated {
            return extremes;
        }
        match self.closure {
            NominalClosure::DirectOnly => self.direct_relation(this, that),
            NominalClosure::Transitive => self.transitive_relation(this, that),
        }
    }

    fn effective_supertype(&self, this: &Constructor, that: &Constructor) -> TypeResult<Type> {
        match self.closure {
            NominalClosure::DirectOnly => {
                let decl = self.require(this)?;
                match decl.supertype_by(that) {
                    Some(supertype) => Ok(supertype.clone()),
                    None => self.missing_supertype(this, that),
                }
            }
            NominalClosure::Transitive => self.transitive_supertype(this, that),
        }
    }

    fn remap_type_arguments(
        &self,
        supertype: &Type,
        subtype: &TypeApplication,
    ) -> TypeResult<Type> {
        let decl = self.require(&subtype.constructor)?;
        if decl.arity() != subtype.arity() {
            return Err(TypeError::ArityMismatch {
                constructor: subtype.constructor.clone(),
                expected: decl.arity(),
                found: subtype.arity(),
            });
        }

        let mut substitution = TypeSubstitution::new();
        for (param, arg) in decl.params.iter().zip(subtype.args.iter()) {
            substitution.insert(param.constructor.clone(), arg.clone());
        }

        let remapped = TypeInstantiator::new(self, &substitution).instantiate(supertype)?;
        trace!(supertype = %supertype, subtype = %subtype, remapped = %remapped, "DeclEnvironment::remap_type_arguments");
        if !remapped.is_base() {
            return Err(TypeError::UnreachableTypeShape {
                detail: format!("remapping `{supertype}` produced `{remapped}`"),
            });
        }
        Ok(remapped)
    }

    fn declsite_variance(&self, constructor: &Constructor, index: usize) -> Variance {
        self.get(constructor)
            .and_then(|decl| decl.params.get(index).map(|param| param.variance))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/declarations_tests.rs"]
mod tests;
