//! Widening lattice over type descriptors.
//!
//! Scalars widen `Bool -> Int -> Decimal -> Float -> String`, a `String`
//! widens into `Nullable` and a `Nullable` into `List`. Merging two
//! descriptors walks the widening chain of the first, records every rung it
//! passes, then walks the chain of the second until it reaches a recorded
//! rung. Container arguments met at that rung are merged recursively.

use crate::schema::{ScalarKind, TypeDescriptor};

/// The descriptor a fold settles on once nothing can widen it further.
///
/// Only absorbing for lists one level deep, which is all inference produces.
pub fn terminal_type() -> TypeDescriptor {
    TypeDescriptor::list(TypeDescriptor::Nullable(ScalarKind::String))
}

/// Position of a descriptor on the widening chain, ignoring container
/// arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rung {
    Null,
    Bool,
    Int,
    Decimal,
    Float,
    String,
    Nullable,
    List,
}

fn rung(t: &TypeDescriptor) -> Rung {
    match t {
        TypeDescriptor::Null => Rung::Null,
        TypeDescriptor::Bool => Rung::Bool,
        TypeDescriptor::Int => Rung::Int,
        TypeDescriptor::Decimal => Rung::Decimal,
        TypeDescriptor::Float => Rung::Float,
        TypeDescriptor::String => Rung::String,
        TypeDescriptor::Nullable(_) => Rung::Nullable,
        TypeDescriptor::List(_) => Rung::List,
    }
}

/// Widen `t` by one rung.
///
/// `cue` is the descriptor the walk started from. A `String` becomes
/// `Nullable` of the cue's scalar kind, so that the nullable rung carries the
/// type the column actually holds. Returns `None` at the top of the chain.
fn broaden(t: &TypeDescriptor, cue: &TypeDescriptor) -> Option<TypeDescriptor> {
    match t {
        TypeDescriptor::Null => Some(TypeDescriptor::Nullable(ScalarKind::Null)),
        TypeDescriptor::Bool => Some(TypeDescriptor::Int),
        TypeDescriptor::Int => Some(TypeDescriptor::Decimal),
        TypeDescriptor::Decimal => Some(TypeDescriptor::Float),
        TypeDescriptor::Float => Some(TypeDescriptor::String),
        TypeDescriptor::String => match cue {
            TypeDescriptor::Nullable(kind) => Some(TypeDescriptor::Nullable(*kind)),
            TypeDescriptor::List(_) => None,
            scalar => scalar.as_scalar().map(TypeDescriptor::Nullable),
        },
        TypeDescriptor::Nullable(kind) => {
            Some(TypeDescriptor::list(TypeDescriptor::scalar(*kind)))
        }
        TypeDescriptor::List(_) => None,
    }
}

/// Every rung from `t` up to and including its list form.
fn broadening_chain(t: &TypeDescriptor) -> Vec<TypeDescriptor> {
    let mut chain = Vec::with_capacity(8);
    let mut current = Some(t.clone());
    while let Some(c) = current {
        current = broaden(&c, t);
        chain.push(c);
    }
    chain
}

/// Join two descriptors sitting on the same rung.
fn join_same_rung(visited: &TypeDescriptor, reached: &TypeDescriptor) -> TypeDescriptor {
    match (reached, visited) {
        (TypeDescriptor::Nullable(a), TypeDescriptor::Nullable(b)) => merge_types(
            &TypeDescriptor::scalar(*a),
            &TypeDescriptor::scalar(*b),
        )
        .nullable(),
        (TypeDescriptor::List(a), TypeDescriptor::List(b)) => {
            TypeDescriptor::list(merge_types(a, b))
        }
        _ => reached.clone(),
    }
}

/// Least upper bound of two descriptors.
///
/// # Examples
///
/// ```
/// use parsetypes::{merge_types, ScalarKind, TypeDescriptor};
///
/// assert_eq!(merge_types(&TypeDescriptor::Bool, &TypeDescriptor::Int), TypeDescriptor::Int);
/// assert_eq!(
///     merge_types(&TypeDescriptor::Null, &TypeDescriptor::Float),
///     TypeDescriptor::Nullable(ScalarKind::Float),
/// );
/// ```
pub fn merge_types(t1: &TypeDescriptor, t2: &TypeDescriptor) -> TypeDescriptor {
    if t1 == t2 {
        return t1.clone();
    }

    // A bare null only adds nullability to the other side.
    match (t1, t2) {
        (TypeDescriptor::Null, other) | (other, TypeDescriptor::Null) => {
            return other.clone().nullable();
        }
        _ => {}
    }

    let visited = broadening_chain(t1);

    let mut current = Some(t2.clone());
    while let Some(c) = current {
        let r = rung(&c);
        if let Some(v) = visited.iter().find(|v| rung(v) == r) {
            return join_same_rung(v, &c);
        }
        current = broaden(&c, t2);
    }

    log::warn!("no common rung for {t1} and {t2}, falling back to String");
    TypeDescriptor::String
}

/// Reduce multiple types into the narrowest type that encompasses them all.
///
/// An empty input yields `String`. The fold stops early once it reaches
/// `List[Nullable[String]]`.
///
/// # Examples
///
/// ```
/// use parsetypes::{reduce_types, TypeDescriptor};
///
/// assert_eq!(reduce_types([TypeDescriptor::Int, TypeDescriptor::Float]), TypeDescriptor::Float);
/// assert_eq!(reduce_types([TypeDescriptor::Bool, TypeDescriptor::Int]), TypeDescriptor::Int);
/// assert_eq!(
///     reduce_types([TypeDescriptor::Int, TypeDescriptor::Float, TypeDescriptor::String]),
///     TypeDescriptor::String,
/// );
/// ```
pub fn reduce_types<I>(types: I) -> TypeDescriptor
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<TypeDescriptor>,
{
    use std::borrow::Borrow;

    let terminal = terminal_type();
    let mut reduced: Option<TypeDescriptor> = None;

    for t in types {
        let t = t.borrow();
        let next = match reduced {
            None => t.clone(),
            Some(ref r) if r == t => continue,
            Some(ref r) => merge_types(r, t),
        };
        if next == terminal {
            return next;
        }
        reduced = Some(next);
    }

    reduced.unwrap_or(TypeDescriptor::String)
}
