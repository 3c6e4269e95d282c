//! Type representations.
//!
//! Two forms live here:
//!
//! - [`TypeExpr`] is what the parser produces: struct names are unresolved
//!   strings and array sizes may be const references. It is pure syntax.
//! - [`Ty`] is what the resolver produces: array sizes are concrete, struct
//!   names are known to exist, and `Display` renders the source syntax back.
//!
//! `Ty` equality is structural for pointers, arrays and function signatures,
//! and nominal for structs (field lists live in the catalog, not here).

use std::fmt::Display;

use crate::Position;

/// An array size as written: either an integer literal or the name of a
/// constant, resolved during the collection pass.
#[derive(Debug, Clone)]
pub enum ArraySize {
    Literal(i64),
    Named(String),
}

impl Display for ArraySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArraySize::Literal(n) => write!(f, "{}", n),
            ArraySize::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A type as written in source. Suffixes (`*`, `[n]`, signature) nest
/// outward, so `int[4]*` is `Pointer(Array(int, 4))`.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    Named {
        name: String,
        position: Position,
    },
    Pointer {
        elem: Box<TypeExpr>,
    },
    Array {
        elem: Box<TypeExpr>,
        size: ArraySize,
    },
    /// A function-pointer type: `ret(param, ...)*`. The trailing `*` is part
    /// of the written form and is implied by this variant.
    Function {
        ret: Box<TypeExpr>,
        params: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn position(&self) -> Position {
        match self {
            TypeExpr::Named { position, .. } => position.clone(),
            TypeExpr::Pointer { elem } => elem.position(),
            TypeExpr::Array { elem, .. } => elem.position(),
            TypeExpr::Function { ret, .. } => ret.position(),
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Named { name, .. } => write!(f, "{}", name),
            TypeExpr::Pointer { elem } => write!(f, "{}*", elem),
            TypeExpr::Array { elem, size } => write!(f, "{}[{}]", elem, size),
            TypeExpr::Function { ret, params } => {
                write!(f, "{}(", ret)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")*")
            }
        }
    }
}

/// A fully resolved type. This is what every validated expression carries
/// and what the catalog stores for every symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Int,
    Float,
    Byte,
    /// Valid only as a function return type, never as a value type.
    Void,
    Pointer(Box<Ty>),
    Array(Box<Ty>, usize),
    /// Nominal: two struct types are equal iff their names are.
    Struct(String),
    /// Doubles as the type of a declared function and the type of a
    /// function-pointer value (`_addr(f)` has exactly `f`'s signature).
    Function { params: Vec<Ty>, ret: Box<Ty> },
}

impl Ty {
    pub fn is_void(&self) -> bool {
        matches!(self, Ty::Void)
    }
}

impl Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::Float => write!(f, "float"),
            Ty::Byte => write!(f, "byte"),
            Ty::Void => write!(f, "void"),
            Ty::Pointer(elem) => write!(f, "{}*", elem),
            Ty::Array(elem, size) => write!(f, "{}[{}]", elem, size),
            Ty::Struct(name) => write!(f, "{}", name),
            Ty::Function { params, ret } => {
                write!(f, "{}(", ret)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")*")
            }
        }
    }
}

/// A literal constant value, carried by `const` symbols so array sizes can
/// be resolved at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
    Byte(u8),
}

impl ConstValue {
    pub fn ty(&self) -> Ty {
        match self {
            ConstValue::Int(_) => Ty::Int,
            ConstValue::Float(_) => Ty::Float,
            ConstValue::Byte(_) => Ty::Byte,
        }
    }
}

impl Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstValue::Int(n) => write!(f, "{}", n),
            ConstValue::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            ConstValue::Byte(b) => write!(f, "{}b", b),
        }
    }
}
