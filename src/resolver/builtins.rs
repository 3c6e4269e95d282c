//! Builtin operation signatures.
//!
//! The language has no operators; arithmetic, comparison and bitwise
//! operations are `_`-prefixed builtin calls checked against this table.
//! `_addr`, `_alloc` and `_free` are special forms (they take non-value
//! arguments or accept whole type families) and are handled directly by
//! the resolver instead of living here.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::types::Ty;

lazy_static! {
    /// `name -> (parameter types, return type)`.
    pub static ref BUILTINS: HashMap<&'static str, (Vec<Ty>, Ty)> = {
        let mut map = HashMap::new();

        // Signed int arithmetic and bitwise ops.
        for name in [
            "_add_i", "_sub_i", "_mult_i", "_div_i", "_rem_i", "_shl_i", "_shr_i", "_and_i",
            "_or_i",
        ] {
            map.insert(name, (vec![Ty::Int, Ty::Int], Ty::Int));
        }
        // Unary int ops: bitwise flip and logical not.
        for name in ["_flip_i", "_not_i"] {
            map.insert(name, (vec![Ty::Int], Ty::Int));
        }
        // Int comparisons.
        for name in ["_eq_i", "_neq_i", "_lt_i", "_lte_i", "_gt_i", "_gte_i"] {
            map.insert(name, (vec![Ty::Int, Ty::Int], Ty::Int));
        }
        // Unsigned-interpretation variants.
        for name in [
            "_div_u", "_rem_u", "_shr_u", "_lt_u", "_lte_u", "_gt_u", "_gte_u",
        ] {
            map.insert(name, (vec![Ty::Int, Ty::Int], Ty::Int));
        }
        // Float arithmetic.
        for name in ["_add_f", "_sub_f", "_mult_f", "_div_f"] {
            map.insert(name, (vec![Ty::Float, Ty::Float], Ty::Float));
        }
        // Float comparisons produce int (the condition type).
        for name in ["_eq_f", "_neq_f", "_lt_f", "_lte_f", "_gt_f", "_gte_f"] {
            map.insert(name, (vec![Ty::Float, Ty::Float], Ty::Int));
        }

        map
    };
}
