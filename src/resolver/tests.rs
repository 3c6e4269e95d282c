//! Unit tests for the resolver module.
//!
//! This module contains tests for name and type resolution:
//! - Constant, global, struct and function collection
//! - Flat per-function scoping and shadowing
//! - Assignment, call and builtin type checking
//! - Labels, gotos and loop control
//! - The `_addr`, `_alloc` and `_free` special forms

use crate::{
    ast::types::Ty,
    errors::errors::Error,
    resolver::validated_ast::{TypedExprKind, TypedStmt, ValidatedProgram},
};

fn resolve_source(source: &str) -> Result<ValidatedProgram, Vec<Error>> {
    crate::resolve(source.to_string(), Some("test.rill".to_string()))
}

fn first_error_name(source: &str) -> String {
    let errors = resolve_source(source).err().unwrap();
    errors[0].get_error_name().to_string()
}

#[test]
fn test_const_then_global_then_assignment() {
    // const one 1 / var x int / x := one
    let validated = resolve_source(
        "const one 1\n\
         var x int\n\
         fun f void() { x := one }",
    )
    .unwrap();

    assert_eq!(validated.consts.len(), 1);
    assert_eq!(validated.globals.len(), 1);
    match &validated.functions[0].body[0] {
        TypedStmt::Assign { value, .. } => assert_eq!(value.ty, Ty::Int),
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_pointer_swap_function() {
    let validated = resolve_source(
        "fun swap_ints void(var x int*, var y int*) {\n\
             var t int\n\
             t := x[0]\n\
             x[0] := y[0]\n\
             y[0] := t\n\
         }",
    )
    .unwrap();

    // Indexing a pointer yields its element type.
    match &validated.functions[0].body[1] {
        TypedStmt::Assign { value, .. } => {
            assert_eq!(value.ty, Ty::Int);
            assert!(matches!(value.kind, TypedExprKind::Index { .. }));
        }
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_struct_array_composite_and_field_selection() {
    let validated = resolve_source(
        "struct Point [var x float, var y float]\n\
         const SIZE 4\n\
         var pts Point[SIZE]\n\
         fun init void() {\n\
             pts := [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]]\n\
             pts[3][y] := pts[0][y]\n\
         }",
    )
    .unwrap();

    // The named size resolved through the const.
    assert_eq!(
        validated.globals[0].ty,
        Ty::Array(Box::new(Ty::Struct("Point".to_string())), 4)
    );
    match &validated.functions[0].body[1] {
        TypedStmt::Assign { target, value, .. } => {
            assert_eq!(target.ty, Ty::Float);
            assert_eq!(value.ty, Ty::Float);
            assert!(matches!(target.kind, TypedExprKind::Field { .. }));
        }
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_goto_undefined_label() {
    assert_eq!(
        first_error_name("fun f void() { goto label nowhere }"),
        "NameError::UndefinedLabel"
    );
}

#[test]
fn test_break_outside_loop() {
    assert_eq!(
        first_error_name("fun f void() { break }"),
        "ControlFlowError::NotInLoop"
    );
}

#[test]
fn test_continue_outside_loop() {
    assert_eq!(
        first_error_name("fun f void() { if c { continue } }"),
        // The condition resolves first; keep it valid.
        "NameError::UndefinedIdentifier"
    );
    assert_eq!(
        first_error_name("var c int\nfun f void() { if c { continue } }"),
        "ControlFlowError::NotInLoop"
    );
}

#[test]
fn test_function_pointer_assignment() {
    let validated = resolve_source(
        "var f1 void(int*, int*)*\n\
         fun swap_ints void(var x int*, var y int*) { }\n\
         fun setup void() { f1 := _addr(swap_ints) }",
    )
    .unwrap();

    let expected = Ty::Function {
        params: vec![
            Ty::Pointer(Box::new(Ty::Int)),
            Ty::Pointer(Box::new(Ty::Int)),
        ],
        ret: Box::new(Ty::Void),
    };
    assert_eq!(validated.globals[0].ty, expected);
    match &validated.functions[1].body[0] {
        TypedStmt::Assign { value, .. } => {
            assert_eq!(value.ty, expected);
            assert!(matches!(
                value.kind,
                TypedExprKind::AddrOfFunc { .. }
            ));
        }
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_indirect_call_through_function_pointer() {
    let validated = resolve_source(
        "var f1 int(int)*\n\
         fun double int(var n int) { result := _add_i(n, n) }\n\
         fun g void() {\n\
             var x int\n\
             f1 := _addr(double)\n\
             x := f1(21)\n\
         }",
    )
    .unwrap();

    match &validated.functions[1].body[2] {
        TypedStmt::Assign { value, .. } => {
            assert_eq!(value.ty, Ty::Int);
            assert!(matches!(value.kind, TypedExprKind::Call { .. }));
        }
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_flat_scope_duplicate_across_blocks() {
    // Blocks do not open scopes; the inner `var x` collides.
    assert_eq!(
        first_error_name("fun f void() { var x int { var x float } }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_local_shadows_global() {
    let validated = resolve_source(
        "var x float\n\
         fun f void() { var x int\n x := 1 }",
    )
    .unwrap();

    match &validated.functions[0].body[1] {
        TypedStmt::Assign { target, .. } => assert_eq!(target.ty, Ty::Int),
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_param_collides_with_local() {
    assert_eq!(
        first_error_name("fun f void(var x int) { var x int }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_duplicate_label() {
    assert_eq!(
        first_error_name("fun f void() { label a label a }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_label_collides_with_earlier_var() {
    assert_eq!(
        first_error_name("fun f void() { var x int label x }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_var_collides_with_earlier_label() {
    assert_eq!(
        first_error_name("fun f void() { label x var x int }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_label_collides_with_parameter() {
    assert_eq!(
        first_error_name("fun f void(var n int) { label n }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_label_collides_with_result() {
    // `result` is a declared local in any non-void function.
    assert_eq!(
        first_error_name("fun three int() { label result result := 3 }"),
        "NameError::Duplicate"
    );
}

#[test]
fn test_label_is_not_a_value() {
    assert_eq!(
        first_error_name(
            "fun f void() {\n\
                 var x int\n\
                 label spot\n\
                 x := spot\n\
             }"
        ),
        "TypeError::NotAddressable"
    );
}

#[test]
fn test_forward_goto() {
    let validated = resolve_source(
        "fun f void() {\n\
             goto label done\n\
             label done\n\
         }",
    )
    .unwrap();

    let function = &validated.functions[0];
    assert_eq!(function.labels.len(), 1);
    assert_eq!(function.labels[0].name, "done");
    match &function.body[0] {
        TypedStmt::Goto { target, .. } => assert_eq!(*target, 0),
        _ => panic!("expected a goto"),
    }
}

#[test]
fn test_goto_into_loop_body() {
    // Labels are function-flat, so jumping across block structure is fine.
    let result = resolve_source(
        "var c int\n\
         fun f void() {\n\
             goto label inside\n\
             while c { label inside }\n\
         }",
    );

    assert!(result.is_ok());
}

#[test]
fn test_label_paths_distinguish_if_branches() {
    let validated = resolve_source(
        "var c int\n\
         fun f void() {\n\
             if c {\n\
                 label a\n\
             } else {\n\
                 label b\n\
             }\n\
         }",
    )
    .unwrap();

    // The branch discriminant (then = 0, else = 1) keeps the paths apart.
    let labels = &validated.functions[0].labels;
    assert_eq!(labels[0].name, "a");
    assert_eq!(labels[0].stmt_path, vec![0, 0, 0]);
    assert_eq!(labels[1].name, "b");
    assert_eq!(labels[1].stmt_path, vec![0, 1, 0]);
}

#[test]
fn test_label_path_in_else_if_chain() {
    let validated = resolve_source(
        "var c int\n\
         fun f void() {\n\
             if c {\n\
                 c := 0\n\
             } else if c {\n\
                 label deep\n\
             }\n\
         }",
    )
    .unwrap();

    // else-if nests as the else arm's single statement: [if, else,
    // then-of-inner-if, index].
    let labels = &validated.functions[0].labels;
    assert_eq!(labels[0].name, "deep");
    assert_eq!(labels[0].stmt_path, vec![0, 1, 0, 0]);
}

#[test]
fn test_labels_are_not_shared_across_functions() {
    assert_eq!(
        first_error_name(
            "fun f void() { label spot }\n\
             fun g void() { goto label spot }"
        ),
        "NameError::UndefinedLabel"
    );
}

#[test]
fn test_forward_function_reference() {
    let result = resolve_source(
        "fun caller void() { callee() }\n\
         fun callee void() { }",
    );

    assert!(result.is_ok());
}

#[test]
fn test_zero_array_size() {
    assert_eq!(first_error_name("var a int[0]"), "TypeError::InvalidArraySize");
}

#[test]
fn test_negative_array_size() {
    assert_eq!(first_error_name("var a int[-3]"), "TypeError::InvalidArraySize");
}

#[test]
fn test_float_const_array_size() {
    assert_eq!(
        first_error_name("const SIZE 2.5\nvar a int[SIZE]"),
        "TypeError::InvalidArraySize"
    );
}

#[test]
fn test_runtime_variable_array_size() {
    // Array sizes resolve at compile time; only consts may be named.
    assert_eq!(
        first_error_name("var n int\nvar a int[n]"),
        "TypeError::InvalidArraySize"
    );
}

#[test]
fn test_runtime_local_array_size() {
    assert_eq!(
        first_error_name("fun f void() { var n int var a int[n] }"),
        "TypeError::InvalidArraySize"
    );
}

#[test]
fn test_self_containing_struct() {
    assert_eq!(
        first_error_name("struct A [var next A]"),
        "TypeError::SelfContainingStruct"
    );
}

#[test]
fn test_indirect_struct_cycle() {
    assert_eq!(
        first_error_name(
            "struct A [var b B]\n\
             struct B [var a A]"
        ),
        "TypeError::SelfContainingStruct"
    );
}

#[test]
fn test_pointer_breaks_struct_cycle() {
    let result = resolve_source("struct Node [var value int, var next Node*]");

    assert!(result.is_ok());
}

#[test]
fn test_array_field_propagates_containment() {
    assert_eq!(
        first_error_name("struct A [var items A[3]]"),
        "TypeError::SelfContainingStruct"
    );
}

#[test]
fn test_undefined_identifier() {
    assert_eq!(
        first_error_name("fun f void() { var x int\n x := missing }"),
        "NameError::UndefinedIdentifier"
    );
}

#[test]
fn test_reserved_name() {
    assert_eq!(first_error_name("var _x int"), "NameError::ReservedName");
}

#[test]
fn test_reserved_label_name() {
    assert_eq!(
        first_error_name("fun f void() { label _spot }"),
        "NameError::ReservedName"
    );
}

#[test]
fn test_assignment_mismatch() {
    assert_eq!(
        first_error_name("fun f void() { var x int\n x := 1.5 }"),
        "TypeError::AssignmentMismatch"
    );
}

#[test]
fn test_non_int_condition() {
    assert_eq!(
        first_error_name("fun f void() { if 1.0 { } }"),
        "TypeError::NonIntCondition"
    );
}

#[test]
fn test_non_int_index() {
    assert_eq!(
        first_error_name("fun f void() { var a int[2]\n var x int\n x := a[1.0] }"),
        "TypeError::NonIntIndex"
    );
}

#[test]
fn test_unknown_type() {
    assert_eq!(first_error_name("var x banana"), "TypeError::UnknownType");
}

#[test]
fn test_invalid_void() {
    assert_eq!(first_error_name("var x void"), "TypeError::InvalidVoid");
}

#[test]
fn test_not_callable() {
    assert_eq!(
        first_error_name("var x int\nfun f void() { x(1) }"),
        "TypeError::NotCallable"
    );
}

#[test]
fn test_not_indexable() {
    assert_eq!(
        first_error_name("fun f void() { var x int\n var y int\n y := x[0] }"),
        "TypeError::NotIndexable"
    );
}

#[test]
fn test_unknown_field() {
    assert_eq!(
        first_error_name(
            "struct Point [var x float]\n\
             var p Point\n\
             fun f void() { var z float\n z := p[w] }"
        ),
        "TypeError::UnknownField"
    );
}

#[test]
fn test_bare_function_name_is_not_a_value() {
    assert_eq!(
        first_error_name(
            "var f1 void()*\n\
             fun g void() { }\n\
             fun h void() { f1 := g }"
        ),
        "TypeError::NotAddressable"
    );
}

#[test]
fn test_builtin_call_types() {
    let validated = resolve_source(
        "fun f void() { var x int\n x := _add_i(1, 2) }",
    )
    .unwrap();

    match &validated.functions[0].body[1] {
        TypedStmt::Assign { value, .. } => {
            assert_eq!(value.ty, Ty::Int);
            assert!(matches!(value.kind, TypedExprKind::Builtin { .. }));
        }
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_float_comparison_yields_int() {
    let result = resolve_source(
        "fun f void(var a float, var b float) { if _lt_f(a, b) { } }",
    );

    assert!(result.is_ok());
}

#[test]
fn test_builtin_argument_mismatch() {
    assert_eq!(
        first_error_name("fun f void() { var x int\n x := _add_i(1, 2.0) }"),
        "TypeError::ArgumentMismatch"
    );
}

#[test]
fn test_builtin_argument_count() {
    assert_eq!(
        first_error_name("fun f void() { var x int\n x := _add_i(1) }"),
        "TypeError::UnexpectedArguments"
    );
}

#[test]
fn test_call_argument_mismatch() {
    assert_eq!(
        first_error_name(
            "fun take void(var n int) { }\n\
             fun f void() { take(1.0) }"
        ),
        "TypeError::ArgumentMismatch"
    );
}

#[test]
fn test_alloc_and_free() {
    let validated = resolve_source(
        "fun f void() {\n\
             var p int*\n\
             p := _alloc(int, 8)\n\
             _free(p)\n\
         }",
    )
    .unwrap();

    match &validated.functions[0].body[1] {
        TypedStmt::Assign { value, .. } => {
            assert_eq!(value.ty, Ty::Pointer(Box::new(Ty::Int)));
            assert!(matches!(value.kind, TypedExprKind::Alloc { .. }));
        }
        _ => panic!("expected an assignment"),
    }
    match &validated.functions[0].body[2] {
        TypedStmt::Call { call, .. } => {
            assert_eq!(call.ty, Ty::Void);
            assert!(matches!(call.kind, TypedExprKind::Free { .. }));
        }
        _ => panic!("expected a call statement"),
    }
}

#[test]
fn test_alloc_single() {
    let result = resolve_source(
        "struct Point [var x float, var y float]\n\
         fun f void() { var p Point*\n p := _alloc(Point) }",
    );

    assert!(result.is_ok());
}

#[test]
fn test_free_requires_pointer() {
    assert_eq!(
        first_error_name("fun f void() { _free(1) }"),
        "TypeError::ArgumentMismatch"
    );
}

#[test]
fn test_result_pseudo_variable() {
    let validated = resolve_source("fun three int() { result := 3 }").unwrap();

    match &validated.functions[0].body[0] {
        TypedStmt::Assign { target, .. } => assert_eq!(target.ty, Ty::Int),
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_result_absent_in_void_function() {
    assert_eq!(
        first_error_name("fun f void() { result := 3 }"),
        "NameError::UndefinedIdentifier"
    );
}

#[test]
fn test_void_call_value_rejected() {
    assert_eq!(
        first_error_name(
            "fun noop void() { }\n\
             fun f void() { var x int\n x := noop() }"
        ),
        "TypeError::AssignmentMismatch"
    );
}

#[test]
fn test_composite_shape_mismatch() {
    assert_eq!(
        first_error_name("fun f void() { var a int[3]\n a := [1, 2] }"),
        "TypeError::CompositeShapeMismatch"
    );
}

#[test]
fn test_composite_needs_context() {
    assert_eq!(
        first_error_name("fun take void(var n int) { }\nfun f void() { take([1]) }"),
        "TypeError::CompositeShapeMismatch"
    );
}

#[test]
fn test_diagnostics_accumulate_per_function() {
    let errors = resolve_source(
        "fun f void() { break }\n\
         fun g void() { goto label nowhere }\n\
         fun h void() { }",
    )
    .err()
    .unwrap();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].get_error_name(), "ControlFlowError::NotInLoop");
    assert_eq!(errors[1].get_error_name(), "NameError::UndefinedLabel");
}

#[test]
fn test_first_error_halts_only_that_function() {
    // The second error in f is masked, but g still reports.
    let errors = resolve_source(
        "fun f void() { break\n continue }\n\
         fun g void() { var x int\n x := 1.0 }",
    )
    .err()
    .unwrap();

    assert_eq!(errors.len(), 2);
}
