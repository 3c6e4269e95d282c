//! Symbol catalog.
//!
//! Two flat namespaces: the global scope, and (while a function body is
//! being resolved) one local scope. Blocks do not nest scopes, so this is
//! the whole story: a local may shadow a global, and any other collision
//! is a duplicate.

use std::collections::HashMap;

use crate::{
    ast::types::{ConstValue, Ty},
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Const,
    Var,
    Func,
    Struct,
    /// Labels occupy the function's flat local namespace like any other
    /// local, but name a statement rather than storage.
    Label,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: Ty,
    pub kind: SymbolKind,
    /// Set for `const` symbols only; lets array sizes resolve by name.
    pub value: Option<ConstValue>,
}

pub struct Catalog {
    globals: HashMap<String, Symbol>,
    /// Field lists per struct name, in declaration order.
    struct_fields: HashMap<String, Vec<(String, Ty)>>,
    /// Present only while a function body is being resolved.
    locals: Option<HashMap<String, Symbol>>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            globals: HashMap::new(),
            struct_fields: HashMap::new(),
            locals: None,
        }
    }

    /// Names starting with `_` belong to the builtin namespace and cannot
    /// be declared.
    fn check_reserved(name: &str, position: &Position) -> Result<(), Error> {
        if name.starts_with('_') {
            return Err(Error::new(
                ErrorImpl::ReservedName {
                    name: name.to_string(),
                },
                position.clone(),
            ));
        }
        Ok(())
    }

    pub fn declare_global(&mut self, symbol: Symbol, position: &Position) -> Result<(), Error> {
        Self::check_reserved(&symbol.name, position)?;
        if self.globals.contains_key(&symbol.name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: symbol.name.clone(),
                },
                position.clone(),
            ));
        }
        self.globals.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn enter_function(&mut self) {
        self.locals = Some(HashMap::new());
    }

    pub fn leave_function(&mut self) {
        self.locals = None;
    }

    /// Declares into the current function's flat scope. Shadowing a global
    /// is fine; colliding with any local (parameter, `result`, a label, or
    /// a `var` from any block depth) is a duplicate.
    pub fn declare_local(&mut self, symbol: Symbol, position: &Position) -> Result<(), Error> {
        Self::check_reserved(&symbol.name, position)?;
        let locals = self
            .locals
            .as_mut()
            .unwrap_or_else(|| unreachable!("declare_local outside a function body"));
        if locals.contains_key(&symbol.name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: symbol.name.clone(),
                },
                position.clone(),
            ));
        }
        locals.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Local scope first, then global.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        if let Some(locals) = &self.locals {
            if let Some(symbol) = locals.get(name) {
                return Some(symbol);
            }
        }
        self.globals.get(name)
    }

    pub fn set_struct_fields(&mut self, name: &str, fields: Vec<(String, Ty)>) {
        self.struct_fields.insert(name.to_string(), fields);
    }

    pub fn get_struct_fields(&self, name: &str) -> Option<&Vec<(String, Ty)>> {
        self.struct_fields.get(name)
    }
}
