use std::collections::HashMap;

use super::Ty;

#[derive(Clone, Debug)]
pub struct VarInfo {
    pub ty: Ty,
    pub line: usize,
}

/// Global-scope symbol table. The variable set only grows during analysis;
/// redeclaration is rejected by the analyzer, never treated as an update.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    vars: HashMap<String, VarInfo>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn define(&mut self, name: String, info: VarInfo) {
        if self.vars.insert(name.clone(), info).is_none() {
            self.order.push(name);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&VarInfo> {
        self.vars.get(name)
    }

    /// Variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarInfo)> {
        self.order
            .iter()
            .filter_map(|name| self.vars.get(name).map(|info| (name.as_str(), info)))
    }

    /// `name: type` listing, one variable per line, declaration order.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (name, info) in self.iter() {
            out.push_str(&format!("{}: {}\n", name, info.ty));
        }
        out
    }
}
