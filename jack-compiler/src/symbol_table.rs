//! Two-scope symbol table: class-level (`static`/`field`) and
//! subroutine-level (`argument`/`local`), subroutine-first lookup with
//! class fallback.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Static,
    Field,
    Argument,
    Local,
}

impl VarKind {
    /// The VM memory segment this kind maps to.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Field => "this",
            Self::Argument => "argument",
            Self::Local => "local",
        }
    }
}

#[derive(Debug, Clone)]
struct SymbolEntry {
    ty: String,
    kind: VarKind,
    index: u16,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    class_scope: HashMap<String, SymbolEntry>,
    subroutine_scope: HashMap<String, SymbolEntry>,
    static_count: u16,
    field_count: u16,
    argument_count: u16,
    local_count: u16,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the subroutine scope and resets its two counters. Class-level
    /// `static`/`field` counters and entries persist across subroutines.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.argument_count = 0;
        self.local_count = 0;
    }

    /// Inserts `name` into the scope implied by `kind`, at that kind's
    /// current counter, then increments the counter.
    ///
    /// `var`-declared locals must be defined with `VarKind::Local` — a
    /// known buggy reference implementation instead reuses the argument
    /// counter, which this table does not replicate.
    pub fn define(&mut self, name: &str, ty: &str, kind: VarKind) {
        let index = match kind {
            VarKind::Static => {
                let i = self.static_count;
                self.static_count += 1;
                i
            }
            VarKind::Field => {
                let i = self.field_count;
                self.field_count += 1;
                i
            }
            VarKind::Argument => {
                let i = self.argument_count;
                self.argument_count += 1;
                i
            }
            VarKind::Local => {
                let i = self.local_count;
                self.local_count += 1;
                i
            }
        };
        let entry = SymbolEntry {
            ty: ty.to_string(),
            kind,
            index,
        };
        match kind {
            VarKind::Static | VarKind::Field => {
                self.class_scope.insert(name.to_string(), entry);
            }
            VarKind::Argument | VarKind::Local => {
                self.subroutine_scope.insert(name.to_string(), entry);
            }
        }
    }

    #[must_use]
    pub fn var_count(&self, kind: VarKind) -> u16 {
        match kind {
            VarKind::Static => self.static_count,
            VarKind::Field => self.field_count,
            VarKind::Argument => self.argument_count,
            VarKind::Local => self.local_count,
        }
    }

    fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.subroutine_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<VarKind> {
        self.lookup(name).map(|e| e.kind)
    }

    /// Returns the declared type of `name`. A known buggy reference
    /// implementation (`original_source/11/JackCompiler.py`'s `typeOf`)
    /// omits the return statement and yields nothing; this lookup always
    /// returns the stored type.
    #[must_use]
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|e| e.ty.as_str())
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.lookup(name).map(|e| e.index)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
