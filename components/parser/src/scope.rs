//! Declared-name tracking for redeclaration early errors
//!
//! The parser declares every binding as it is parsed. A scope keeps the
//! names declared lexically, with `var`, and as sloppy-mode functions;
//! `var` names are also recorded in every block they hoist through, which
//! is what makes `{ var a; } let a;` a redeclaration.
//!
//! Private class names are tracked separately in [`PrivateNames`]; they
//! may be referenced before their declaration, so references are resolved
//! when the class body ends.

use bitflags::bitflags;
use std::collections::{HashMap, HashSet};

bitflags! {
    /// Kind of a scope
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScopeFlags: u8 {
        /// Program top level
        const TOP = 1 << 0;
        /// Function body (parameters share it)
        const FUNCTION = 1 << 1;
        /// Class static block
        const STATIC_BLOCK = 1 << 2;
        /// Catch clause with a single identifier parameter
        const SIMPLE_CATCH = 1 << 3;
    }
}

impl ScopeFlags {
    /// Scopes that stop `var` hoisting.
    const VAR: ScopeFlags = ScopeFlags::TOP
        .union(ScopeFlags::FUNCTION)
        .union(ScopeFlags::STATIC_BLOCK);
}

/// How a name is being bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `var`, parameters, and functions hoisted like `var`
    Var,
    /// `let`, `const`, `class`, imports, block-level strict functions
    Lexical,
    /// Sloppy-mode plain function declaration
    Function,
    /// Identifier parameter of a `catch` clause
    SimpleCatch,
}

#[derive(Debug)]
struct Scope {
    flags: ScopeFlags,
    var: HashSet<String>,
    lexical: HashSet<String>,
    functions: HashSet<String>,
    catch_param: Option<String>,
}

impl Scope {
    fn new(flags: ScopeFlags) -> Self {
        Scope {
            flags,
            var: HashSet::new(),
            lexical: HashSet::new(),
            functions: HashSet::new(),
            catch_param: None,
        }
    }
}

/// Stack of open scopes during a parse
#[derive(Debug)]
pub struct ScopeTracker {
    scopes: Vec<Scope>,
    module: bool,
}

impl ScopeTracker {
    /// Create a tracker with the program scope open
    pub fn new(module: bool) -> Self {
        ScopeTracker {
            scopes: vec![Scope::new(ScopeFlags::TOP)],
            module,
        }
    }

    /// Open a nested scope
    pub fn enter(&mut self, flags: ScopeFlags) {
        self.scopes.push(Scope::new(flags));
    }

    /// Close the innermost scope
    pub fn exit(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Whether function declarations in the current scope behave like
    /// `var` (function bodies and the top level of scripts).
    pub fn treat_functions_as_var(&self) -> bool {
        self.current().map_or(false, |scope| self.functions_as_var_in(scope))
    }

    fn functions_as_var_in(&self, scope: &Scope) -> bool {
        let flags = scope.flags;
        flags.contains(ScopeFlags::FUNCTION) || (!self.module && flags.contains(ScopeFlags::TOP))
    }

    fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Record a binding. Returns false when it conflicts with an earlier
    /// declaration.
    pub fn declare(&mut self, name: &str, kind: BindingKind) -> bool {
        match kind {
            BindingKind::Lexical => {
                let Some(scope) = self.scopes.last_mut() else {
                    return true;
                };
                let redeclared = scope.lexical.contains(name)
                    || scope.functions.contains(name)
                    || scope.var.contains(name);
                scope.lexical.insert(name.to_string());
                !redeclared
            }
            BindingKind::SimpleCatch => {
                if let Some(scope) = self.scopes.last_mut() {
                    scope.lexical.insert(name.to_string());
                    scope.catch_param = Some(name.to_string());
                }
                true
            }
            BindingKind::Function => {
                let as_var = self.treat_functions_as_var();
                let Some(scope) = self.scopes.last_mut() else {
                    return true;
                };
                let redeclared = if as_var {
                    scope.lexical.contains(name)
                } else {
                    scope.lexical.contains(name) || scope.var.contains(name)
                };
                scope.functions.insert(name.to_string());
                !redeclared
            }
            BindingKind::Var => {
                for index in (0..self.scopes.len()).rev() {
                    let scope = &self.scopes[index];
                    let shadows_catch = scope.flags.contains(ScopeFlags::SIMPLE_CATCH)
                        && scope.catch_param.as_deref() == Some(name);
                    if (scope.lexical.contains(name) && !shadows_catch)
                        || (!self.functions_as_var_in(scope) && scope.functions.contains(name))
                    {
                        return false;
                    }
                    let stops = scope.flags.intersects(ScopeFlags::VAR);
                    self.scopes[index].var.insert(name.to_string());
                    if stops {
                        break;
                    }
                }
                true
            }
        }
    }

    /// Whether `name` is bound at the top level of the program
    pub fn is_declared_at_top(&self, name: &str) -> bool {
        self.scopes.first().map_or(false, |top| {
            top.var.contains(name) || top.lexical.contains(name) || top.functions.contains(name)
        })
    }
}

/// What a private name was declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKind {
    /// Field or method
    Plain,
    /// `get #x`
    Getter {
        /// Declared `static`
        is_static: bool,
    },
    /// `set #x`
    Setter {
        /// Declared `static`
        is_static: bool,
    },
}

#[derive(Debug, Default)]
struct ClassPrivateNames {
    declared: HashMap<String, PrivateKind>,
    unresolved: Vec<(String, usize)>,
}

/// Private names of the classes enclosing the current position
#[derive(Debug, Default)]
pub struct PrivateNames {
    classes: Vec<ClassPrivateNames>,
}

impl PrivateNames {
    /// Create an empty stack
    pub fn new() -> Self {
        PrivateNames::default()
    }

    /// True inside at least one class body
    pub fn in_class(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Open a class body
    pub fn enter_class(&mut self) {
        self.classes.push(ClassPrivateNames::default());
    }

    /// Declare `#name` in the innermost class. Returns false for a
    /// duplicate, except a getter/setter pair with the same placement.
    pub fn declare(&mut self, name: &str, kind: PrivateKind) -> bool {
        let Some(class) = self.classes.last_mut() else {
            return false;
        };
        match class.declared.get(name).copied() {
            None => {
                class.declared.insert(name.to_string(), kind);
                true
            }
            Some(PrivateKind::Getter { is_static: a }) => match kind {
                PrivateKind::Setter { is_static: b } if a == b => {
                    class.declared.insert(name.to_string(), PrivateKind::Plain);
                    true
                }
                _ => false,
            },
            Some(PrivateKind::Setter { is_static: a }) => match kind {
                PrivateKind::Getter { is_static: b } if a == b => {
                    class.declared.insert(name.to_string(), PrivateKind::Plain);
                    true
                }
                _ => false,
            },
            Some(PrivateKind::Plain) => false,
        }
    }

    /// Record a reference to `#name` at `offset`. Returns false when no
    /// class encloses the reference.
    pub fn reference(&mut self, name: &str, offset: usize) -> bool {
        match self.classes.last_mut() {
            Some(class) => {
                class.unresolved.push((name.to_string(), offset));
                true
            }
            None => false,
        }
    }

    /// Close the innermost class body. References it cannot resolve move
    /// to the enclosing class; at the outermost class the first one is
    /// returned as an error.
    pub fn exit_class(&mut self) -> Result<(), (String, usize)> {
        let Some(class) = self.classes.pop() else {
            return Ok(());
        };
        let pending = class
            .unresolved
            .into_iter()
            .filter(|(name, _)| !class.declared.contains_key(name));
        match self.classes.last_mut() {
            Some(outer) => {
                outer.unresolved.extend(pending);
                Ok(())
            }
            None => {
                let mut pending: Vec<_> = pending.collect();
                pending.sort_by_key(|(_, offset)| *offset);
                match pending.into_iter().next() {
                    Some(first) => Err(first),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_redeclaration() {
        let mut scopes = ScopeTracker::new(false);
        assert!(scopes.declare("a", BindingKind::Lexical));
        assert!(!scopes.declare("a", BindingKind::Lexical));
        assert!(!scopes.declare("a", BindingKind::Var));
    }

    #[test]
    fn test_var_duplicates_are_allowed() {
        let mut scopes = ScopeTracker::new(false);
        assert!(scopes.declare("a", BindingKind::Var));
        assert!(scopes.declare("a", BindingKind::Var));
        assert!(scopes.declare("a", BindingKind::Function));
    }

    #[test]
    fn test_var_hoists_through_blocks() {
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::empty());
        assert!(scopes.declare("a", BindingKind::Var));
        scopes.exit();
        assert!(!scopes.declare("a", BindingKind::Lexical));
    }

    #[test]
    fn test_var_conflicts_with_enclosing_block_lexical() {
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::empty());
        assert!(scopes.declare("a", BindingKind::Lexical));
        scopes.enter(ScopeFlags::empty());
        assert!(!scopes.declare("a", BindingKind::Var));
    }

    #[test]
    fn test_var_stops_at_function_scope() {
        let mut scopes = ScopeTracker::new(false);
        assert!(scopes.declare("a", BindingKind::Lexical));
        scopes.enter(ScopeFlags::FUNCTION);
        assert!(scopes.declare("a", BindingKind::Var));
    }

    #[test]
    fn test_simple_catch_parameter_allows_var() {
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::SIMPLE_CATCH);
        assert!(scopes.declare("e", BindingKind::SimpleCatch));
        assert!(scopes.declare("e", BindingKind::Var));
        assert!(!scopes.declare("e", BindingKind::Lexical));
    }

    #[test]
    fn test_sloppy_block_functions_may_repeat() {
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::empty());
        assert!(scopes.declare("f", BindingKind::Function));
        assert!(scopes.declare("f", BindingKind::Function));
        assert!(!scopes.declare("f", BindingKind::Lexical));
    }

    #[test]
    fn test_block_function_conflicts_with_var() {
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::empty());
        assert!(scopes.declare("f", BindingKind::Function));
        assert!(!scopes.declare("f", BindingKind::Var));
    }

    #[test]
    fn test_module_top_level_functions_are_not_var() {
        let module = ScopeTracker::new(true);
        assert!(!module.treat_functions_as_var());
        let script = ScopeTracker::new(false);
        assert!(script.treat_functions_as_var());
    }

    #[test]
    fn test_declared_at_top() {
        let mut scopes = ScopeTracker::new(true);
        scopes.declare("x", BindingKind::Lexical);
        scopes.enter(ScopeFlags::FUNCTION);
        scopes.declare("y", BindingKind::Var);
        assert!(scopes.is_declared_at_top("x"));
        assert!(!scopes.is_declared_at_top("y"));
    }

    #[test]
    fn test_private_getter_setter_pair() {
        let mut names = PrivateNames::new();
        names.enter_class();
        assert!(names.declare("x", PrivateKind::Getter { is_static: false }));
        assert!(names.declare("x", PrivateKind::Setter { is_static: false }));
        assert!(!names.declare("x", PrivateKind::Plain));
        assert!(names.declare("y", PrivateKind::Getter { is_static: true }));
        assert!(!names.declare("y", PrivateKind::Setter { is_static: false }));
    }

    #[test]
    fn test_private_reference_resolved_later() {
        let mut names = PrivateNames::new();
        names.enter_class();
        assert!(names.reference("x", 10));
        names.declare("x", PrivateKind::Plain);
        assert_eq!(names.exit_class(), Ok(()));
    }

    #[test]
    fn test_private_reference_resolves_in_outer_class() {
        let mut names = PrivateNames::new();
        names.enter_class();
        names.declare("outer", PrivateKind::Plain);
        names.enter_class();
        names.reference("outer", 20);
        names.reference("missing", 25);
        assert_eq!(names.exit_class(), Ok(()));
        assert_eq!(names.exit_class(), Err(("missing".to_string(), 25)));
    }

    #[test]
    fn test_private_reference_outside_class() {
        let mut names = PrivateNames::new();
        assert!(!names.in_class());
        assert!(!names.reference("x", 0));
    }
}
