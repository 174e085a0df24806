//! Parser context flags
//!
//! The grammar is parameterized (`[Yield]`, `[Await]`, `[In]`, ...) and
//! many early errors depend on the enclosing function, class or module.
//! All of that state lives in one [`Context`] value. Nested constructs
//! derive a new value from the enclosing one; the parser saves the old
//! value in a local and puts it back when the construct ends.

use bitflags::bitflags;

bitflags! {
    /// Grammar parameters and enclosing-construct facts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Context: u32 {
        /// Strict mode code
        const STRICT = 1 << 0;
        /// Module goal
        const MODULE = 1 << 1;
        /// `in` is a relational operator (cleared in for-statement heads)
        const IN = 1 << 2;
        /// Generator body: `yield` is an expression
        const YIELD = 1 << 3;
        /// Async body or module top level: `await` is an expression
        const AWAIT = 1 << 4;
        /// `return` is allowed
        const RETURN = 1 << 5;
        /// `super.x` / `super[x]` is allowed
        const SUPER_PROPERTY = 1 << 6;
        /// `super(...)` is allowed
        const SUPER_CALL = 1 << 7;
        /// `new.target` is allowed
        const NEW_TARGET = 1 << 8;
        /// Inside a class field initializer: `arguments` is forbidden
        const CLASS_FIELD_INIT = 1 << 9;
        /// Inside a class static block: `await` and `arguments` are forbidden
        const STATIC_BLOCK = 1 << 10;
        /// Parsing formal parameters: `yield`/`await` expressions are forbidden
        const PARAMETERS = 1 << 11;
        /// `await` may not be an identifier even though it is not an expression
        const AWAIT_RESERVED = 1 << 12;
        /// Annex B web-compatibility syntax is accepted
        const WEB_COMPAT = 1 << 13;
        /// Staged proposals (decorators, auto-accessors) are accepted
        const NEXT = 1 << 14;
    }
}

impl Context {
    /// Flags that survive entering any nested function.
    const INHERITED: Context = Context::STRICT
        .union(Context::MODULE)
        .union(Context::WEB_COMPAT)
        .union(Context::NEXT);

    /// Returns `self` with `flag` set or cleared.
    pub fn and(self, flag: Context, set: bool) -> Context {
        if set {
            self | flag
        } else {
            self - flag
        }
    }

    /// Strict mode code
    pub fn is_strict(self) -> bool {
        self.contains(Context::STRICT)
    }

    /// Module goal
    pub fn is_module(self) -> bool {
        self.contains(Context::MODULE)
    }

    /// `in` is an operator here
    pub fn has_in(self) -> bool {
        self.contains(Context::IN)
    }

    /// `yield` is an expression here
    pub fn has_yield(self) -> bool {
        self.contains(Context::YIELD)
    }

    /// `await` is an expression here
    pub fn has_await(self) -> bool {
        self.contains(Context::AWAIT)
    }

    /// Annex B extensions are enabled
    pub fn web_compat(self) -> bool {
        self.contains(Context::WEB_COMPAT)
    }

    /// `await` cannot be used as an identifier
    pub fn reserves_await(self) -> bool {
        self.intersects(
            Context::MODULE | Context::AWAIT | Context::AWAIT_RESERVED | Context::STATIC_BLOCK,
        )
    }

    /// `yield` cannot be used as an identifier
    pub fn reserves_yield(self) -> bool {
        self.intersects(Context::STRICT | Context::YIELD)
    }

    /// Context for the parameters and body of a non-arrow function.
    ///
    /// `yield`/`await` follow the function's own kind; `super` and
    /// `new.target` are recomputed by the caller for methods.
    pub fn function(self, is_async: bool, is_generator: bool) -> Context {
        (self & Context::INHERITED)
            .and(Context::AWAIT, is_async)
            .and(Context::YIELD, is_generator)
            | Context::RETURN
            | Context::NEW_TARGET
            | Context::IN
    }

    /// Context for the parameters and body of an arrow function.
    ///
    /// Arrows keep `super`, `new.target`, field and static-block facts of
    /// the enclosing code; they never introduce `yield`.
    pub fn arrow(self, is_async: bool) -> Context {
        let kept = Context::INHERITED
            | Context::SUPER_PROPERTY
            | Context::SUPER_CALL
            | Context::NEW_TARGET
            | Context::CLASS_FIELD_INIT
            | Context::STATIC_BLOCK
            | Context::AWAIT_RESERVED;
        ((self & kept) | Context::RETURN | Context::IN).and(Context::AWAIT, is_async)
    }

    /// Context for a class field initializer.
    pub fn field_initializer(self) -> Context {
        (self & Context::INHERITED)
            .and(Context::AWAIT_RESERVED, self.reserves_await())
            | Context::STRICT
            | Context::IN
            | Context::SUPER_PROPERTY
            | Context::NEW_TARGET
            | Context::CLASS_FIELD_INIT
    }

    /// Context for a class static block body.
    pub fn static_block(self) -> Context {
        (self & Context::INHERITED)
            | Context::STRICT
            | Context::IN
            | Context::SUPER_PROPERTY
            | Context::NEW_TARGET
            | Context::STATIC_BLOCK
    }
}
