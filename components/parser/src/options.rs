//! Parse options

use serde::Deserialize;

/// Options controlling how source is parsed and how the tree is reported.
///
/// Deserializes from the camelCase keys used by fixture option blocks,
/// e.g. `{"module": true, "disableWebCompat": true}`. Missing keys take
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Parse as a module: strict, `import`/`export` allowed, top-level `await`
    pub module: bool,
    /// Attach line/column locations to every node
    pub loc: bool,
    /// Emit `start`/`end` offsets in ESTree output
    pub ranges: bool,
    /// Emit `raw` source text for literals in ESTree output
    pub raw: bool,
    /// Reject the web-compatibility grammar (HTML comments, legacy octal
    /// escapes in sloppy mode, sloppy block functions in `if`, ...)
    pub disable_web_compat: bool,
    /// Enable staged syntax: decorators and `accessor` class members
    pub next: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            module: false,
            loc: false,
            ranges: true,
            raw: true,
            disable_web_compat: false,
            next: false,
        }
    }
}

impl ParseOptions {
    /// Options for module code
    pub fn module() -> Self {
        ParseOptions::default().with_module(true)
    }

    /// Set module goal
    pub fn with_module(mut self, module: bool) -> Self {
        self.module = module;
        self
    }

    /// Set location tracking
    pub fn with_loc(mut self, loc: bool) -> Self {
        self.loc = loc;
        self
    }

    /// Set range output
    pub fn with_ranges(mut self, ranges: bool) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set raw literal output
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Set whether web-compatibility grammar is rejected
    pub fn with_disable_web_compat(mut self, disable: bool) -> Self {
        self.disable_web_compat = disable;
        self
    }

    /// Set staged syntax support
    pub fn with_next(mut self, next: bool) -> Self {
        self.next = next;
        self
    }
}
