//! Parser options

use serde::Deserialize;

/// Options forwarded to the engine.
///
/// Deserializes from the camelCase object form
/// `{ "tabStop": 4, "stopOnFirstError": true }`; missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Column width of a tab stop used when computing columns
    pub tab_stop: usize,

    /// Stop feeding input to the engine once it reports a parse error
    pub stop_on_first_error: bool,

    /// Attach the engine's parse errors to the output
    pub collect_errors: bool,
}

impl ParseOptions {
    pub const DEFAULT_TAB_STOP: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab_stop(mut self, tab_stop: usize) -> Self {
        self.tab_stop = tab_stop;
        self
    }

    pub fn with_stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    pub fn with_collect_errors(mut self, collect: bool) -> Self {
        self.collect_errors = collect;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_stop: Self::DEFAULT_TAB_STOP,
            stop_on_first_error: false,
            collect_errors: false,
        }
    }
}
