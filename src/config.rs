use confique::Config as DeriveConfig;

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Number of spaces per indentation level when pretty-printing.
    #[config(default = 2, env = "JFV_INDENT_WIDTH")]
    pub indent_width: usize,

    /// Composite values nested this deep (or deeper) start out collapsed in
    /// the tree view.
    #[config(default = 2, env = "JFV_TREE_DEPTH")]
    pub tree_expand_depth: usize,

    /// `check` warns when a document nests deeper than this many levels.
    #[config(default = 128, env = "JFV_MAX_NESTING_DEPTH")]
    pub max_nesting_depth: usize,
}
