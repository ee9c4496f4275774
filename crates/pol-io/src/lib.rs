//! Presentation and persistence helpers: LaTeX and Markdown rendering,
//! readable hashes, the cached `doit` and figure styling.

pub mod cache;
pub mod display;
pub mod hash;
pub mod latex;
pub mod plot;
pub mod table;

pub use cache::{
    perform_cached_doit, perform_cached_with, CacheEntry, DirectoryStore, KeyValueStore,
    MemoryStore,
};
pub use display::{display_doit, display_latex, DisplaySurface, MathWriter};
pub use hash::{get_readable_hash, HashBytes, Serialized};
pub use latex::{as_latex, Complex, LatexOptions, LatexRegistry, ToLatex};
pub use plot::{latex_font_style, render_watermark_svg, FigureConfig, FigureStyle, Watermark};
pub use table::{as_markdown_table, as_markdown_table_with, DecayItem};
