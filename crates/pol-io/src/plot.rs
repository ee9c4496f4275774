//! Figure styling and the watermark overlay used on published plots.

use std::env;
use std::ffi::OsStr;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Font settings for figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureStyle {
    /// Generic font family.
    pub font_family: String,
    /// Preferred serif fonts.
    pub serif: Vec<String>,
    /// Font set for math text.
    pub math_fontset: String,
    /// Whether text is typeset with an external LaTeX installation.
    pub usetex: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            font_family: "serif".into(),
            serif: vec!["Helvetica".into()],
            math_fontset: "dejavusans".into(),
            usetex: false,
        }
    }
}

/// LaTeX-like font style; `usetex` is enabled only if `latex` is on `PATH`.
pub fn latex_font_style() -> FigureStyle {
    let usetex = env::var_os("PATH")
        .map(|path| executable_on_path("latex", &path))
        .unwrap_or(false);
    FigureStyle {
        usetex,
        ..FigureStyle::default()
    }
}

/// Whether `name` is a file in one of the directories of the `PATH`-style list `path`.
pub fn executable_on_path(name: &str, path: &OsStr) -> bool {
    env::split_paths(path).any(|dir| is_file(&dir.join(name)) || is_file(&dir.join(format!("{name}.exe"))))
}

fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 160,
        }
    }
}

/// Text placed in axes coordinates (`0..1`, origin bottom left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    /// Lines of text; `\n` separates them.
    pub text: String,
    /// Horizontal anchor in axes coordinates.
    pub x: f64,
    /// Vertical anchor in axes coordinates.
    pub y: f64,
    /// Font size in points; the renderer default when unset.
    #[serde(default)]
    pub fontsize: Option<f64>,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            text: "LHCb\n$1.7\\mathrm{~fb}^{-1}$".into(),
            x: 0.03,
            y: 0.03,
            fontsize: None,
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

/// SVG overlay with the watermark text, one `tspan` per line, anchored at its
/// bottom-left corner.
pub fn render_watermark_svg(watermark: &Watermark, config: &FigureConfig) -> String {
    let x = watermark.x * config.width as f64;
    let y = (1.0 - watermark.y) * config.height as f64;
    let lines: Vec<&str> = watermark.text.lines().collect();
    let line_height = watermark.fontsize.unwrap_or(10.0) * 1.2;
    let first_y = y - line_height * lines.len().saturating_sub(1) as f64;
    let size = watermark
        .fontsize
        .map(|size| format!(" font-size='{size:.1}'"))
        .unwrap_or_default();
    let mut parts = vec![
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}'>",
            w = config.width,
            h = config.height
        ),
        format!("<text x='{x:.2}' y='{first_y:.2}' font-family='serif'{size}>"),
    ];
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        parts.push(format!(
            "<tspan x='{x:.2}' dy='{dy:.2}'>{}</tspan>",
            escape_xml(line)
        ));
    }
    parts.push("</text>".into());
    parts.push("</svg>".into());
    parts.join("")
}
