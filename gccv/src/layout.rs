// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement contract.
//!
//! Shaping and glyph rendering belong to an external text engine. The canvas
//! only needs the extents of a run to place a [`Text`](crate::shapes::Text)
//! item, so it asks a [`TextLayout`] supplied at construction time.

use alloc::string::String;

/// Font selection passed through to the text engine.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDesc {
    /// Family name, e.g. `"Sans"`.
    pub family: String,
    /// Size in logical units.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl FontDesc {
    /// A regular font of the given family and size.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }
}

impl Default for FontDesc {
    fn default() -> Self {
        Self::new("Sans", 12.0)
    }
}

/// Extents of a laid-out run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Logical width of the widest line.
    pub width: f64,
    /// Logical height of all lines.
    pub height: f64,
    /// Distance from the top of the run to the first baseline.
    pub baseline: f64,
}

/// Measures text for placement.
pub trait TextLayout {
    /// Measure `text` set in `font`.
    fn measure(&self, text: &str, font: &FontDesc) -> TextMetrics;
}

/// A deterministic layout where every character has the same advance.
///
/// Advance, line height and ascent are expressed as fractions of the font size.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceLayout {
    /// Horizontal advance per character, relative to the font size.
    pub advance: f64,
    /// Line height, relative to the font size.
    pub line_height: f64,
    /// Ascent (top to baseline), relative to the font size.
    pub ascent: f64,
}

impl Default for MonospaceLayout {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
            ascent: 0.9,
        }
    }
}

impl TextLayout for MonospaceLayout {
    fn measure(&self, text: &str, font: &FontDesc) -> TextMetrics {
        let mut lines = 0_usize;
        let mut widest = 0_usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Character counts are far below f64 precision limits."
        )]
        let (widest, lines) = (widest as f64, lines as f64);
        TextMetrics {
            width: widest * self.advance * font.size,
            height: lines * self.line_height * font.size,
            baseline: self.ascent * font.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_measures_widest_line() {
        let layout = MonospaceLayout {
            advance: 0.5,
            line_height: 1.0,
            ascent: 0.8,
        };
        let font = FontDesc::new("Mono", 10.0);
        let m = layout.measure("ab\nabcd", &font);
        assert_eq!(m.width, 20.0);
        assert_eq!(m.height, 20.0);
        assert_eq!(m.baseline, 8.0);
    }

    #[test]
    fn empty_text_has_one_empty_line() {
        let m = MonospaceLayout::default().measure("", &FontDesc::default());
        assert_eq!(m.width, 0.0);
        assert!(m.height > 0.0, "an empty run still occupies a line");
    }
}
