//! Page flow: a top-to-bottom text cursor over a fixed page size.
//!
//! Renderers describe documents as a sequence of "write this text, move down, draw a
//! rule" steps. `PageFlow` turns those steps into positioned `DrawCommand`s: it wraps
//! text to the content width, resolves alignment, and starts a new page whenever the
//! next line would cross the bottom margin.

use crate::render::metrics::{get_metrics, wrap_text, Font, LINE_HEIGHT_EM};
use crate::render::sink::{DrawCommand, RenderingSink};

/// Page size and the fixed insets the renderers lay out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Margin for flowing text, all four sides.
    pub margin: f32,
    /// Left/right inset for section rules and skill pills.
    pub inset: f32,
}

impl PageGeometry {
    /// US Letter, 1" text margins, 40pt rule inset.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin: 72.0,
        inset: 40.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Right edge for inset drawing (rules, pills).
    pub fn inset_right(&self) -> f32 {
        self.width - self.inset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch every line but the last of a paragraph to the full width.
    Justify,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub align: Align,
    /// Left indent for every line of the block.
    pub indent: f32,
    /// Extra space after each paragraph.
    pub paragraph_gap: f32,
}

impl TextOptions {
    pub fn aligned(align: Align) -> Self {
        TextOptions {
            align,
            ..Default::default()
        }
    }

    pub fn indented(indent: f32) -> Self {
        TextOptions {
            indent,
            ..Default::default()
        }
    }
}

const RULE_WIDTH: f32 = 3.0;

pub struct PageFlow<'a> {
    sink: &'a mut dyn RenderingSink,
    page: PageGeometry,
    y: f32,
    font: Font,
    size: f32,
}

impl<'a> PageFlow<'a> {
    pub fn new(sink: &'a mut dyn RenderingSink, page: PageGeometry) -> Self {
        PageFlow {
            sink,
            page,
            y: page.margin,
            font: Font::Helvetica,
            size: 12.0,
        }
    }

    pub fn page(&self) -> PageGeometry {
        self.page
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn font(&mut self, font: Font, size: f32) -> &mut Self {
        self.font = font;
        self.size = size;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_EM
    }

    /// Moves the cursor down by `lines` lines of the current font.
    pub fn move_down(&mut self, lines: f32) -> &mut Self {
        self.y += lines * self.line_height();
        self
    }

    /// Starts a new page unless `height` more points fit above the bottom margin.
    /// Never breaks at the top of a page, so oversized blocks cannot loop.
    pub fn ensure_room(&mut self, height: f32) {
        if self.y + height > self.page.content_bottom() && self.y > self.page.margin {
            self.sink.draw(DrawCommand::NewPage);
            self.y = self.page.margin;
        }
    }

    /// Passes a pre-positioned command straight to the sink.
    pub fn draw(&mut self, command: DrawCommand) {
        self.sink.draw(command);
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.text_with(text, TextOptions::default())
    }

    /// Writes a block of text at the cursor in the current font.
    ///
    /// Explicit newlines start new paragraphs. An empty paragraph still advances
    /// one line so stacked blocks keep their spacing.
    pub fn text_with(&mut self, text: &str, opts: TextOptions) -> &mut Self {
        let metrics = get_metrics(self.font);
        let left = self.page.margin + opts.indent;
        let width = self.page.content_width() - opts.indent;
        let line_height = self.line_height();

        for paragraph in text.split('\n') {
            let lines = wrap_text(paragraph, metrics, self.size, width);
            if lines.is_empty() {
                self.ensure_room(line_height);
                self.y += line_height;
            }
            let last = lines.len().saturating_sub(1);
            for (i, line) in lines.iter().enumerate() {
                self.ensure_room(line_height);
                let line_width = metrics.width_of(line, self.size);
                let (x, word_spacing) = match opts.align {
                    Align::Left => (left, 0.0),
                    Align::Center => (left + (width - line_width) / 2.0, 0.0),
                    Align::Right => (left + width - line_width, 0.0),
                    Align::Justify => {
                        let spaces = line.matches(' ').count();
                        if i < last && spaces > 0 {
                            (left, (width - line_width) / spaces as f32)
                        } else {
                            (left, 0.0)
                        }
                    }
                };
                self.sink.draw(DrawCommand::Text {
                    x,
                    y: self.y,
                    font: self.font,
                    size: self.size,
                    word_spacing,
                    text: line.clone(),
                });
                self.y += line_height;
            }
            self.y += opts.paragraph_gap;
        }
        self
    }

    /// Thick horizontal rule across the inset width, followed by half a line of space.
    pub fn rule(&mut self) -> &mut Self {
        self.ensure_room(RULE_WIDTH);
        let y = self.y;
        self.sink.draw(DrawCommand::Line {
            from: (self.page.inset, y),
            to: (self.page.inset_right(), y),
            width: RULE_WIDTH,
        });
        self.move_down(0.5)
    }
}
