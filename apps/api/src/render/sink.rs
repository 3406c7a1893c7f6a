use crate::render::metrics::Font;

/// A single drawing instruction.
///
/// Coordinates are in points with the origin at the top-left corner of the page
/// and `y` growing downwards. Text `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        /// Extra space added to every space character, used for justified lines.
        word_spacing: f32,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
    },
    RoundedRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
    },
    /// Finish the current page and continue on a fresh one.
    NewPage,
}

/// A page-drawing surface that accepts draw commands in order.
pub trait RenderingSink {
    fn draw(&mut self, command: DrawCommand);
}

/// Sink that records commands as-is. Used to inspect layout without producing a PDF.
#[cfg(test)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandLog {
    commands: Vec<DrawCommand>,
}

#[cfg(test)]
impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every `Text` command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| *t == needle)
    }
}

#[cfg(test)]
impl RenderingSink for CommandLog {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
