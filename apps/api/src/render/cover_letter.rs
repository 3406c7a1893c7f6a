use crate::models::cover_letter::CoverLetterContent;
use crate::models::non_blank;
use crate::render::flow::{Align, PageFlow, PageGeometry, TextOptions};
use crate::render::metrics::Font;
use crate::render::sink::RenderingSink;
use crate::render::RenderError;

const LETTER_SIZE: f32 = 12.0;
const BODY_PARAGRAPH_GAP: f32 = 5.0;
const DEFAULT_SALUTATION_NAME: &str = "Hiring Manager";

/// Draws a single cover letter: sender block, date and recipient, salutation,
/// justified body, and the sign-off.
pub fn render_cover_letter(
    content: &CoverLetterContent,
    sink: &mut dyn RenderingSink,
) -> Result<(), RenderError> {
    let mut flow = PageFlow::new(sink, PageGeometry::LETTER);
    flow.font(Font::Helvetica, LETTER_SIZE);

    let sender = &content.user_info;
    let sender_block = stacked(&[
        Some(sender.name.trim()),
        non_blank(&sender.address),
        non_blank(&sender.email),
        non_blank(&sender.phone),
    ]);
    flow.text_with(&sender_block, TextOptions::aligned(Align::Right))
        .move_down(2.0);

    for line in [
        non_blank(&content.date),
        non_blank(&content.hiring_manager),
        non_blank(&content.company),
        non_blank(&content.company_address),
    ]
    .into_iter()
    .flatten()
    {
        flow.text(line);
    }
    flow.move_down(1.0);

    flow.text(&salutation(content)).move_down(1.0);

    flow.text_with(
        content.body.trim(),
        TextOptions {
            align: Align::Justify,
            paragraph_gap: BODY_PARAGRAPH_GAP,
            ..Default::default()
        },
    );

    flow.move_down(2.0)
        .text("Sincerely,")
        .move_down(1.0)
        .text(sender.name.trim());

    Ok(())
}

pub fn salutation(content: &CoverLetterContent) -> String {
    let name = non_blank(&content.hiring_manager_name).unwrap_or(DEFAULT_SALUTATION_NAME);
    format!("Dear {name},")
}

fn stacked(lines: &[Option<&str>]) -> String {
    lines
        .iter()
        .flatten()
        .filter(|l| !l.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}
