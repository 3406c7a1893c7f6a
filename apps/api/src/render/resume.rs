//! Résumé renderer.
//!
//! Sections are drawn in a fixed order and each one is skipped entirely (no heading,
//! no rule) when its data is empty:
//! header → contact line → summary → work experience → education →
//! projects | awards → certifications → skills.
//!
//! Projects and awards are mutually exclusive. Projects are drawn only when the
//! template supports them; every other template falls through to awards.

use crate::models::non_blank;
use crate::models::resume::{
    Award, Certification, Education, ProfessionalInfo, Project, ResumeContent, WorkExperience,
};
use crate::render::dates::{format_date, format_date_range};
use crate::render::flow::{Align, PageFlow, PageGeometry, TextOptions};
use crate::render::metrics::{get_metrics, Font, PHONE_GLYPH};
use crate::render::sink::{DrawCommand, RenderingSink};
use crate::render::RenderError;
use crate::templates;

const NAME_SIZE: f32 = 24.0;
const ROLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 16.0;
const ENTRY_TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
const BULLET_INDENT: f32 = 20.0;
/// Room a heading needs so it is never stranded at the foot of a page.
const HEADING_KEEP: f32 = 60.0;

const CONTACT_SEPARATOR: &str = " | ";

// Skill pill geometry, in points.
const PILL_PADDING: f32 = 4.0;
const PILL_HEIGHT: f32 = 20.0;
const PILL_RADIUS: f32 = 4.0;
const PILL_GAP: f32 = 4.0;
const PILL_ROW_ADVANCE: f32 = 24.0;
const PILL_FONT_SIZE: f32 = 12.0;

/// Draws `content` under the template named `template_key`.
///
/// Fails only on a date that cannot be formatted. Draw commands already emitted
/// before the failure should be discarded by the caller.
pub fn render_resume(
    content: &ResumeContent,
    template_key: &str,
    sink: &mut dyn RenderingSink,
) -> Result<(), RenderError> {
    let mut flow = PageFlow::new(sink, PageGeometry::LETTER);

    draw_header(&mut flow, &content.professional_info);

    if let Some(summary) = non_blank(&content.summary) {
        section_heading(&mut flow, "PROFESSIONAL SUMMARY");
        flow.font(Font::Helvetica, BODY_SIZE).text(summary).move_down(1.0);
    }

    if !content.work_experience.is_empty() {
        section_heading(&mut flow, "WORK EXPERIENCE");
        for exp in &content.work_experience {
            draw_work_experience(&mut flow, exp)?;
        }
    }

    if !content.education.is_empty() {
        section_heading(&mut flow, "EDUCATION");
        for edu in &content.education {
            draw_education(&mut flow, edu)?;
        }
    }

    if templates::supports_projects(template_key) && !content.projects.is_empty() {
        section_heading(&mut flow, "PROJECTS");
        for project in &content.projects {
            draw_project(&mut flow, project);
        }
    } else if !content.awards.is_empty() {
        section_heading(&mut flow, "AWARDS & RECOGNITIONS");
        for award in &content.awards {
            draw_award(&mut flow, award);
        }
    }

    if !content.certifications.is_empty() {
        section_heading(&mut flow, "CERTIFICATIONS");
        for cert in &content.certifications {
            draw_certification(&mut flow, cert)?;
        }
    }

    let skills: Vec<&str> = content
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        section_heading(&mut flow, "SKILLS");
        draw_skills(&mut flow, &skills);
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn draw_header(flow: &mut PageFlow<'_>, info: &ProfessionalInfo) {
    let centered = TextOptions::aligned(Align::Center);

    flow.font(Font::HelveticaBold, NAME_SIZE)
        .text_with(info.name.trim(), centered);
    if let Some(role) = non_blank(&info.role) {
        flow.move_down(0.2);
        flow.font(Font::Helvetica, ROLE_SIZE).text_with(role, centered);
    }
    flow.move_down(0.5);

    flow.font(Font::Helvetica, BODY_SIZE)
        .text_with(&contact_line(info), centered)
        .move_down(1.0);
}

/// Present contact fields joined with ` | `; the phone number carries a telephone glyph.
pub fn contact_line(info: &ProfessionalInfo) -> String {
    let phone = non_blank(&info.phone).map(|p| format!("{PHONE_GLYPH} {p}"));
    [
        non_blank(&info.email).map(String::from),
        phone,
        non_blank(&info.location).map(String::from),
        non_blank(&info.linkedin).map(String::from),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(CONTACT_SEPARATOR)
}

fn section_heading(flow: &mut PageFlow<'_>, title: &str) {
    flow.ensure_room(HEADING_KEEP);
    flow.font(Font::HelveticaBold, HEADING_SIZE).text(title).rule();
}

fn entry_title(flow: &mut PageFlow<'_>, title: Option<&str>) {
    if let Some(title) = title {
        flow.font(Font::HelveticaBold, ENTRY_TITLE_SIZE).text(title);
    }
    flow.font(Font::Helvetica, BODY_SIZE);
}

fn bullets(flow: &mut PageFlow<'_>, items: &[String]) {
    for item in items.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        flow.text_with(
            &format!("\u{2022} {item}"),
            TextOptions::indented(BULLET_INDENT),
        );
    }
}

fn draw_work_experience(flow: &mut PageFlow<'_>, exp: &WorkExperience) -> Result<(), RenderError> {
    entry_title(flow, non_blank(&exp.position));

    let company = non_blank(&exp.company).unwrap_or_default();
    let employer = match non_blank(&exp.location) {
        Some(location) => format!("{company}, {location}"),
        None => company.to_string(),
    };
    if !employer.is_empty() {
        flow.text(&employer);
    }

    if let Some(range) = format_date_range(non_blank(&exp.start_date), non_blank(&exp.end_date))? {
        flow.text(&range);
    }
    flow.move_down(0.5);
    bullets(flow, &exp.achievements);
    flow.move_down(1.0);
    Ok(())
}

fn draw_education(flow: &mut PageFlow<'_>, edu: &Education) -> Result<(), RenderError> {
    entry_title(flow, non_blank(&edu.school));
    if let Some(degree) = non_blank(&edu.degree) {
        flow.text(degree);
    }
    if let Some(range) = format_date_range(non_blank(&edu.start_date), non_blank(&edu.end_date))? {
        flow.text(&range);
    }
    flow.move_down(1.0);
    Ok(())
}

fn draw_project(flow: &mut PageFlow<'_>, project: &Project) {
    entry_title(flow, non_blank(&project.name));
    if let Some(role) = non_blank(&project.role) {
        flow.text(&format!("Role: {role}"));
    }
    let technologies = project
        .technologies
        .as_ref()
        .map(|t| t.display())
        .unwrap_or_default();
    if !technologies.is_empty() {
        flow.text(&format!("Technologies: {technologies}"));
    }
    bullets(flow, &project.achievements);
    flow.move_down(1.0);
}

fn draw_award(flow: &mut PageFlow<'_>, award: &Award) {
    entry_title(flow, non_blank(&award.title));
    if let Some(date) = non_blank(&award.date) {
        flow.text(&format!("Date: {date}"));
    }
    if let Some(description) = non_blank(&award.description) {
        flow.text(description);
    }
    flow.move_down(1.0);
}

fn draw_certification(flow: &mut PageFlow<'_>, cert: &Certification) -> Result<(), RenderError> {
    entry_title(flow, non_blank(&cert.name));
    if let Some(issuer) = non_blank(&cert.issuer) {
        flow.text(&format!("Issuer: {issuer}"));
    }

    let mut validity = Vec::with_capacity(2);
    if let Some(issued) = non_blank(&cert.issue_date) {
        validity.push(format!("Issued: {}", format_date(issued)?));
    }
    if let Some(expires) = non_blank(&cert.expiry_date) {
        validity.push(format!("Expires: {}", format_date(expires)?));
    }
    if !validity.is_empty() {
        flow.text(&validity.join(" | "));
    }

    if let Some(id) = non_blank(&cert.credential_id) {
        flow.text(&format!("Credential ID: {id}"));
    }
    flow.move_down(1.0);
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Skill pills
// ────────────────────────────────────────────────────────────────────────────

/// Position of one pill: its row and its left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillSlot {
    pub row: usize,
    pub x: f32,
}

/// Flows pills of the given widths left to right from `left`, wrapping to a new row
/// when a pill would extend past `right`. The first pill of a row never wraps.
pub fn flow_pills(widths: &[f32], left: f32, right: f32, gap: f32) -> Vec<PillSlot> {
    let mut slots = Vec::with_capacity(widths.len());
    let mut row = 0;
    let mut x = left;
    for &width in widths {
        if x > left && x + width > right {
            row += 1;
            x = left;
        }
        slots.push(PillSlot { row, x });
        x += width + gap;
    }
    slots
}

fn draw_skills(flow: &mut PageFlow<'_>, skills: &[&str]) {
    let page = flow.page();
    let metrics = get_metrics(Font::Helvetica);
    let widths: Vec<f32> = skills
        .iter()
        .map(|s| metrics.width_of(s, PILL_FONT_SIZE) + 2.0 * PILL_PADDING)
        .collect();
    let slots = flow_pills(&widths, page.inset, page.inset_right(), PILL_GAP);

    flow.ensure_room(PILL_HEIGHT);
    let mut row_y = flow.y();
    let mut current_row = 0;
    for ((skill, width), slot) in skills.iter().zip(&widths).zip(&slots) {
        if slot.row != current_row {
            current_row = slot.row;
            flow.set_y(row_y + PILL_ROW_ADVANCE);
            flow.ensure_room(PILL_HEIGHT);
            row_y = flow.y();
        }
        flow.draw(DrawCommand::RoundedRect {
            x: slot.x,
            y: row_y,
            width: *width,
            height: PILL_HEIGHT,
            radius: PILL_RADIUS,
        });
        flow.draw(DrawCommand::Text {
            x: slot.x + PILL_PADDING,
            y: row_y + PILL_PADDING,
            font: Font::Helvetica,
            size: PILL_FONT_SIZE,
            word_spacing: 0.0,
            text: skill.to_string(),
        });
    }
    flow.set_y(row_y + PILL_ROW_ADVANCE);
    flow.font(Font::Helvetica, BODY_SIZE).move_down(1.0);
}
