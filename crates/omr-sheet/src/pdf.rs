use crate::constants::{
    BEZIER_CIRCLE_FACTOR, BUBBLE_FILL_COLOR, BUBBLE_OUTLINE_COLOR, BUBBLE_OUTLINE_WIDTH,
    HELVETICA_BOLD_CHAR_WIDTH_RATIO, HELVETICA_CHAR_WIDTH_RATIO, TEXT_COLOR, TITLE_COLOR,
};
use crate::fonts::BanglaFont;
use crate::layout::{Bubble, CenteredText, QuestionCell, SheetPlan};
use crate::options::SheetLayout;
use crate::script::contains_bengali;
use crate::types::{Result, SheetRequest};
use printpdf::*;
use std::path::Path;
use tracing::{debug, warn};

/// Render a sheet and write it to `output_path`
pub async fn generate_pdf(
    request: &SheetRequest,
    layout: &SheetLayout,
    bangla: Option<BanglaFont>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let request = request.clone();
    let layout = layout.clone();
    let output_path = output_path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || {
        generate_sheet_bytes(&request, &layout, bangla.as_ref())
    })
    .await??;

    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}

/// Render a sheet to PDF bytes
pub fn generate_sheet_bytes(
    request: &SheetRequest,
    layout: &SheetLayout,
    bangla: Option<&BanglaFont>,
) -> Result<Vec<u8>> {
    let wants_bengali = request.use_bangla || contains_bengali(&request.institute_name);
    let parsed = match bangla {
        Some(font) if wants_bengali => {
            let parsed = font.parse();
            if parsed.is_none() {
                warn!(
                    source = %font.source().display(),
                    "Bengali font failed to parse, using Helvetica"
                );
            }
            parsed
        }
        _ => None,
    };

    if request.use_bangla && parsed.is_none() {
        debug!("Bangla requested without a Bengali font, numerals stay Arabic");
    }

    let plan = SheetPlan::build(request, layout, parsed.is_some())?;

    let mut doc = PdfDocument::new("OMR Answer Sheet");
    let embedded = parsed.map(|font| {
        let id = doc.add_font(&font);
        (id, font)
    });

    let bengali = embedded
        .as_ref()
        .map(|(id, font)| TextFont::Embedded { id, font });
    let title_font = match bengali {
        Some(font) if contains_bengali(&plan.title.text) => font,
        _ => TextFont::Builtin(BuiltinFont::HelveticaBold),
    };
    // Labels and letters share one font: the Bengali one whenever Bangla
    // mode is on and it loaded.
    let body_font = match bengali {
        Some(font) if request.use_bangla => font,
        _ => TextFont::Builtin(BuiltinFont::Helvetica),
    };

    let page_width = Mm::from(Pt(plan.page_width_pt));
    let page_height = Mm::from(Pt(plan.page_height_pt));

    for page in 0..plan.page_count() {
        let mut ops = Vec::new();

        push_title(&mut ops, &plan.title, title_font);
        for question in plan.questions_on_page(page) {
            push_question(&mut ops, question, plan.label_font_size_pt, body_font);
        }

        doc.pages.push(PdfPage::new(page_width, page_height, ops));
    }

    debug!(
        questions = plan.label_count(),
        bubbles = plan.bubble_count(),
        pages = plan.page_count(),
        "Rendered answer sheet"
    );

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

#[derive(Clone, Copy)]
enum TextFont<'a> {
    Builtin(BuiltinFont),
    Embedded { id: &'a FontId, font: &'a ParsedFont },
}

impl TextFont<'_> {
    fn text_width(&self, text: &str, size_pt: f32) -> f32 {
        match self {
            TextFont::Builtin(builtin) => {
                let ratio = match builtin {
                    BuiltinFont::HelveticaBold => HELVETICA_BOLD_CHAR_WIDTH_RATIO,
                    _ => HELVETICA_CHAR_WIDTH_RATIO,
                };
                text.chars().count() as f32 * size_pt * ratio
            }
            TextFont::Embedded { font, .. } => {
                // Advances are in unscaled font units
                let units_per_em = font.font_metrics.units_per_em.max(1) as f32;
                let units: f32 = text
                    .chars()
                    .filter_map(|ch| font.lookup_glyph_index(ch as u32))
                    .map(|glyph_id| font.get_horizontal_advance(glyph_id) as f32)
                    .sum();
                units / units_per_em * size_pt
            }
        }
    }
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn push_text(ops: &mut Vec<Op>, text: &str, x: f32, y: f32, size_pt: f32, font: TextFont) {
    ops.push(Op::StartTextSection);
    match font {
        TextFont::Builtin(builtin) => {
            ops.push(Op::SetTextCursor {
                pos: Point { x: Pt(x), y: Pt(y) },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                font: builtin,
                size: Pt(size_pt),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.to_string())],
                font: builtin,
            });
        }
        TextFont::Embedded { id, .. } => {
            ops.push(Op::SetFontSize {
                font: id.clone(),
                size: Pt(size_pt),
            });
            ops.push(Op::SetTextMatrix {
                matrix: TextMatrix::Translate(Pt(x), Pt(y)),
            });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font: id.clone(),
            });
        }
    }
    ops.push(Op::EndTextSection);
}

fn push_centered_text(
    ops: &mut Vec<Op>,
    text: &str,
    center_x: f32,
    y: f32,
    size_pt: f32,
    font: TextFont,
) {
    let x = center_x - font.text_width(text, size_pt) / 2.0;
    push_text(ops, text, x, y, size_pt, font);
}

fn push_title(ops: &mut Vec<Op>, title: &CenteredText, font: TextFont) {
    ops.push(Op::SetFillColor {
        col: rgb(TITLE_COLOR),
    });
    push_centered_text(
        ops,
        &title.text,
        title.center_x,
        title.baseline_y,
        title.font_size_pt,
        font,
    );
}

fn push_question(ops: &mut Vec<Op>, question: &QuestionCell, size_pt: f32, font: TextFont) {
    ops.push(Op::SetFillColor {
        col: rgb(TEXT_COLOR),
    });
    push_text(
        ops,
        &question.label,
        question.label_x,
        question.label_y,
        size_pt,
        font,
    );

    for bubble in &question.bubbles {
        push_bubble(ops, bubble, size_pt, font);
    }
}

fn push_bubble(ops: &mut Vec<Op>, bubble: &Bubble, size_pt: f32, font: TextFont) {
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor {
        col: rgb(BUBBLE_OUTLINE_COLOR),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(BUBBLE_OUTLINE_WIDTH),
    });
    ops.push(Op::SetFillColor {
        col: rgb(BUBBLE_FILL_COLOR),
    });
    ops.push(Op::DrawPolygon {
        polygon: circle(bubble.center_x, bubble.center_y, bubble.radius),
    });
    ops.push(Op::RestoreGraphicsState);

    ops.push(Op::SetFillColor {
        col: rgb(TEXT_COLOR),
    });
    push_centered_text(
        ops,
        bubble.letter,
        bubble.center_x,
        bubble.letter_baseline_y,
        size_pt,
        font,
    );
}

/// Circle as four cubic Bezier quarters, starting at the rightmost point and
/// running counter-clockwise. Control points carry `bezier: true`.
fn circle(cx: f32, cy: f32, r: f32) -> Polygon {
    let k = r * BEZIER_CIRCLE_FACTOR;
    let point = |x: f32, y: f32, bezier: bool| LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier,
    };

    let points = vec![
        point(cx + r, cy, false),
        // Top-right quarter
        point(cx + r, cy + k, true),
        point(cx + k, cy + r, true),
        point(cx, cy + r, false),
        // Top-left quarter
        point(cx - k, cy + r, true),
        point(cx - r, cy + k, true),
        point(cx - r, cy, false),
        // Bottom-left quarter
        point(cx - r, cy - k, true),
        point(cx - k, cy - r, true),
        point(cx, cy - r, false),
        // Bottom-right quarter
        point(cx + k, cy - r, true),
        point(cx + r, cy - k, true),
        point(cx + r, cy, false),
    ];

    Polygon {
        rings: vec![PolygonRing { points }],
        mode: PaintMode::FillStroke,
        winding_order: WindingOrder::NonZero,
    }
}
