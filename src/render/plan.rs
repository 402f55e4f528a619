use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Canvas, Circle, Point, Rgba8},
    layout::wrap::{FontSpec, TextBlock},
    model::{ProfileData, RenderParams, TextAlign},
    template::registry::{Background, TemplateId},
};

pub const AVATAR_DIAMETER_PX: f64 = 80.0;
pub const AVATAR_BORDER_PX: f64 = 3.0;
/// Gap between the bottom of the quote block and the avatar center.
pub const PROFILE_GAP_PX: f64 = 80.0;
pub const NAME_OFFSET_PX: f64 = 60.0;
pub const TITLE_OFFSET_PX: f64 = 90.0;
/// Baseline nudge that visually centers initials in the fallback circle.
pub const INITIALS_NUDGE_PX: f64 = 8.0;
pub const INITIALS_SIZE_PX: f32 = 24.0;
pub const NAME_SIZE_PX: f32 = 28.0;
pub const TITLE_SIZE_PX: f32 = 20.0;

/// Ordered draw ops for one card, in logical units.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Cover the whole canvas.
    FillBackground(Background),
    /// One line of text; `anchor` is on the baseline and `align` says how the line sits on it.
    Text {
        text: String,
        font: FontSpec,
        anchor: Point,
        align: TextAlign,
        color: Rgba8,
    },
    /// Bitmap scaled into the circle's bounding box and clipped to the circle.
    CircleImage { image: PreparedImage, circle: Circle },
    FillCircle { circle: Circle, color: Rgba8 },
    StrokeCircle {
        circle: Circle,
        color: Rgba8,
        width: f64,
    },
}

/// What the profile section shows in the avatar slot.
#[derive(Clone, Debug, PartialEq)]
pub enum AvatarSlot {
    /// The profile has no image.
    Empty,
    Image(PreparedImage),
    /// The image failed to load; draw initials instead.
    Initials,
}

/// Avatar center Y for a laid-out quote.
pub fn profile_anchor_y(block: &TextBlock) -> f64 {
    block.start_y + block.height() + PROFILE_GAP_PX
}

/// Build the draw ops for one card.
///
/// Without a text block (empty quote) only the background is emitted: the profile section is
/// positioned relative to the quote and has no place of its own.
pub fn compose(
    canvas: Canvas,
    template: TemplateId,
    profile: &ProfileData,
    params: &RenderParams,
    block: Option<&TextBlock>,
    avatar: AvatarSlot,
) -> RenderPlan {
    let style = template.style();
    let mut ops = vec![DrawOp::FillBackground(style.background.clone())];

    let Some(block) = block else {
        return RenderPlan { canvas, ops };
    };

    for (i, line) in block.lines.iter().enumerate() {
        ops.push(DrawOp::Text {
            text: line.clone(),
            font: block.font.clone(),
            anchor: Point::new(block.anchor_x, block.line_y(i)),
            align: block.align,
            color: style.text_color,
        });
    }

    let center_x = canvas.center_x();
    let profile_y = profile_anchor_y(block);
    let circle = Circle::new((center_x, profile_y), AVATAR_DIAMETER_PX / 2.0);
    let family = params.font_family.font_stack();

    match avatar {
        AvatarSlot::Empty => {}
        AvatarSlot::Image(image) => {
            ops.push(DrawOp::CircleImage { image, circle });
            ops.push(DrawOp::StrokeCircle {
                circle,
                color: style.accent_color,
                width: AVATAR_BORDER_PX,
            });
        }
        AvatarSlot::Initials => {
            ops.push(DrawOp::FillCircle {
                circle,
                color: style.accent_color,
            });
            ops.push(DrawOp::Text {
                text: profile.initials(),
                font: FontSpec::bold(family.clone(), INITIALS_SIZE_PX),
                anchor: Point::new(center_x, profile_y + INITIALS_NUDGE_PX),
                align: TextAlign::Center,
                color: template.initials_color(),
            });
        }
    }

    ops.push(DrawOp::Text {
        text: profile.name.clone(),
        font: FontSpec::bold(family.clone(), NAME_SIZE_PX),
        anchor: Point::new(center_x, profile_y + NAME_OFFSET_PX),
        align: TextAlign::Center,
        color: style.text_color,
    });

    if let Some(title) = profile.visible_title() {
        ops.push(DrawOp::Text {
            text: title.to_string(),
            font: FontSpec::regular(family, TITLE_SIZE_PX),
            anchor: Point::new(center_x, profile_y + TITLE_OFFSET_PX),
            align: TextAlign::Center,
            color: style.accent_color,
        });
    }

    RenderPlan { canvas, ops }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
