use crate::foundation::core::Rgba8;

/// Built-in card templates. Names are matched case-sensitively, anything else is `Modern`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Minimal,
    Dark,
    Corporate,
    Creative,
    Elegant,
}

impl TemplateId {
    /// All templates in picker order.
    pub const ALL: [TemplateId; 6] = [
        TemplateId::Modern,
        TemplateId::Minimal,
        TemplateId::Dark,
        TemplateId::Corporate,
        TemplateId::Creative,
        TemplateId::Elegant,
    ];

    /// Total lookup: unknown or empty names resolve to [`TemplateId::Modern`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "modern" => Self::Modern,
            "minimal" => Self::Minimal,
            "dark" => Self::Dark,
            "corporate" => Self::Corporate,
            "creative" => Self::Creative,
            "elegant" => Self::Elegant,
            _ => Self::Modern,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Minimal => "minimal",
            Self::Dark => "dark",
            Self::Corporate => "corporate",
            Self::Creative => "creative",
            Self::Elegant => "elegant",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Modern => "LinkedIn Premium",
            Self::Minimal => "Clean White",
            Self::Dark => "Professional Dark",
            Self::Corporate => "Corporate Blue",
            Self::Creative => "Creative Gold",
            Self::Elegant => "Executive Gray",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Modern => "Professional LinkedIn blue theme with premium styling",
            Self::Minimal => "Simple white background with elegant typography",
            Self::Dark => "Dark theme with LinkedIn blue accents",
            Self::Corporate => "Deep blue theme for business professionals",
            Self::Creative => "LinkedIn blue with gold accents for creative professionals",
            Self::Elegant => "Sophisticated gray design for executives",
        }
    }

    /// Color used for initials drawn on top of the accent-filled fallback avatar.
    pub fn initials_color(self) -> Rgba8 {
        match self {
            Self::Minimal => Rgba8::from_hex_rgb(0x1f2937),
            _ => Rgba8::WHITE,
        }
    }

    pub fn style(self) -> TemplateStyle {
        match self {
            Self::Modern => TemplateStyle::gradient(0x0077b5, 0x004182, 0xffffff, 0xffd700),
            Self::Minimal => TemplateStyle {
                background: Background::Solid(Rgba8::WHITE),
                text_color: Rgba8::from_hex_rgb(0x1f2937),
                accent_color: Rgba8::from_hex_rgb(0x0077b5),
            },
            Self::Dark => TemplateStyle::gradient(0x1f2937, 0x111827, 0xffffff, 0x0077b5),
            Self::Corporate => TemplateStyle::gradient(0x004182, 0x1e3a8a, 0xffffff, 0x93c5fd),
            Self::Creative => TemplateStyle::gradient(0x0077b5, 0xffd700, 0xffffff, 0xffffff),
            Self::Elegant => TemplateStyle::gradient(0x4b5563, 0x374151, 0xffffff, 0xd1d5db),
        }
    }
}

/// One stop of a linear gradient, `offset` in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

/// Card background. Gradients run from the top-left to the bottom-right corner.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Background {
    Solid(Rgba8),
    LinearGradient(Vec<GradientStop>),
}

/// Resolved visual style of a template.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TemplateStyle {
    pub background: Background,
    /// Quote and name color.
    pub text_color: Rgba8,
    /// Avatar border, fallback fill and title color.
    pub accent_color: Rgba8,
}

impl TemplateStyle {
    fn gradient(from: u32, to: u32, text: u32, accent: u32) -> Self {
        Self {
            background: Background::LinearGradient(vec![
                GradientStop {
                    offset: 0.0,
                    color: Rgba8::from_hex_rgb(from),
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgba8::from_hex_rgb(to),
                },
            ]),
            text_color: Rgba8::from_hex_rgb(text),
            accent_color: Rgba8::from_hex_rgb(accent),
        }
    }
}

/// Resolve a template name to its style. Never fails.
pub fn resolve_style(template_id: &str) -> TemplateStyle {
    TemplateId::from_name(template_id).style()
}

#[cfg(test)]
#[path = "../../tests/unit/template/registry.rs"]
mod tests;
