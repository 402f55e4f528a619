use crate::foundation::error::{QuoteCardError, QuoteCardResult};

/// Smallest font size the editor offers for the quote.
pub const MIN_FONT_SIZE_PX: u32 = 16;
/// Largest font size the editor offers for the quote.
pub const MAX_FONT_SIZE_PX: u32 = 64;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfileData {
    pub name: String,
    /// http(s) URL, `data:` URI or local path. Empty means no avatar.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl ProfileData {
    /// First letter of each space-separated name token, upper-cased.
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|token| token.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub(crate) fn visible_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Font families offered by the editor.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FontFamily {
    #[default]
    Inter,
    #[serde(rename = "Playfair Display")]
    PlayfairDisplay,
    Roboto,
    #[serde(rename = "Open Sans")]
    OpenSans,
    Lora,
    Montserrat,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        FontFamily::Inter,
        FontFamily::PlayfairDisplay,
        FontFamily::Roboto,
        FontFamily::OpenSans,
        FontFamily::Lora,
        FontFamily::Montserrat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::PlayfairDisplay => "Playfair Display",
            Self::Roboto => "Roboto",
            Self::OpenSans => "Open Sans",
            Self::Lora => "Lora",
            Self::Montserrat => "Montserrat",
        }
    }

    /// CSS-style font stack with a generic fallback.
    pub fn font_stack(self) -> String {
        format!("\"{}\", sans-serif", self.name())
    }
}

impl std::str::FromStr for FontFamily {
    type Err = QuoteCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuoteCardError::validation(format!("unsupported font family '{s}'")))
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl std::str::FromStr for TextAlign {
    type Err = QuoteCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(QuoteCardError::validation(format!(
                "text align must be left, center or right (got '{s}')"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderParams {
    pub quote_text: String,
    #[serde(default = "default_font_size")]
    pub font_size_px: u32,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub text_align: TextAlign,
}

fn default_font_size() -> u32 {
    32
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            quote_text: String::new(),
            font_size_px: default_font_size(),
            font_family: FontFamily::default(),
            text_align: TextAlign::default(),
        }
    }
}

impl RenderParams {
    /// Front-end check. The renderer itself draws whatever it is given.
    pub fn validate(&self) -> QuoteCardResult<()> {
        if !(MIN_FONT_SIZE_PX..=MAX_FONT_SIZE_PX).contains(&self.font_size_px) {
            return Err(QuoteCardError::validation(format!(
                "font size must be within {MIN_FONT_SIZE_PX}..={MAX_FONT_SIZE_PX}px (got {})",
                self.font_size_px
            )));
        }
        Ok(())
    }
}

/// Everything needed for one card, as read from a JSON job file.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CardJob {
    pub profile: ProfileData,
    /// Free-form template name; unknown names render as `modern`.
    #[serde(default)]
    pub template: String,
    pub params: RenderParams,
}

impl CardJob {
    /// Parse a job from JSON text.
    pub fn from_json(json: &str) -> QuoteCardResult<Self> {
        serde_json::from_str(json).map_err(|e| QuoteCardError::serde(format!("card job: {e}")))
    }

    pub fn validate(&self) -> QuoteCardResult<()> {
        if self.profile.name.trim().is_empty() {
            return Err(QuoteCardError::validation("profile name must be non-empty"));
        }
        self.params.validate()
    }
}
