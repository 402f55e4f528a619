use std::time::{SystemTime, UNIX_EPOCH};

use crate::{foundation::error::QuoteCardResult, render::surface::Surface};

pub const SHARE_FILE_NAME: &str = "quote.png";
pub const SHARE_MIME: &str = "image/png";
pub const SHARE_TITLE: &str = "Check out my quote!";

/// PNG payload ready to hand to a platform share sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareBlob {
    pub file_name: String,
    pub mime: String,
    pub title: String,
    pub bytes: Vec<u8>,
}

impl ShareBlob {
    pub fn from_surface(surface: &Surface) -> QuoteCardResult<Self> {
        Ok(Self {
            file_name: SHARE_FILE_NAME.to_string(),
            mime: SHARE_MIME.to_string(),
            title: SHARE_TITLE.to_string(),
            bytes: surface.encode_png()?,
        })
    }
}

/// `"{prefix}-{token}.png"`.
pub fn download_file_name(prefix: &str, token: &str) -> String {
    format!("{prefix}-{token}.png")
}

/// Current Unix time in milliseconds, for unique download names.
pub fn timestamp_token() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string()
}
