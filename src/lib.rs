//! `quotecard` renders square, branded quote cards.
//!
//! A card is a template background, a word-wrapped quote, a circular avatar (or an initials
//! fallback when the avatar cannot be loaded), a name and an optional title. Rendering goes
//! through a [`RenderPlan`] of ordered draw ops that a `vello_cpu` backend rasterizes into a
//! [`Surface`]; [`Surface::encode_png`] turns it into bytes for download or sharing.
//!
//! ```no_run
//! # async fn demo() -> quotecard::QuoteCardResult<()> {
//! use quotecard::{ProfileData, RenderConfig, RenderParams, Renderer};
//!
//! let renderer = Renderer::new(RenderConfig::from_env())?;
//! let profile = ProfileData {
//!     name: "Ada Lovelace".into(),
//!     image: String::new(),
//!     title: Some("Mathematician".into()),
//! };
//! let params = RenderParams {
//!     quote_text: "Stay curious".into(),
//!     ..RenderParams::default()
//! };
//! let png = renderer.render(&profile, "minimal", &params).await.encode_png()?;
//! # let _ = png;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod assets;
mod config;
mod export;
mod foundation;
mod layout;
mod model;
mod render;
mod template;

pub use assets::decode::{PreparedImage, decode_avatar};
pub use assets::loader::{
    AssetLoader, DEFAULT_LOAD_TIMEOUT, ImageFetcher, LoadOutcome, SourceFetcher,
};
pub use config::RenderConfig;
pub use export::{ShareBlob, download_file_name, timestamp_token};
pub use foundation::core::{Canvas, Circle, Point, Rgba8};
pub use foundation::error::{LoadError, QuoteCardError, QuoteCardResult};
pub use layout::shaper::TextShaper;
pub use layout::wrap::{FontSpec, TextBlock, TextMeasure, layout_quote, quote_wrap, wrap};
pub use model::{
    CardJob, FontFamily, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX, ProfileData, RenderParams, TextAlign,
};
pub use render::plan::{AvatarSlot, DrawOp, RenderPlan, compose, profile_anchor_y};
pub use render::renderer::Renderer;
pub use render::session::{PublishedCard, RenderSession, SubmitOutcome};
pub use render::surface::Surface;
pub use template::registry::{Background, GradientStop, TemplateId, TemplateStyle, resolve_style};
