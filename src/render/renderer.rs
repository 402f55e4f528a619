use parking_lot::Mutex;

use crate::{
    assets::loader::{AssetLoader, ImageFetcher, SourceFetcher},
    config::RenderConfig,
    foundation::error::QuoteCardResult,
    layout::{shaper::TextShaper, wrap::layout_quote},
    model::{ProfileData, RenderParams},
    render::{
        cpu::CpuBackend,
        plan::{AvatarSlot, RenderPlan, compose},
        surface::Surface,
    },
    template::registry::TemplateId,
};

/// Renders quote cards.
///
/// Shaping and rasterization state sit behind mutexes that are never held across the avatar
/// load, so one `Renderer` can serve overlapping renders.
pub struct Renderer<F = SourceFetcher> {
    config: RenderConfig,
    loader: AssetLoader<F>,
    shaper: Mutex<TextShaper>,
    backend: Mutex<CpuBackend>,
}

impl Renderer<SourceFetcher> {
    pub fn new(config: RenderConfig) -> QuoteCardResult<Self> {
        Self::with_fetcher(config, SourceFetcher::new())
    }
}

impl<F: ImageFetcher> Renderer<F> {
    /// Renderer that loads avatars through `fetcher`.
    pub fn with_fetcher(config: RenderConfig, fetcher: F) -> QuoteCardResult<Self> {
        let backend = CpuBackend::new(&config)?;
        let shaper = TextShaper::with_font_dirs(&config.font_dirs);
        tracing::debug!(
            pixel_size = config.pixel_size(),
            display_size = config.display_size(),
            fonts = shaper.registered_families().len(),
            "renderer ready"
        );
        Ok(Self {
            loader: AssetLoader::with_fetcher(fetcher, config.load_timeout()),
            shaper: Mutex::new(shaper),
            backend: Mutex::new(backend),
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Resolve the style, lay out the quote, load the avatar and return the ops to draw.
    ///
    /// The avatar is only requested when there is a quote to anchor the profile section to.
    pub async fn plan(
        &self,
        profile: &ProfileData,
        template_id: &str,
        params: &RenderParams,
    ) -> RenderPlan {
        let canvas = self.config.canvas();
        let template = TemplateId::from_name(template_id);
        let block = {
            let mut shaper = self.shaper.lock();
            layout_quote(params, canvas, &mut *shaper)
        };

        let avatar = match &block {
            Some(_) if !profile.image.is_empty() => {
                match self.loader.load(&profile.image).await.into_result() {
                    Ok(image) => AvatarSlot::Image(image),
                    Err(err) => {
                        tracing::warn!(%err, "avatar unavailable, drawing initials");
                        AvatarSlot::Initials
                    }
                }
            }
            _ => AvatarSlot::Empty,
        };

        compose(canvas, template, profile, params, block.as_ref(), avatar)
    }

    /// Rasterize `plan`. Drawing failures are logged and the partially painted surface is kept.
    pub fn rasterize(&self, plan: &RenderPlan) -> Surface {
        let mut backend = self.backend.lock();
        let mut shaper = self.shaper.lock();
        let (surface, _failure) = backend.rasterize(plan, &mut shaper);
        surface
    }

    /// Render one card. Never fails: load problems fall back to initials and drawing problems
    /// leave a partial surface.
    #[tracing::instrument(skip_all, fields(template = template_id, name = %profile.name))]
    pub async fn render(
        &self,
        profile: &ProfileData,
        template_id: &str,
        params: &RenderParams,
    ) -> Surface {
        let plan = self.plan(profile, template_id, params).await;
        tracing::debug!(ops = plan.ops.len(), "plan composed");
        self.rasterize(&plan)
    }
}
