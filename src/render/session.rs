use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use arc_swap::ArcSwapOption;

use crate::{
    assets::loader::{ImageFetcher, SourceFetcher},
    model::{ProfileData, RenderParams},
    render::{renderer::Renderer, surface::Surface},
};

/// A surface that made it to the display slot.
#[derive(Debug)]
pub struct PublishedCard {
    pub request_id: u64,
    pub surface: Surface,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Published(Arc<PublishedCard>),
    /// A newer request was submitted while this one rendered; its surface was dropped.
    Superseded { request_id: u64, latest: u64 },
}

impl SubmitOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Serializes publication of overlapping renders: the last submitted request wins.
///
/// Renders themselves run concurrently. Only the request that was the newest at completion time
/// replaces the displayed card, and an older request can never overwrite a newer one.
pub struct RenderSession<F = SourceFetcher> {
    renderer: Renderer<F>,
    latest: AtomicU64,
    displayed: ArcSwapOption<PublishedCard>,
}

impl<F: ImageFetcher> RenderSession<F> {
    pub fn new(renderer: Renderer<F>) -> Self {
        Self {
            renderer,
            latest: AtomicU64::new(0),
            displayed: ArcSwapOption::empty(),
        }
    }

    pub fn renderer(&self) -> &Renderer<F> {
        &self.renderer
    }

    /// Currently displayed card, if any request has been published.
    pub fn displayed(&self) -> Option<Arc<PublishedCard>> {
        self.displayed.load_full()
    }

    pub async fn submit(
        &self,
        profile: &ProfileData,
        template_id: &str,
        params: &RenderParams,
    ) -> SubmitOutcome {
        let request_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let surface = self.renderer.render(profile, template_id, params).await;

        let latest = self.latest.load(Ordering::SeqCst);
        if latest != request_id {
            tracing::debug!(request_id, latest, "render superseded");
            return SubmitOutcome::Superseded { request_id, latest };
        }

        let card = Arc::new(PublishedCard {
            request_id,
            surface,
        });
        let previous = self.displayed.rcu(|current| match current {
            Some(shown) if shown.request_id > request_id => Some(Arc::clone(shown)),
            _ => Some(Arc::clone(&card)),
        });
        if let Some(shown) = previous
            && shown.request_id > request_id
        {
            return SubmitOutcome::Superseded {
                request_id,
                latest: shown.request_id,
            };
        }

        tracing::debug!(request_id, "card published");
        SubmitOutcome::Published(card)
    }
}
