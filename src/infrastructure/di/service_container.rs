//! Service container for dependency injection
//!
//! Wires settings into sessions and their observers.

use std::io::Write;
use std::sync::Arc;

use crate::application::Session;
use crate::config::{RenderStyle, Settings};
use crate::infrastructure::render::{ChangeRenderer, TracingObserver};

/// Container holding the resolved settings and building sessions from them.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Seeded session without a renderer; changes are only logged.
    pub fn quiet_session(&self) -> Session {
        let mut session = Session::new();
        session.seed(&self.settings.seed);
        session.subscribe(Box::new(TracingObserver));
        session
    }

    /// Seeded session that renders every change to `out` in the configured style.
    ///
    /// Seeding happens before the renderer subscribes, so seed values are not drawn
    /// one by one.
    pub fn session<W: Write + 'static>(&self, out: W) -> Session {
        let mut session = self.quiet_session();
        if self.settings.render != RenderStyle::Quiet {
            let renderer = ChangeRenderer::new(out, self.settings.render)
                .annotate(self.settings.show_height)
                .redraw_noops(self.settings.redraw_noops);
            session.subscribe(Box::new(renderer));
        }
        session
    }
}
