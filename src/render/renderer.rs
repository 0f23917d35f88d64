//! View Renderer
//!
//! Runs render cycles: resolve the current path, await its producer, replace
//! the mount point, then re-sync active links.
//!
//! Everything up to the producer call happens synchronously when the cycle is
//! started, so cycles get their generation (and read their path) in the order
//! their triggers fired. The only suspension point is the producer. No loading
//! state is shown while a producer is pending, and a producer that never
//! resolves leaves the previous content mounted.

use futures_util::future::LocalBoxFuture;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::links;
use crate::browser::{Browser, Document};
use crate::config::{RenderPolicy, ShellConfig};
use crate::error::{ShellError, ShellResult};
use crate::routing::{RouteMatch, RouteTable};

/// A started render cycle
///
/// Drive it on the UI event loop. Dropping it before completion abandons the
/// cycle without touching the mount point.
pub type RenderCycle = LocalBoxFuture<'static, ShellResult<RenderOutcome>>;

/// Phases of one render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Resolving,
    Producing,
    Mounting,
    SyncingLinks,
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderPhase::Idle => "idle",
            RenderPhase::Resolving => "resolving",
            RenderPhase::Producing => "producing",
            RenderPhase::Mounting => "mounting",
            RenderPhase::SyncingLinks => "syncing_links",
        };
        f.write_str(name)
    }
}

/// How a render cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The producer's markup replaced the mount point
    Mounted {
        path: String,
        route: RouteMatch,
        generation: u64,
    },
    /// A newer cycle started while this one was producing; output dropped
    Discarded {
        path: String,
        generation: u64,
        latest: u64,
    },
}

impl RenderOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            RenderOutcome::Mounted { generation, .. } | RenderOutcome::Discarded { generation, .. } => {
                *generation
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self, RenderOutcome::Mounted { .. })
    }
}

struct Shared<B, D> {
    browser: Rc<B>,
    document: Rc<D>,
    routes: Rc<RouteTable>,
    mount_id: String,
    link_attribute: String,
    active_class: String,
    policy: RenderPolicy,
    generation: Cell<u64>,
    in_flight: Cell<usize>,
}

impl<B: Browser, D: Document> Shared<B, D> {
    fn sync_active_links(&self) -> ShellResult<usize> {
        let current = self.browser.location()?;
        let anchors = self.document.anchors(&self.link_attribute);
        Ok(links::sync_active_links(&current, &anchors, &self.active_class))
    }
}

/// Decrements the in-flight count however the producer await ends
struct InFlight<B, D>(Rc<Shared<B, D>>);

impl<B, D> InFlight<B, D> {
    fn enter(shared: Rc<Shared<B, D>>) -> Self {
        shared.in_flight.set(shared.in_flight.get() + 1);
        Self(shared)
    }
}

impl<B, D> Drop for InFlight<B, D> {
    fn drop(&mut self) {
        self.0.in_flight.set(self.0.in_flight.get() - 1);
    }
}

/// Owner of the mount point
pub struct Renderer<B, D> {
    shared: Rc<Shared<B, D>>,
}

impl<B, D> Clone for Renderer<B, D> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<B, D> Renderer<B, D>
where
    B: Browser + 'static,
    D: Document + 'static,
{
    pub fn new(config: &ShellConfig, browser: Rc<B>, document: Rc<D>, routes: Rc<RouteTable>) -> Self {
        Self {
            shared: Rc::new(Shared {
                browser,
                document,
                routes,
                mount_id: config.mount.id.clone(),
                link_attribute: config.links.attribute.clone(),
                active_class: config.links.active_class.clone(),
                policy: config.render.policy,
                generation: Cell::new(0),
                in_flight: Cell::new(0),
            }),
        }
    }

    /// Start a render cycle for the current location
    pub fn render(&self) -> RenderCycle {
        let shared = Rc::clone(&self.shared);

        // A cycle that cannot read the location never reaches its producer
        // and must not supersede one that can.
        let location = match shared.browser.location() {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, "Render skipped, location unavailable");
                return Box::pin(async move { Err(e) });
            }
        };

        let generation = shared.generation.get() + 1;
        shared.generation.set(generation);

        let path = location.path().to_string();
        trace_phase(generation, &path, RenderPhase::Resolving);

        let (route, view) = shared.routes.resolve(&path);
        if route == RouteMatch::NotFound {
            tracing::debug!(generation, path = %path, "No route, using not-found view");
        }

        Box::pin(async move {
            trace_phase(generation, &path, RenderPhase::Producing);
            let produced = {
                let _guard = InFlight::enter(Rc::clone(&shared));
                view.render().await
            };

            let markup = match produced {
                Ok(markup) => markup,
                Err(source) => {
                    tracing::error!(generation, path = %path, error = %source, "View producer failed");
                    return Err(ShellError::View { path, source });
                }
            };

            let latest = shared.generation.get();
            if shared.policy == RenderPolicy::LatestIntent && generation != latest {
                tracing::debug!(generation, latest, path = %path, "Discarding superseded render");
                return Ok(RenderOutcome::Discarded {
                    path,
                    generation,
                    latest,
                });
            }

            trace_phase(generation, &path, RenderPhase::Mounting);
            shared.document.replace_mount(&shared.mount_id, &markup)?;

            trace_phase(generation, &path, RenderPhase::SyncingLinks);
            let active = shared.sync_active_links()?;

            tracing::debug!(generation, path = %path, active_links = active, "Render complete");
            trace_phase(generation, &path, RenderPhase::Idle);

            Ok(RenderOutcome::Mounted {
                path,
                route,
                generation,
            })
        })
    }

    /// Recompute the active indicator on every in-app anchor
    pub fn sync_active_links(&self) -> ShellResult<usize> {
        self.shared.sync_active_links()
    }

    /// Generation of the most recently started cycle (0 before the first)
    pub fn generation(&self) -> u64 {
        self.shared.generation.get()
    }

    /// Cycles currently awaiting their producer
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.get()
    }

    pub fn policy(&self) -> RenderPolicy {
        self.shared.policy
    }

    pub fn browser(&self) -> &Rc<B> {
        &self.shared.browser
    }

    pub fn document(&self) -> &Rc<D> {
        &self.shared.document
    }
}

fn trace_phase(generation: u64, path: &str, phase: RenderPhase) {
    tracing::trace!(generation, path = %path, phase = %phase, "Render phase");
}
