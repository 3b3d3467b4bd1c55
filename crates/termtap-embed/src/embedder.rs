//! The embedding protocol state machine.
//!
//! An [`Embedder`] drives one terminal surface through three states:
//! Detached (surface lives on its own), Attached (surface is a layout
//! child of a host container), Destroyed (terminal window torn down,
//! terminal state). The association is layout-only; the terminal engine
//! keeps ownership of the window throughout.
//!
//! The surface handle is re-queried from the registry on every operation
//! rather than cached, which is how the cross-thread teardown race is
//! tolerated: a destroyed surface shows up as a sentinel on the next
//! query, the embedder moves to Destroyed, and the host re-embeds once
//! the engine publishes a new surface.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use termtap_core::{EmbedConfig, Error, RawSurfaceHandle, Result, SurfaceBounds};

use crate::ops::{check_system, SurfaceOps};
use crate::registry::SurfaceRegistry;

/// Where the surface currently stands relative to a host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedState {
    /// Surface exists independently, no parent
    Detached,
    /// Surface is reparented under a host container
    Attached,
    /// Terminal window torn down; terminal state, re-embed required
    Destroyed,
}

/// Drives the embedding protocol over a native-ops backend.
pub struct Embedder<O: SurfaceOps> {
    ops: O,
    registry: SurfaceRegistry,
    config: EmbedConfig,
    state: EmbedState,
    parent: Option<RawSurfaceHandle>,
}

impl<O: SurfaceOps> Embedder<O> {
    /// Create an embedder with default configuration.
    pub fn new(ops: O, registry: SurfaceRegistry) -> Self {
        Self::with_config(ops, registry, EmbedConfig::default())
    }

    /// Create an embedder with explicit configuration.
    pub fn with_config(ops: O, registry: SurfaceRegistry, config: EmbedConfig) -> Self {
        Self {
            ops,
            registry,
            config,
            state: EmbedState::Detached,
            parent: None,
        }
    }

    /// Current protocol state.
    pub fn state(&self) -> EmbedState {
        self.state
    }

    /// The container the surface is attached under, if any.
    pub fn parent(&self) -> Option<RawSurfaceHandle> {
        self.parent
    }

    /// Whether the surface currently exists, by re-query.
    pub fn is_live(&self) -> bool {
        self.registry
            .current()
            .map(|handle| self.ops.is_alive(handle))
            .unwrap_or(false)
    }

    /// Attach the surface under `parent` and align it to `bounds`.
    ///
    /// Valid from Detached, and from Attached for moving the surface to a
    /// different container without an intervening destroy. The previous
    /// container is left untouched; the window system removes the surface
    /// from it as part of the reparent.
    pub fn attach(&mut self, parent: RawSurfaceHandle, bounds: SurfaceBounds) -> Result<()> {
        if self.state == EmbedState::Destroyed {
            return Err(Error::SurfaceDestroyed);
        }
        check_system(&self.ops, parent)?;

        let surface = self.live_surface()?;
        self.ops.reparent(surface, parent)?;
        self.ops.set_bounds(surface, bounds)?;

        self.state = EmbedState::Attached;
        self.parent = Some(parent);
        info!(%surface, %parent, %bounds, backend = self.ops.name(), "surface attached");

        if self.config.focus_on_attach {
            // Attach already took effect; a focus failure downgrades to a
            // warning instead of unwinding the reparent.
            if let Err(e) = self.ops.focus(surface) {
                warn!(%surface, error = %e, "focus after attach failed");
            }
        }
        Ok(())
    }

    /// Re-align the surface to the container's current bounds.
    ///
    /// Idempotent; the host calls this on every container resize, at any
    /// frequency.
    pub fn sync_bounds(&mut self, bounds: SurfaceBounds) -> Result<()> {
        match self.state {
            EmbedState::Attached => {}
            EmbedState::Detached => return Err(Error::NotAttached),
            EmbedState::Destroyed => return Err(Error::SurfaceDestroyed),
        }

        let surface = self.live_surface()?;
        self.ops.set_bounds(surface, bounds)?;
        debug!(%surface, %bounds, "surface bounds synced");
        Ok(())
    }

    /// Transfer keyboard focus to the surface.
    ///
    /// Idempotent; only meaningful while Attached. Detached and Destroyed
    /// are defined no-value failures, never a crash.
    pub fn focus(&mut self) -> Result<()> {
        match self.state {
            EmbedState::Attached => {}
            EmbedState::Detached => return Err(Error::NotAttached),
            EmbedState::Destroyed => return Err(Error::SurfaceDestroyed),
        }

        let surface = self.live_surface()?;
        self.ops.focus(surface)
    }

    /// Forget the parent association and return to Detached.
    ///
    /// Bookkeeping only: the surface stays where the window system last
    /// put it until the next attach or until the engine recreates it.
    /// Idempotent; a no-op once Destroyed.
    pub fn detach(&mut self) {
        if self.state == EmbedState::Attached {
            debug!(parent = ?self.parent, "surface detached");
            self.state = EmbedState::Detached;
        }
        self.parent = None;
    }

    /// Block until the attached surface is destroyed, or until `timeout`.
    ///
    /// For hosts whose windowing layer delivers no destruction
    /// notification of its own: polls liveness every
    /// `liveness_poll_ms` (from [`EmbedConfig`]) by re-query. Returns
    /// `true` once destruction is observed and recorded, `false` on
    /// timeout or when nothing is attached to watch.
    pub fn wait_destroyed(&mut self, timeout: Duration) -> bool {
        match self.state {
            EmbedState::Destroyed => return true,
            EmbedState::Detached => return false,
            EmbedState::Attached => {}
        }

        let poll = Duration::from_millis(self.config.liveness_poll_ms);
        let deadline = Instant::now() + timeout;
        loop {
            if !self.is_live() {
                warn!("attached surface vanished; marking destroyed");
                self.state = EmbedState::Destroyed;
                self.parent = None;
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            std::thread::sleep(poll.min(deadline - now));
        }
    }

    /// Record a destruction notification from the host's windowing layer.
    ///
    /// Irreversible; subsequent operations fail with
    /// [`Error::SurfaceDestroyed`] until the host builds a fresh embedder
    /// for the recreated surface.
    pub fn mark_destroyed(&mut self) {
        if self.state != EmbedState::Destroyed {
            info!("surface destruction recorded");
        }
        self.state = EmbedState::Destroyed;
        self.parent = None;
    }

    /// Re-query the registry and liveness; transition to Destroyed when an
    /// attached surface has gone away underneath us.
    fn live_surface(&mut self) -> Result<RawSurfaceHandle> {
        let handle = match self.registry.current() {
            Some(handle) => handle,
            None => return Err(self.surface_lost()),
        };
        if !self.ops.is_alive(handle) {
            return Err(self.surface_lost());
        }
        Ok(handle)
    }

    fn surface_lost(&mut self) -> Error {
        if self.state == EmbedState::Attached {
            warn!("attached surface vanished; marking destroyed");
            self.state = EmbedState::Destroyed;
            self.parent = None;
            Error::SurfaceDestroyed
        } else {
            Error::SurfaceGone
        }
    }
}

impl<O: SurfaceOps> std::fmt::Debug for Embedder<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("backend", &self.ops.name())
            .field("state", &self.state)
            .field("parent", &self.parent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSurfaceOps;
    use termtap_core::WindowSystem;

    fn setup() -> (MockSurfaceOps, SurfaceRegistry, Embedder<MockSurfaceOps>) {
        let ops = MockSurfaceOps::new(WindowSystem::X11);
        let registry = SurfaceRegistry::new();
        let embedder = Embedder::new(ops.clone(), registry.clone());
        (ops, registry, embedder)
    }

    #[test]
    fn test_initial_state_is_detached() {
        let (_, _, embedder) = setup();
        assert_eq!(embedder.state(), EmbedState::Detached);
        assert_eq!(embedder.parent(), None);
        assert!(!embedder.is_live());
    }

    #[test]
    fn test_attach_before_surface_exists() {
        let (_, _, mut embedder) = setup();
        let result = embedder.attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(800, 600));
        assert!(matches!(result, Err(Error::SurfaceGone)));
        assert_eq!(embedder.state(), EmbedState::Detached);
    }

    #[test]
    fn test_attach_reparents_and_sizes() {
        let (ops, registry, mut embedder) = setup();
        let surface = RawSurfaceHandle::x11(1);
        let container = RawSurfaceHandle::x11(100);
        registry.publish(surface);

        embedder
            .attach(container, SurfaceBounds::fill(800, 600))
            .unwrap();

        assert_eq!(embedder.state(), EmbedState::Attached);
        assert_eq!(embedder.parent(), Some(container));
        assert_eq!(ops.parent_of(surface), Some(100));
        assert_eq!(ops.bounds_of(surface), Some(SurfaceBounds::fill(800, 600)));
    }

    #[test]
    fn test_attach_focuses_when_configured() {
        use crate::testing::MockOp;

        let ops = MockSurfaceOps::new(WindowSystem::X11);
        let registry = SurfaceRegistry::new();
        registry.publish(RawSurfaceHandle::x11(1));

        let config = EmbedConfig {
            focus_on_attach: true,
            ..EmbedConfig::default()
        };
        let mut embedder = Embedder::with_config(ops.clone(), registry, config);
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        assert!(ops.log().contains(&MockOp::Focus { child: 1 }));
    }

    #[test]
    fn test_sync_bounds_requires_attached() {
        let (_, registry, mut embedder) = setup();
        registry.publish(RawSurfaceHandle::x11(1));

        let result = embedder.sync_bounds(SurfaceBounds::fill(100, 100));
        assert!(matches!(result, Err(Error::NotAttached)));
    }

    #[test]
    fn test_sync_bounds_tracks_container() {
        let (ops, registry, mut embedder) = setup();
        let surface = RawSurfaceHandle::x11(1);
        registry.publish(surface);
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(800, 600))
            .unwrap();

        for size in [(640, 480), (1024, 768), (1024, 768)] {
            let bounds = SurfaceBounds::fill(size.0, size.1);
            embedder.sync_bounds(bounds).unwrap();
            assert_eq!(ops.bounds_of(surface), Some(bounds));
        }
    }

    #[test]
    fn test_reattach_to_second_container() {
        let (ops, registry, mut embedder) = setup();
        let surface = RawSurfaceHandle::x11(1);
        let container_a = RawSurfaceHandle::x11(100);
        let container_b = RawSurfaceHandle::x11(200);
        registry.publish(surface);

        embedder.attach(container_a, SurfaceBounds::fill(800, 600)).unwrap();
        embedder.attach(container_b, SurfaceBounds::fill(400, 300)).unwrap();

        assert_eq!(embedder.state(), EmbedState::Attached);
        assert_eq!(embedder.parent(), Some(container_b));
        assert_eq!(ops.parent_of(surface), Some(200));

        // Resizes now land relative to container B
        embedder.sync_bounds(SurfaceBounds::fill(500, 500)).unwrap();
        assert_eq!(ops.bounds_of(surface), Some(SurfaceBounds::fill(500, 500)));
    }

    #[test]
    fn test_focus_state_gating() {
        let (_, registry, mut embedder) = setup();
        registry.publish(RawSurfaceHandle::x11(1));

        assert!(matches!(embedder.focus(), Err(Error::NotAttached)));

        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();
        assert!(embedder.focus().is_ok());
        // Idempotent
        assert!(embedder.focus().is_ok());

        embedder.mark_destroyed();
        assert!(matches!(embedder.focus(), Err(Error::SurfaceDestroyed)));
    }

    #[test]
    fn test_retract_detected_on_next_operation() {
        let (_, registry, mut embedder) = setup();
        registry.publish(RawSurfaceHandle::x11(1));
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        // Engine tears down its window
        registry.retract();

        let result = embedder.sync_bounds(SurfaceBounds::fill(20, 20));
        assert!(matches!(result, Err(Error::SurfaceDestroyed)));
        assert_eq!(embedder.state(), EmbedState::Destroyed);
        assert_eq!(embedder.parent(), None);

        // Irreversible, even after the engine publishes a fresh surface
        registry.publish(RawSurfaceHandle::x11(2));
        assert!(matches!(
            embedder.attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10)),
            Err(Error::SurfaceDestroyed)
        ));
    }

    #[test]
    fn test_dead_window_detected_via_liveness() {
        let (ops, registry, mut embedder) = setup();
        let surface = RawSurfaceHandle::x11(1);
        registry.publish(surface);
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        // Window died but the engine has not retracted yet
        ops.kill(surface);
        assert!(!embedder.is_live());

        let result = embedder.sync_bounds(SurfaceBounds::fill(20, 20));
        assert!(matches!(result, Err(Error::SurfaceDestroyed)));
        assert_eq!(embedder.state(), EmbedState::Destroyed);
    }

    #[test]
    fn test_detach_is_bookkeeping_only() {
        let (ops, registry, mut embedder) = setup();
        let surface = RawSurfaceHandle::x11(1);
        registry.publish(surface);
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        let ops_before = ops.log().len();
        embedder.detach();
        assert_eq!(embedder.state(), EmbedState::Detached);
        assert_eq!(embedder.parent(), None);
        assert_eq!(ops.log().len(), ops_before, "no native call on detach");

        // Idempotent
        embedder.detach();
        assert_eq!(embedder.state(), EmbedState::Detached);
    }

    #[test]
    fn test_wait_destroyed_observes_retraction() {
        let (_, registry, mut embedder) = setup();
        registry.publish(RawSurfaceHandle::x11(1));
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        let engine_side = registry.clone();
        let teardown = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            engine_side.retract();
        });

        assert!(embedder.wait_destroyed(Duration::from_secs(5)));
        assert_eq!(embedder.state(), EmbedState::Destroyed);
        teardown.join().unwrap();
    }

    #[test]
    fn test_wait_destroyed_times_out_while_live() {
        let ops = MockSurfaceOps::new(WindowSystem::X11);
        let registry = SurfaceRegistry::new();
        registry.publish(RawSurfaceHandle::x11(1));

        let config = EmbedConfig {
            liveness_poll_ms: 5,
            ..EmbedConfig::default()
        };
        let mut embedder = Embedder::with_config(ops, registry, config);
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        assert!(!embedder.wait_destroyed(Duration::from_millis(25)));
        assert_eq!(embedder.state(), EmbedState::Attached);
    }

    #[test]
    fn test_wait_destroyed_needs_an_attachment() {
        let (_, registry, mut embedder) = setup();
        assert!(!embedder.wait_destroyed(Duration::from_millis(1)));

        registry.publish(RawSurfaceHandle::x11(1));
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();
        embedder.mark_destroyed();
        // Already destroyed: reports immediately without polling
        assert!(embedder.wait_destroyed(Duration::from_secs(5)));
    }

    #[test]
    fn test_native_failure_surfaces_verbatim() {
        let (ops, registry, mut embedder) = setup();
        registry.publish(RawSurfaceHandle::x11(1));
        embedder
            .attach(RawSurfaceHandle::x11(100), SurfaceBounds::fill(10, 10))
            .unwrap();

        ops.fail_next("BadWindow (invalid Window parameter)");
        let result = embedder.sync_bounds(SurfaceBounds::fill(20, 20));
        assert!(matches!(
            result,
            Err(Error::NativeOp(msg)) if msg.contains("BadWindow")
        ));
        // A transient native failure does not change protocol state
        assert_eq!(embedder.state(), EmbedState::Attached);
    }

    #[test]
    fn test_foreign_parent_rejected() {
        let (_, registry, mut embedder) = setup();
        registry.publish(RawSurfaceHandle::x11(1));

        let result = embedder.attach(RawSurfaceHandle::win32(100), SurfaceBounds::fill(10, 10));
        assert!(matches!(result, Err(Error::SystemMismatch { .. })));
        assert_eq!(embedder.state(), EmbedState::Detached);
    }
}
