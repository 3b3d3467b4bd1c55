//! Test support: an in-memory native-ops backend.
//!
//! [`MockSurfaceOps`] records every operation and models window liveness
//! so protocol behavior can be asserted without a window system. Used by
//! this crate's own tests and available to downstream integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use termtap_core::{Error, RawSurfaceHandle, Result, SurfaceBounds, WindowSystem};

use crate::ops::SurfaceOps;

/// One recorded native operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOp {
    /// A reparent call
    Reparent {
        /// Child handle raw id
        child: u64,
        /// New parent handle raw id
        parent: u64,
    },
    /// A position/size call
    SetBounds {
        /// Child handle raw id
        child: u64,
        /// Applied bounds
        bounds: SurfaceBounds,
    },
    /// A focus call
    Focus {
        /// Child handle raw id
        child: u64,
    },
}

#[derive(Debug, Default)]
struct MockState {
    log: Vec<MockOp>,
    parents: HashMap<u64, u64>,
    bounds: HashMap<u64, SurfaceBounds>,
    dead: HashSet<u64>,
    fail_next: Option<String>,
}

/// In-memory [`SurfaceOps`] backend.
///
/// Cloneable; clones share the same recorded state, so a test can keep one
/// clone for assertions after moving another into an
/// [`Embedder`](crate::Embedder).
#[derive(Debug, Clone)]
pub struct MockSurfaceOps {
    system: WindowSystem,
    state: Arc<Mutex<MockState>>,
}

impl MockSurfaceOps {
    /// Create a backend for the given window system.
    pub fn new(system: WindowSystem) -> Self {
        Self {
            system,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Mark a window as destroyed; later operations on it fail and
    /// [`is_alive`](SurfaceOps::is_alive) reports false.
    pub fn kill(&self, handle: RawSurfaceHandle) {
        self.state.lock().unwrap().dead.insert(handle.raw);
    }

    /// Make the next operation fail with the given native report.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().unwrap().fail_next = Some(message.into());
    }

    /// All operations recorded so far, in call order.
    pub fn log(&self) -> Vec<MockOp> {
        self.state.lock().unwrap().log.clone()
    }

    /// The current parent of a window, if it was ever reparented.
    pub fn parent_of(&self, handle: RawSurfaceHandle) -> Option<u64> {
        self.state.lock().unwrap().parents.get(&handle.raw).copied()
    }

    /// The last bounds applied to a window.
    pub fn bounds_of(&self, handle: RawSurfaceHandle) -> Option<SurfaceBounds> {
        self.state.lock().unwrap().bounds.get(&handle.raw).copied()
    }

    fn begin_op(&self, handle: RawSurfaceHandle) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_next.take() {
            return Err(Error::NativeOp(message));
        }
        if state.dead.contains(&handle.raw) {
            return Err(Error::NativeOp(format!("window 0x{:x} is gone", handle.raw)));
        }
        Ok(())
    }
}

impl SurfaceOps for MockSurfaceOps {
    fn system(&self) -> WindowSystem {
        self.system
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn reparent(&self, child: RawSurfaceHandle, parent: RawSurfaceHandle) -> Result<()> {
        crate::ops::check_system(self, child)?;
        crate::ops::check_system(self, parent)?;
        self.begin_op(child)?;
        let mut state = self.state.lock().unwrap();
        state.parents.insert(child.raw, parent.raw);
        state.log.push(MockOp::Reparent {
            child: child.raw,
            parent: parent.raw,
        });
        Ok(())
    }

    fn set_bounds(&self, child: RawSurfaceHandle, bounds: SurfaceBounds) -> Result<()> {
        crate::ops::check_system(self, child)?;
        self.begin_op(child)?;
        let mut state = self.state.lock().unwrap();
        state.bounds.insert(child.raw, bounds);
        state.log.push(MockOp::SetBounds {
            child: child.raw,
            bounds,
        });
        Ok(())
    }

    fn focus(&self, child: RawSurfaceHandle) -> Result<()> {
        crate::ops::check_system(self, child)?;
        self.begin_op(child)?;
        self.state
            .lock()
            .unwrap()
            .log
            .push(MockOp::Focus { child: child.raw });
        Ok(())
    }

    fn is_alive(&self, child: RawSurfaceHandle) -> bool {
        child.system == self.system && !self.state.lock().unwrap().dead.contains(&child.raw)
    }
}
