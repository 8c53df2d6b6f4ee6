//! Debugger hook points and a stock cooperative debugger.
//!
//! The interpreter only talks to a debugger through `DebugHook`. Before each
//! node it reports the location, and for debuggable nodes it asks whether to
//! stop and then waits while the debugger is paused. The wait blocks the
//! evaluating thread; a controller on another thread releases it with one of
//! the `Debugger` commands.
//!
//! There is no cancellation: a paused evaluator stays blocked until a
//! command arrives.

mod snapshot;

pub use snapshot::{ScopeSnapshot, Snapshot, SnapshotValue};

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};
use vesper_ir::NodeKind;

use crate::diagnostics::StackFrame;
use crate::environment::Environment;

/// How often a blocked evaluator reports that it is still waiting.
const WAIT_WARN_INTERVAL: Duration = Duration::from_secs(30);

/// What the interpreter calls into while evaluating.
///
/// Implementations are shared with a controller thread, so they must be
/// `Send + Sync`.
pub trait DebugHook: Send + Sync {
    /// Whether the debugger may stop before a node of this kind.
    fn is_debuggable(&self, kind: NodeKind) -> bool {
        kind.is_debuggable()
    }

    /// Whether execution should pause at `file:line`.
    fn should_stop(&self, file: &str, line: u32) -> bool;

    /// Enter the paused state.
    fn pause(&self);

    /// Block while paused.
    fn wait_if_paused(&self, kind: NodeKind);

    /// Record the location of the node about to run.
    fn set_location(&self, file: &str, line: u32);

    fn push_frame(&self, frame: StackFrame);

    fn pop_frame(&self);

    /// Freeze the environment of a failing call.
    fn take_snapshot(&self, env: &Environment);

    /// Current number of frames.
    fn depth(&self) -> usize;

    fn snapshot_count(&self) -> usize;

    /// Drop frames above `depth`.
    fn truncate_frames(&self, depth: usize);

    /// Drop snapshots beyond the first `count`.
    fn truncate_snapshots(&self, count: usize);

    fn latest_snapshot(&self) -> Option<Snapshot>;
}

/// Stepping policy after a step command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepMode {
    /// Stop at the very next debuggable node.
    Into,
    /// Stop at the next debuggable node at or above the starting depth.
    Over,
    /// Stop once the starting call has returned. At top level this behaves
    /// like `Over`.
    Out,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecutionState {
    Running,
    Paused,
    /// Stepping until the call depth is at or below the recorded depth.
    /// `Into` ignores the depth.
    Stepping(StepMode, usize),
}

/// A source location as seen by the debugger.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    fn is_at(&self, file: &str, line: u32) -> bool {
        self.line == line && self.file == file
    }
}

struct DebugState {
    execution: ExecutionState,
    breakpoints: FxHashMap<String, FxHashSet<u32>>,
    frames: Vec<StackFrame>,
    snapshots: Vec<Snapshot>,
    location: Option<Location>,
    /// Where the last pause happened. Cleared once execution leaves that
    /// line, so a breakpoint fires once per visit rather than once per node.
    last_stop: Option<Location>,
}

/// Breakpoints, stepping and snapshots behind one mutex.
pub struct Debugger {
    state: Mutex<DebugState>,
    wake: Condvar,
}

impl Debugger {
    pub fn new() -> Self {
        Debugger {
            state: Mutex::new(DebugState {
                execution: ExecutionState::Running,
                breakpoints: FxHashMap::default(),
                frames: Vec::new(),
                snapshots: Vec::new(),
                location: None,
                last_stop: None,
            }),
            wake: Condvar::new(),
        }
    }

    /// Convenience for handing the debugger to both an interpreter and a
    /// controller.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn set_breakpoint(&self, file: &str, line: u32) {
        let mut state = self.state.lock();
        state
            .breakpoints
            .entry(file.to_string())
            .or_default()
            .insert(line);
        debug!(file, line, "breakpoint set");
    }

    /// Returns whether a breakpoint was removed.
    pub fn clear_breakpoint(&self, file: &str, line: u32) -> bool {
        let mut state = self.state.lock();
        state
            .breakpoints
            .get_mut(file)
            .is_some_and(|lines| lines.remove(&line))
    }

    pub fn has_breakpoint(&self, file: &str, line: u32) -> bool {
        let state = self.state.lock();
        Self::breakpoint_hit(&state, file, line)
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.state.lock().execution
    }

    pub fn is_paused(&self) -> bool {
        self.execution_state() == ExecutionState::Paused
    }

    /// Location of the node most recently reported by the interpreter.
    pub fn current_location(&self) -> Option<Location> {
        self.state.lock().location.clone()
    }

    /// Frames, most recent call first.
    pub fn frames(&self) -> Vec<StackFrame> {
        self.state.lock().frames.iter().rev().cloned().collect()
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.state.lock().snapshots.clone()
    }

    // Commands

    /// Resume until the next breakpoint.
    pub fn continue_(&self) {
        self.command(|_| ExecutionState::Running);
    }

    pub fn step_into(&self) {
        self.command(|depth| ExecutionState::Stepping(StepMode::Into, depth));
    }

    pub fn step_over(&self) {
        self.command(|depth| ExecutionState::Stepping(StepMode::Over, depth));
    }

    pub fn step_out(&self) {
        self.command(|depth| ExecutionState::Stepping(StepMode::Out, depth.saturating_sub(1)));
    }

    /// Pause at the next debuggable node.
    pub fn pause(&self) {
        let mut state = self.state.lock();
        state.execution = ExecutionState::Paused;
        let location = state.location.clone();
        debug!(location = ?location, depth = state.frames.len(), "paused");
        state.last_stop = location;
        self.wake.notify_all();
    }

    fn command(&self, next: impl FnOnce(usize) -> ExecutionState) {
        let mut state = self.state.lock();
        let depth = state.frames.len();
        state.execution = next(depth);
        debug!(state = ?state.execution, "debugger command");
        self.wake.notify_all();
    }

    /// Block the calling (controller) thread until the interpreter pauses.
    ///
    /// Returns `false` if `timeout` elapses first.
    pub fn wait_until_paused(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.execution != ExecutionState::Paused {
            if self.wake.wait_until(&mut state, deadline).timed_out() {
                return state.execution == ExecutionState::Paused;
            }
        }
        true
    }

    fn breakpoint_hit(state: &DebugState, file: &str, line: u32) -> bool {
        state
            .breakpoints
            .get(file)
            .is_some_and(|lines| lines.contains(&line))
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugHook for Debugger {
    fn should_stop(&self, file: &str, line: u32) -> bool {
        let state = self.state.lock();
        let depth = state.frames.len();
        let stepped = match state.execution {
            ExecutionState::Paused => return false,
            ExecutionState::Running => false,
            ExecutionState::Stepping(StepMode::Into, _) => true,
            ExecutionState::Stepping(StepMode::Over | StepMode::Out, target) => depth <= target,
        };
        stepped || (state.last_stop.is_none() && Self::breakpoint_hit(&state, file, line))
    }

    fn pause(&self) {
        Debugger::pause(self);
    }

    fn wait_if_paused(&self, kind: NodeKind) {
        let mut state = self.state.lock();
        while state.execution == ExecutionState::Paused {
            if self
                .wake
                .wait_for(&mut state, WAIT_WARN_INTERVAL)
                .timed_out()
                && state.execution == ExecutionState::Paused
            {
                warn!(
                    node = %kind,
                    location = ?state.location,
                    "evaluation still paused; no debugger command received"
                );
            }
        }
    }

    fn set_location(&self, file: &str, line: u32) {
        let mut state = self.state.lock();
        if state
            .location
            .as_ref()
            .is_some_and(|loc| loc.is_at(file, line))
        {
            return;
        }
        state.location = Some(Location {
            file: file.to_string(),
            line,
        });
        if state
            .last_stop
            .as_ref()
            .is_some_and(|stop| !stop.is_at(file, line))
        {
            state.last_stop = None;
        }
    }

    fn push_frame(&self, frame: StackFrame) {
        self.state.lock().frames.push(frame);
    }

    fn pop_frame(&self) {
        self.state.lock().frames.pop();
    }

    fn take_snapshot(&self, env: &Environment) {
        let scope = ScopeSnapshot::capture(env);
        let mut state = self.state.lock();
        let frames = state.frames.iter().rev().cloned().collect();
        state.snapshots.push(Snapshot { frames, scope });
        debug!(count = state.snapshots.len(), "snapshot taken");
    }

    fn depth(&self) -> usize {
        self.state.lock().frames.len()
    }

    fn snapshot_count(&self) -> usize {
        self.state.lock().snapshots.len()
    }

    fn truncate_frames(&self, depth: usize) {
        self.state.lock().frames.truncate(depth);
    }

    fn truncate_snapshots(&self, count: usize) {
        self.state.lock().snapshots.truncate(count);
    }

    fn latest_snapshot(&self) -> Option<Snapshot> {
        self.state.lock().snapshots.last().cloned()
    }
}
