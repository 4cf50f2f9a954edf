// task.rs -- Tasks with a status machine, lifecycle events and timing.
//
// Status machine:
//
//   Start --run--> Running --body ok--> Finalized
//                     |  \--body err--> Error
//                     |---pause--> Pausing --checkpoint--> Paused
//                     |                \_______resume_______/ --> Running
//                     \---stop---> Stopping --body returns--> Stopped
//
// A body cooperates with pause/stop by calling `TaskBase::checkpoint()`
// between units of work. The call parks while the task is paused and
// returns false once a stop was requested.
//
// Handlers are invoked on the thread that caused the transition, after
// the status lock is released, so a handler may read the status.

use std::collections::VecDeque;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, ReentrantMutex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::chrono::Chrono;
use crate::core::progress::Progress;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Start,
    Running,
    Pausing,
    Paused,
    Stopping,
    Stopped,
    Finalized,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskEventKind {
    Error,
    Finalized,
    Paused,
    Pausing,
    Resumed,
    Running,
    Stopped,
    Stopping,
}

impl TaskStatus {
    /// Event fired when a task enters this status.
    fn event(self) -> Option<TaskEventKind> {
        match self {
            TaskStatus::Start => None,
            TaskStatus::Running => Some(TaskEventKind::Running),
            TaskStatus::Pausing => Some(TaskEventKind::Pausing),
            TaskStatus::Paused => Some(TaskEventKind::Paused),
            TaskStatus::Stopping => Some(TaskEventKind::Stopping),
            TaskStatus::Stopped => Some(TaskEventKind::Stopped),
            TaskStatus::Finalized => Some(TaskEventKind::Finalized),
            TaskStatus::Error => Some(TaskEventKind::Error),
        }
    }
}

/// Payload delivered to event handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub kind: TaskEventKind,
    /// Error message for `TaskEventKind::Error`, otherwise None.
    pub message: Option<String>,
    /// Running time in seconds at the moment of the event.
    pub elapsed: f64,
}

pub type EventHandler = Arc<dyn Fn(&TaskEvent) + Send + Sync>;

struct TaskState {
    status: TaskStatus,
    error: Option<String>,
}

/// Status, handlers and chrono shared by every task implementation.
pub struct TaskBase {
    state: Mutex<TaskState>,
    wake: Condvar,
    // None subscribes to every event kind.
    handlers: Mutex<Vec<(Option<TaskEventKind>, EventHandler)>>,
    chrono: Mutex<Chrono>,
    // Serializes transitions with their event delivery.
    order: ReentrantMutex<()>,
}

impl Default for TaskBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBase {
    pub fn new() -> Self {
        TaskBase {
            state: Mutex::new(TaskState { status: TaskStatus::Start, error: None }),
            wake: Condvar::new(),
            handlers: Mutex::new(Vec::new()),
            chrono: Mutex::new(Chrono::new()),
            order: ReentrantMutex::new(()),
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.state.lock().status
    }

    /// Message of the error that ended the last run, if any.
    pub fn error_message(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Running time of the current or last run, in seconds.
    pub fn time(&self) -> f64 {
        self.chrono.lock().elapsed()
    }

    /// Store `status` and fire its event.
    pub fn set_status(&self, status: TaskStatus) {
        self.transition_with(|_, _| Some((status, status.event())));
    }

    pub fn subscribe<F>(&self, kind: TaskEventKind, handler: F)
    where
        F: Fn(&TaskEvent) + Send + Sync + 'static,
    {
        self.handlers.lock().push((Some(kind), Arc::new(handler)));
    }

    pub fn subscribe_all<F>(&self, handler: F)
    where
        F: Fn(&TaskEvent) + Send + Sync + 'static,
    {
        self.handlers.lock().push((None, Arc::new(handler)));
    }

    /// Request a pause. Only honoured while Running.
    pub fn pause(&self) {
        self.transition_if(&[TaskStatus::Running], TaskStatus::Pausing, |_| {});
    }

    pub fn resume(&self) {
        self.transition_with(|state, chrono| match state.status {
            TaskStatus::Paused | TaskStatus::Pausing => {
                chrono.resume();
                Some((TaskStatus::Running, Some(TaskEventKind::Resumed)))
            }
            _ => None,
        });
    }

    /// Request a stop. Only honoured while Running, Pausing or Paused.
    pub fn stop(&self) {
        self.transition_if(
            &[TaskStatus::Running, TaskStatus::Paused, TaskStatus::Pausing],
            TaskStatus::Stopping,
            |_| {},
        );
    }

    /// Back to Start. Drops all handlers and the last error.
    pub fn reset(&self) {
        {
            let _order = self.order.lock();
            let mut state = self.state.lock();
            state.status = TaskStatus::Start;
            state.error = None;
            self.chrono.lock().reset();
        }
        self.handlers.lock().clear();
        self.wake.notify_all();
    }

    /// Cooperative pause/stop point for task bodies.
    ///
    /// Completes a pending pause, blocks while paused, and returns false
    /// when the body should return because a stop was requested.
    pub fn checkpoint(&self) -> bool {
        self.transition_if(&[TaskStatus::Pausing], TaskStatus::Paused, Chrono::pause);
        let mut state = self.state.lock();
        while state.status == TaskStatus::Paused {
            self.wake.wait(&mut state);
        }
        state.status != TaskStatus::Stopping
    }

    pub fn is_stopping(&self) -> bool {
        self.status() == TaskStatus::Stopping
    }

    /// Drive `body` through the status machine.
    ///
    /// Fails without running the body unless the task is in Start. Of two
    /// concurrent callers only one claims the run.
    pub fn run_body<F>(&self, body: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let mut from = TaskStatus::Start;
        let claimed = self.transition_with(|state, chrono| {
            from = state.status;
            (state.status == TaskStatus::Start).then(|| {
                chrono.run();
                (TaskStatus::Running, Some(TaskEventKind::Running))
            })
        });
        if claimed.is_none() {
            return Err(Error::Task(format!("task cannot run from status {from:?}")));
        }
        debug!("task running");

        match body() {
            Ok(()) => {
                let mut seconds = 0.0;
                let end = self.transition_with(|state, chrono| {
                    seconds = chrono.finalize();
                    let end = if state.status == TaskStatus::Stopping {
                        TaskStatus::Stopped
                    } else {
                        TaskStatus::Finalized
                    };
                    Some((end, end.event()))
                });
                debug!(seconds, status = ?end, "task ended");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "task failed");
                self.transition_with(|state, chrono| {
                    chrono.stop();
                    state.error = Some(e.to_string());
                    Some((TaskStatus::Error, Some(TaskEventKind::Error)))
                });
                Err(e)
            }
        }
    }

    /// Move to `to` if the current status is one of `allowed`, applying
    /// `on_chrono` in the same critical section. Returns whether it moved.
    fn transition_if<F>(&self, allowed: &[TaskStatus], to: TaskStatus, on_chrono: F) -> bool
    where
        F: FnOnce(&mut Chrono),
    {
        self.transition_with(|state, chrono| {
            allowed.contains(&state.status).then(|| {
                on_chrono(chrono);
                (to, to.event())
            })
        })
        .is_some()
    }

    /// Check and store under one lock, then fire the event.
    ///
    /// `order` is held until the handlers return, so events are delivered
    /// in transition order. It is reentrant: a handler may drive the task.
    fn transition_with<F>(&self, decide: F) -> Option<TaskStatus>
    where
        F: FnOnce(&mut TaskState, &mut Chrono) -> Option<(TaskStatus, Option<TaskEventKind>)>,
    {
        let _order = self.order.lock();
        let (next, event) = {
            let mut state = self.state.lock();
            let mut chrono = self.chrono.lock();
            let (next, event) = decide(&mut state, &mut chrono)?;
            state.status = next;
            (next, event)
        };
        self.wake.notify_all();
        if let Some(kind) = event {
            self.fire(kind);
        }
        Some(next)
    }

    fn fire(&self, kind: TaskEventKind) {
        let message = if kind == TaskEventKind::Error {
            self.state.lock().error.clone()
        } else {
            None
        };
        let event = TaskEvent { kind, message, elapsed: self.time() };
        // Clone out so handlers can subscribe without deadlocking.
        let handlers: Vec<EventHandler> = self
            .handlers
            .lock()
            .iter()
            .filter(|(k, _)| k.is_none() || *k == Some(kind))
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }
}

// ============================================================
// Task trait
// ============================================================

/// A unit of work with a lifecycle.
pub trait Task: Send + Sync {
    fn base(&self) -> &TaskBase;

    /// The work itself. Called once per run by `run`.
    fn execute(&self, progress: Option<&mut dyn Progress>) -> Result<()>;

    fn run(&self) -> Result<()> {
        self.base().run_body(|| self.execute(None))
    }

    fn run_with_progress(&self, progress: &mut dyn Progress) -> Result<()> {
        self.base().run_body(|| self.execute(Some(progress)))
    }

    fn pause(&self) {
        self.base().pause();
    }

    fn resume(&self) {
        self.base().resume();
    }

    fn stop(&self) {
        self.base().stop();
    }

    fn reset(&self) {
        self.base().reset();
    }

    fn status(&self) -> TaskStatus {
        self.base().status()
    }

    fn time(&self) -> f64 {
        self.base().time()
    }
}

/// Run `task` on a new thread.
pub fn run_async(task: Arc<dyn Task>) -> JoinHandle<Result<()>> {
    thread::spawn(move || task.run())
}

// ============================================================
// Closure task
// ============================================================

type TaskBody = Box<dyn Fn(&TaskBase) -> Result<()> + Send + Sync>;

/// Task whose body is a closure. The closure receives the base so it can
/// call `checkpoint()`.
pub struct FnTask {
    base: TaskBase,
    body: TaskBody,
}

impl FnTask {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&TaskBase) -> Result<()> + Send + Sync + 'static,
    {
        FnTask { base: TaskBase::new(), body: Box::new(body) }
    }
}

impl Task for FnTask {
    fn base(&self) -> &TaskBase {
        &self.base
    }

    fn execute(&self, _progress: Option<&mut dyn Progress>) -> Result<()> {
        (self.body)(&self.base)
    }
}

// ============================================================
// External process
// ============================================================

const PROCESS_POLL: Duration = Duration::from_millis(10);
// How long pipe readers get to finish after the process is killed.
const READER_GRACE: Duration = Duration::from_millis(250);

/// Runs a shell command line through `sh -c`.
pub struct Process {
    base: TaskBase,
    command: String,
    working_dir: Option<PathBuf>,
    stdout: Mutex<String>,
}

impl Process {
    pub fn new(command: impl Into<String>) -> Self {
        Process {
            base: TaskBase::new(),
            command: command.into(),
            working_dir: None,
            stdout: Mutex::new(String::new()),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Captured standard output of the last run.
    pub fn output(&self) -> String {
        self.stdout.lock().clone()
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut p) = pipe {
            let _ = p.read_to_string(&mut buf);
        }
        buf
    })
}

/// Join `reader` if it finishes within `grace`. A reader still blocked
/// afterwards is detached and ends when the last pipe writer exits.
fn join_within(reader: JoinHandle<String>, grace: Duration) -> Option<String> {
    let t0 = Instant::now();
    while !reader.is_finished() {
        if t0.elapsed() >= grace {
            return None;
        }
        thread::sleep(PROCESS_POLL);
    }
    reader.join().ok()
}

impl Task for Process {
    fn base(&self) -> &TaskBase {
        &self.base
    }

    fn execute(&self, _progress: Option<&mut dyn Progress>) -> Result<()> {
        info!(command = %self.command, "launching process");
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&self.command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        let mut child = cmd.spawn()?;
        let out = drain(child.stdout.take());
        let err = drain(child.stderr.take());

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break Some(status);
            }
            if !self.base.checkpoint() {
                warn!(command = %self.command, "killing process on stop request");
                let _ = child.kill();
                let _ = child.wait();
                break None;
            }
            thread::sleep(PROCESS_POLL);
        };

        // A killed shell may leave grandchildren holding the pipes open.
        let Some(status) = status else {
            let stdout = join_within(out, READER_GRACE);
            if join_within(err, READER_GRACE).is_none() || stdout.is_none() {
                warn!(command = %self.command, "process pipes still open, detaching readers");
            }
            *self.stdout.lock() = stdout.unwrap_or_default();
            return Ok(());
        };
        let stdout = out.join().unwrap_or_default();
        let stderr = err.join().unwrap_or_default();
        *self.stdout.lock() = stdout;

        match status {
            s if s.success() => {
                info!(command = %self.command, "process finished");
                Ok(())
            }
            s => Err(Error::Process {
                code: s.code(),
                message: stderr.trim().to_string(),
            }),
        }
    }
}

// ============================================================
// Task list
// ============================================================

/// Runs its children one after another.
#[derive(Default)]
pub struct TaskList {
    base: TaskBase,
    tasks: Vec<Arc<dyn Task>>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Arc<dyn Task>) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Task for TaskList {
    fn base(&self) -> &TaskBase {
        &self.base
    }

    fn execute(&self, mut progress: Option<&mut dyn Progress>) -> Result<()> {
        if let Some(p) = progress.as_deref_mut() {
            p.set_range(0, self.tasks.len());
        }
        for task in &self.tasks {
            if self.base.is_stopping() {
                return Ok(());
            }
            task.run()?;
            if let Some(p) = progress.as_deref_mut() {
                p.tick();
            }
        }
        Ok(())
    }

    fn stop(&self) {
        self.base.stop();
        for task in &self.tasks {
            task.stop();
        }
    }
}

// ============================================================
// Task queue
// ============================================================

/// FIFO of tasks drained by `run`. Tasks may be pushed while running.
#[derive(Default)]
pub struct TaskQueue {
    base: TaskBase,
    tasks: Mutex<VecDeque<Arc<dyn Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: Arc<dyn Task>) {
        self.tasks.lock().push_back(task);
    }

    pub fn pop(&self) -> Option<Arc<dyn Task>> {
        self.tasks.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

impl Task for TaskQueue {
    fn base(&self) -> &TaskBase {
        &self.base
    }

    fn execute(&self, mut progress: Option<&mut dyn Progress>) -> Result<()> {
        if let Some(p) = progress.as_deref_mut() {
            p.set_range(0, self.len());
        }
        while !self.base.is_stopping() {
            let Some(task) = self.pop() else { break };
            task.run()?;
            if let Some(p) = progress.as_deref_mut() {
                p.tick();
            }
        }
        Ok(())
    }
}
