// core/mod.rs -- Runtime building blocks: flags, timing, tasks, queues.

pub mod chrono;
pub mod flags;
pub mod parallel;
pub mod progress;
pub mod queue;
pub mod task;
pub mod units;

pub use chrono::Chrono;
pub use flags::{EnumFlags, Flag};
pub use parallel::{optimal_number_of_threads, parallel_for, parallel_for_each};
pub use progress::{Progress, ProgressBar, ProgressPercent, ProgressSpinner};
pub use queue::{Consumer, Producer, Queue, QueueMPMC, QueueSPSC};
pub use task::{FnTask, Process, Task, TaskBase, TaskEvent, TaskEventKind, TaskList, TaskQueue, TaskStatus};
