use crate::Record;
use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing_core::Level;

pub mod request_id;

/// An observer registered with a [`Logger`](crate::Logger) and invoked for
/// every record whose level it [listens to](Hook::levels). A hook may read and
/// mutate the record before it is rendered.
///
/// New kinds of hooks plug in by implementing this trait; the logger itself
/// never needs to know about them.
pub trait Hook: Send + Sync + 'static {
    /// Reports the levels at which this hook runs.
    fn levels(&self) -> &[Level];

    /// Processes the given record.
    ///
    /// A failure does not prevent the record from being rendered: the logger
    /// reports it on standard error and moves on.
    fn fire(&self, record: &mut Record<'_>) -> Result<(), HookError>;
}

/// Represents the ways in which a [`Hook`] may fail.
#[derive(Error, Debug)]
pub enum HookError {
    /// Indicates that the hook refused to process the record.
    #[error("hook rejected the record: {0}")]
    Rejected(String),

    /// Indicates that an operation the hook depends on has failed.
    #[error("hook failed: {0}")]
    Failed(#[source] Box<dyn Error + Send + Sync + 'static>),
}

/// Lists every level that `tracing` knows, from the most severe to the most
/// verbose. The usual argument for hooks that should run on every record.
pub fn all_levels() -> Vec<Level> {
    vec![
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ]
}

/// The set of [hooks](Hook) registered with one logger, kept in registration
/// order.
#[derive(Clone, Default)]
pub struct LevelHooks {
    hooks: Vec<Arc<dyn Hook>>,
}

impl LevelHooks {
    /// Registers the given hook.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    /// Reports the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Reports whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Fires, in registration order, every hook that listens to the record’s
    /// level. Failures are reported on standard error and do not stop the
    /// remaining hooks.
    pub fn fire(&self, record: &mut Record<'_>) {
        let level = record.level();

        for hook in &self.hooks {
            if !hook.levels().contains(&level) {
                continue;
            }

            if let Err(error) = hook.fire(record) {
                // The logger cannot log its own failure through itself
                eprintln!("Failed to fire hook: {error}");
            }
        }
    }
}

impl Debug for LevelHooks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelHooks")
            .field("len", &self.hooks.len())
            .finish()
    }
}

impl<H> FromIterator<H> for LevelHooks
where
    H: Into<Arc<dyn Hook>>,
{
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self {
            hooks: iter.into_iter().map(Into::into).collect(),
        }
    }
}
