//! Command actions.
//!
//! An action is the side-effecting callable a command or default handler
//! runs. It receives the argument slice the dispatcher selected for it and
//! returns nothing: the dispatcher never observes how an action went. Actions
//! that need to report failure do so out of band (printing, logging, exiting).
//!
//! # Core Types
//!
//! - [`Action`]: Trait for command actions (`&self`, `Send + Sync`)
//! - [`FnAction`]: Wraps an `Fn(&[String])` closure as an [`Action`]
//! - [`ActionRef`]: The shared, type-erased form the dispatcher stores
//!
//! Actions take `&self` so that a registered dispatcher can be shared across
//! threads and dispatched from concurrently. Closures that need to mutate
//! state should capture an `Arc<Mutex<_>>` or an atomic.

use std::fmt;
use std::sync::Arc;

/// Shared reference to a registered action.
///
/// The dispatcher keeps one clone for its lifetime; callers may keep others.
pub type ActionRef = Arc<dyn Action>;

/// Trait for command actions.
///
/// # Example
///
/// ```rust
/// use argroute::Action;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Counter { seen: AtomicUsize }
///
/// impl Action for Counter {
///     fn call(&self, args: &[String]) {
///         self.seen.fetch_add(args.len(), Ordering::Relaxed);
///     }
/// }
/// ```
pub trait Action: Send + Sync {
    /// Runs the action with the arguments selected by the dispatcher.
    fn call(&self, args: &[String]);
}

/// A wrapper that implements [`Action`] for `Fn` closures.
///
/// # Example
///
/// ```rust
/// use argroute::{Action, FnAction};
///
/// let action = FnAction::new(|args: &[String]| println!("{}", args.join(" ")));
/// action.call(&["hello".to_string()]);
/// ```
pub struct FnAction<F> {
    f: F,
}

impl<F> FnAction<F>
where
    F: Fn(&[String]) + Send + Sync,
{
    /// Creates a new FnAction wrapping the given closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Wraps the closure and erases its type into an [`ActionRef`].
    pub fn shared(f: F) -> ActionRef
    where
        F: 'static,
    {
        Arc::new(Self::new(f))
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn(&[String]) + Send + Sync,
{
    fn call(&self, args: &[String]) {
        (self.f)(args)
    }
}

impl<F> fmt::Debug for FnAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction").finish_non_exhaustive()
    }
}
