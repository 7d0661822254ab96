//! Deferred query calls and the ORM handle that replays them.

use sqlmodel_core::Value;

use crate::context::ExpectContext;
use crate::recorder::Recorder;

/// A query-building call, captured until the expected value is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `method(arg)`
    Unary { method: String, arg: Value },
    /// `method(arg, rest...)`
    Variadic {
        method: String,
        arg: Value,
        rest: Vec<Value>,
    },
    /// A call shape no handle convention covers.
    Unrecognized { method: String, args: Vec<Value> },
}

impl Call {
    /// Classify a call by its argument count.
    pub fn new(method: impl Into<String>, args: Vec<Value>) -> Self {
        let method = method.into();
        let mut args = args.into_iter();
        match args.next() {
            None => Call::Unrecognized {
                method,
                args: Vec::new(),
            },
            Some(arg) => {
                let rest: Vec<Value> = args.collect();
                if rest.is_empty() {
                    Call::Unary { method, arg }
                } else {
                    Call::Variadic { method, arg, rest }
                }
            }
        }
    }

    pub fn method(&self) -> &str {
        match self {
            Call::Unary { method, .. }
            | Call::Variadic { method, .. }
            | Call::Unrecognized { method, .. } => method,
        }
    }
}

/// Outcome of dispatching one call to the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Unsupported,
}

/// An ORM query handle that can replay calls in recording mode.
///
/// Instead of executing, the handle records every statement it would run on
/// `recorder`: the main query first, then one statement per preload tagged
/// with the relationship field it loads.
pub trait QueryHandle {
    /// Apply `method(arg)`.
    fn unary(
        &mut self,
        method: &str,
        arg: &Value,
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch;

    /// Apply `method(arg, rest...)`.
    fn variadic(
        &mut self,
        method: &str,
        arg: &Value,
        rest: &[Value],
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch;
}

impl<H: QueryHandle + ?Sized> QueryHandle for &mut H {
    fn unary(
        &mut self,
        method: &str,
        arg: &Value,
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch {
        (**self).unary(method, arg, cx, recorder)
    }

    fn variadic(
        &mut self,
        method: &str,
        arg: &Value,
        rest: &[Value],
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch {
        (**self).variadic(method, arg, rest, cx, recorder)
    }
}

/// Replay `calls` against `handle` in order.
///
/// Calls the handle does not support are logged and skipped. Returns the
/// number of calls applied.
pub fn replay<H: QueryHandle + ?Sized>(
    handle: &mut H,
    calls: &[Call],
    cx: &ExpectContext<'_>,
    recorder: &mut Recorder,
) -> usize {
    let mut applied = 0;
    for call in calls {
        let outcome = match call {
            Call::Unary { method, arg } => handle.unary(method, arg, cx, recorder),
            Call::Variadic { method, arg, rest } => {
                handle.variadic(method, arg, rest, cx, recorder)
            }
            Call::Unrecognized { .. } => Dispatch::Unsupported,
        };
        match outcome {
            Dispatch::Applied => applied += 1,
            Dispatch::Unsupported => {
                tracing::warn!(method = call.method(), "not a supported method signature");
            }
        }
    }
    applied
}
