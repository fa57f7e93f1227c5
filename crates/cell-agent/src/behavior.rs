//! The `Behavior` trait — the main extension point for user code.

use std::any::Any;
use std::fmt;

use crate::cell::Cell;
use crate::ctx::StepCtx;
use crate::error::{BehaviorError, BehaviorResult};
use crate::event::{EventCause, NewAgentEvent};

// ── BehaviorKind ──────────────────────────────────────────────────────────────

/// Tag identifying a behavior's concrete kind.
///
/// Used for the same-kind check during [`Behavior::initialize`]: the kind is
/// compared *before* any downcast, so a mismatched propagation source becomes
/// a typed [`BehaviorError::KindMismatch`] instead of a silent default-parameter
/// unit.  Applications add their own kinds via `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Growth,
    GrowthDivision,
    Migration,
    Secretion,
    /// Application-defined kind, identified by a unique static name.
    Custom(&'static str),
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorKind::Growth => write!(f, "Growth"),
            BehaviorKind::GrowthDivision => write!(f, "GrowthDivision"),
            BehaviorKind::Migration => write!(f, "Migration"),
            BehaviorKind::Secretion => write!(f, "Secretion"),
            BehaviorKind::Custom(name) => write!(f, "{name}"),
        }
    }
}

// ── PropagationPolicy ─────────────────────────────────────────────────────────

/// Whether an equivalent unit is attached to a newly created cell when its
/// originating cell carries this unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropagationPolicy {
    /// Propagate on every creation event.
    AlwaysCopy,
    /// Never propagate.  The new cell starts without this unit.
    NeverCopy,
    /// Propagate iff the predicate holds for the event's cause.
    CopyIf(fn(EventCause) -> bool),
}

impl PropagationPolicy {
    /// Evaluate the policy for a creation event with the given cause.
    #[inline]
    pub fn copies_on(self, cause: EventCause) -> bool {
        match self {
            PropagationPolicy::AlwaysCopy => true,
            PropagationPolicy::NeverCopy => false,
            PropagationPolicy::CopyIf(pred) => pred(cause),
        }
    }
}

// ── RunControl ────────────────────────────────────────────────────────────────

/// What the driver does with a unit after its `run` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunControl {
    /// Keep the unit attached; it runs again next step.
    Continue,
    /// Detach the unit.  It receives no further `run` calls; its slot is
    /// tombstoned immediately and compacted at step end.
    RemoveSelf,
}

// ── Behavior trait ────────────────────────────────────────────────────────────

/// An attachable, polymorphic capability executed once per step on its owning
/// cell.
///
/// # Lifecycle
///
/// `spawn → initialize (exactly once) → run (once per step) → removed`.
///
/// [`initialize`][Self::initialize] is invoked immediately after construction
/// for *every* unit — whether created at scenario setup (event carries no
/// originating behavior) or propagated onto a new cell (event carries the
/// originating unit of the same kind).  Once a unit returns
/// [`RunControl::RemoveSelf`] it is never run again.
///
/// # Parameter ownership
///
/// A unit holds only its own parameters; they change only inside its own
/// `initialize` or `run`.  Units are never shared between cells — propagation
/// creates a fresh instance and snapshots the source's parameters.
pub trait Behavior: Send + 'static {
    /// The unit's concrete kind tag.
    fn kind(&self) -> BehaviorKind;

    /// Whether this unit propagates onto cells created from its owner.
    fn policy(&self) -> PropagationPolicy {
        PropagationPolicy::AlwaysCopy
    }

    /// A fresh, default-parameter unit of the same concrete kind.
    ///
    /// Used by the propagation protocol: the new unit's parameters are then
    /// filled in by `initialize` from the event's originating behavior.
    fn spawn(&self) -> Box<dyn Behavior>;

    /// Adopt parameters for a newly constructed unit.
    ///
    /// If `event.origin` is present it is guaranteed by the caller to be of
    /// this unit's kind; implementations copy its parameters verbatim (a
    /// point-in-time snapshot, not a live link) and return
    /// [`BehaviorError::KindMismatch`] if the guarantee is broken.  If
    /// `event.origin` is absent, constructor-supplied parameters stand.
    fn initialize(&mut self, event: &NewAgentEvent<'_>) -> BehaviorResult<()>;

    /// Execute one step for the owning cell.
    ///
    /// May read and write `cell`'s scalar state, draw from `ctx.rng`, query
    /// `ctx.neighbors`, record substance adjustments in `ctx.rates`, request
    /// a division via [`StepCtx::divide`], attach further units to `cell`,
    /// or detach itself by returning [`RunControl::RemoveSelf`].  No ordering
    /// is guaranteed relative to other cells' units within the same step.
    fn run(&mut self, cell: &mut Cell, ctx: &mut StepCtx<'_>) -> BehaviorResult<RunControl>;

    /// Downcast support for parameter snapshots in `initialize`.
    fn as_any(&self) -> &dyn Any;
}

// ── Initialize helper ─────────────────────────────────────────────────────────

/// Resolve the event's originating behavior as a `B`, enforcing the same-kind
/// contract.
///
/// Returns `Ok(None)` when the event carries no origin (setup path),
/// `Ok(Some(_))` when the origin is a `B`, and `Err(KindMismatch)` otherwise.
/// Every built-in kind funnels its `initialize` through this helper.
pub fn origin_as<'a, B: Behavior>(
    event: &'a NewAgentEvent<'_>,
    expected: BehaviorKind,
) -> BehaviorResult<Option<&'a B>> {
    match event.origin {
        None => Ok(None),
        Some(origin) => {
            let found = origin.kind();
            if found != expected {
                return Err(BehaviorError::KindMismatch { expected, found });
            }
            // The kind tags matched, so the concrete type must too; a failed
            // downcast means two kinds share a tag, which is the same
            // contract violation.
            origin
                .as_any()
                .downcast_ref::<B>()
                .map(Some)
                .ok_or(BehaviorError::KindMismatch { expected, found })
        }
    }
}
