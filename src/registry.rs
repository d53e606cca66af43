//! Static pin → action dispatch with a global sleep/wake lifecycle.
//!
//! ```text
//!   edge(pin) ──▶ Registry::trigger_gpio ──▶ binding.action.trigger(ctx)
//!                                        └─▶ on_success(ctx)
//!
//!   Registry::sleep ──▶ on_sleep() on every action, once per transition
//!   Registry::wake  ──▶ on_wake()  on every action, once per transition
//! ```
//!
//! Bindings are fixed once [`RegistryBuilder::build`] returns.  Actions share
//! one type `A`, normally an enum, and receive a caller-owned context `C` on
//! every callback so they need no references of their own.

use core::fmt;

use heapless::Vec;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Action capability
// ═══════════════════════════════════════════════════════════════

/// Something bound to an input pin.
pub trait GpioAction<C: ?Sized = ()> {
    /// The bound pin saw a rising edge.
    fn trigger(&mut self, ctx: &mut C);

    /// The device is going to sleep.
    fn on_sleep(&mut self, ctx: &mut C);

    /// The device woke up.
    fn on_wake(&mut self, ctx: &mut C);
}

/// Wraps a trigger callback into an action that ignores sleep and wake.
#[derive(Debug, Clone, Copy)]
pub struct NoSleepWake<F>(pub F);

impl<C: ?Sized, F: FnMut(&mut C)> GpioAction<C> for NoSleepWake<F> {
    fn trigger(&mut self, ctx: &mut C) {
        (self.0)(ctx);
    }

    fn on_sleep(&mut self, _ctx: &mut C) {}

    fn on_wake(&mut self, _ctx: &mut C) {}
}

// ═══════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The pin already has an action bound.
    DuplicatePin(u8),
    /// The builder's fixed capacity is exhausted.
    Full { capacity: usize },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePin(pin) => write!(f, "pin {} bound twice", pin),
            Self::Full { capacity } => write!(f, "more than {} bindings", capacity),
        }
    }
}

impl core::error::Error for RegistryError {}

/// True when no pin appears twice.  Usable in `const` assertions over fixed
/// pin tables.
pub const fn pins_unique(pins: &[u8]) -> bool {
    let mut i = 0;
    while i < pins.len() {
        let mut j = i + 1;
        while j < pins.len() {
            if pins[i] == pins[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// ═══════════════════════════════════════════════════════════════
//  Builder
// ═══════════════════════════════════════════════════════════════

/// One pin and the action it drives.
#[derive(Debug, Clone)]
pub struct ActionBinding<A> {
    pub pin: u8,
    pub action: A,
}

/// Accumulates bindings in declaration order, refusing repeated pins.
pub struct RegistryBuilder<A, const N: usize> {
    bindings: Vec<ActionBinding<A>, N>,
}

impl<A, const N: usize> Default for RegistryBuilder<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, const N: usize> RegistryBuilder<A, N> {
    pub const fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Bind `action` to `pin`.
    pub fn bind(mut self, pin: u8, action: A) -> Result<Self, RegistryError> {
        if self.bindings.iter().any(|b| b.pin == pin) {
            return Err(RegistryError::DuplicatePin(pin));
        }
        self.bindings
            .push(ActionBinding { pin, action })
            .map_err(|_| RegistryError::Full { capacity: N })?;
        Ok(self)
    }

    /// Freeze the bindings.  The registry starts awake.
    pub fn build(self) -> Registry<A, N> {
        info!("Registry: {} bindings", self.bindings.len());
        Registry { bindings: self.bindings, sleeping: false }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Registry
// ═══════════════════════════════════════════════════════════════

pub struct Registry<A, const N: usize> {
    bindings: Vec<ActionBinding<A>, N>,
    sleeping: bool,
}

impl<A, const N: usize> Registry<A, N> {
    pub const fn builder() -> RegistryBuilder<A, N> {
        RegistryBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub const fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Visit every bound pin in declaration order.
    pub fn for_each_input(&self, mut visitor: impl FnMut(u8)) {
        for binding in &self.bindings {
            visitor(binding.pin);
        }
    }

    /// Action bound to `pin`, if any.
    pub fn action(&self, pin: u8) -> Option<&A> {
        self.bindings.iter().find(|b| b.pin == pin).map(|b| &b.action)
    }

    /// Trigger the action bound to `pin`.  Returns false, with no side
    /// effects, if nothing is bound there.
    pub fn trigger_gpio<C: ?Sized>(&mut self, pin: u8, ctx: &mut C) -> bool
    where
        A: GpioAction<C>,
    {
        self.trigger_gpio_then(pin, ctx, |_| {})
    }

    /// As [`trigger_gpio`](Self::trigger_gpio), then run `on_success` once
    /// if an action was triggered.
    pub fn trigger_gpio_then<C: ?Sized>(&mut self, pin: u8, ctx: &mut C, on_success: impl FnOnce(&mut C)) -> bool
    where
        A: GpioAction<C>,
    {
        let Some(binding) = self.bindings.iter_mut().find(|b| b.pin == pin) else {
            debug!("Registry: no action on pin {}", pin);
            return false;
        };
        debug!("Registry: trigger pin {}", pin);
        binding.action.trigger(ctx);
        on_success(ctx);
        true
    }

    /// Notify every action of sleep.  No-op if already sleeping.
    pub fn sleep<C: ?Sized>(&mut self, ctx: &mut C)
    where
        A: GpioAction<C>,
    {
        if self.sleeping {
            return;
        }
        for binding in &mut self.bindings {
            binding.action.on_sleep(ctx);
        }
        self.sleeping = true;
        info!("Registry: sleeping");
    }

    /// Notify every action of wake.  No-op if already awake.
    pub fn wake<C: ?Sized>(&mut self, ctx: &mut C)
    where
        A: GpioAction<C>,
    {
        if !self.sleeping {
            return;
        }
        for binding in &mut self.bindings {
            binding.action.on_wake(ctx);
        }
        self.sleeping = false;
        info!("Registry: awake");
    }
}
