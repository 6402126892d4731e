//! Interrupt handling abstraction

/// Interrupt control trait
///
/// This trait abstracts the CPU-level interrupt enable flag. Different
/// architectures have different mechanisms, but all can implement this trait.
pub trait InterruptHal {
    /// Enables interrupts
    fn enable_interrupts(&mut self);

    /// Disables interrupts
    fn disable_interrupts(&mut self);

    /// Returns whether interrupts are enabled
    fn interrupts_enabled(&self) -> bool;
}

/// Runs `f` with interrupts masked, restoring the previous state afterwards
///
/// Interrupts are only re-enabled if they were enabled on entry, so nested
/// calls compose.
pub fn without_interrupts<I, R>(irq: &mut I, f: impl FnOnce() -> R) -> R
where
    I: InterruptHal + ?Sized,
{
    let was_enabled = irq.interrupts_enabled();
    if was_enabled {
        irq.disable_interrupts();
    }
    let result = f();
    if was_enabled {
        irq.enable_interrupts();
    }
    result
}
