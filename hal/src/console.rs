//! Console output abstraction

/// A device that displays text
///
/// Sinks have no flow control and are assumed always ready. A sink that
/// cannot keep up drops bytes rather than reporting failure.
pub trait ConsoleSink {
    /// Writes a single byte
    fn write_char(&mut self, ch: u8);

    /// Writes a string
    ///
    /// The string ends at the first NUL byte or at the end of the slice,
    /// whichever comes first.
    fn write_str(&mut self, s: &[u8]) {
        for &ch in s.iter().take_while(|&&ch| ch != 0) {
            self.write_char(ch);
        }
    }

    /// Switches the device to its alert presentation (used by the panic path)
    ///
    /// Devices without a notion of presentation ignore this.
    fn enter_alert_screen(&mut self) {}
}

impl<T: ConsoleSink + ?Sized> ConsoleSink for &mut T {
    fn write_char(&mut self, ch: u8) {
        (**self).write_char(ch)
    }

    fn write_str(&mut self, s: &[u8]) {
        (**self).write_str(s)
    }

    fn enter_alert_screen(&mut self) {
        (**self).enter_alert_screen()
    }
}
