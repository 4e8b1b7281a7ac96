//! Console port - line-oriented text I/O

use crate::domain::result::Result;

/// A blocking line source plus a text sink
///
/// The stdin/stdout binding, in-memory streams and scripted test doubles all
/// implement this.
pub trait Console {
    /// Read one line without its line terminator.
    ///
    /// Returns [`Error::InputExhausted`](crate::Error::InputExhausted) at
    /// end-of-input.
    fn read_line(&mut self) -> Result<String>;

    /// Write `text` as-is (no newline is appended)
    fn write_text(&mut self, text: &str) -> Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}
