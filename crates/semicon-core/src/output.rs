//! Print-only view of a console, for collaborators that just emit text.

/// Text and hex dump output.
pub trait DebugOutput {
    fn print(&mut self, s: &str);
    fn dump(&mut self, bytes: &[u8]);
}

impl<O: DebugOutput + ?Sized> DebugOutput for &mut O {
    fn print(&mut self, s: &str) {
        (**self).print(s);
    }

    fn dump(&mut self, bytes: &[u8]) {
        (**self).dump(bytes);
    }
}
