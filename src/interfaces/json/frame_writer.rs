use crate::domain::ports::RemoteCall;
use crate::error::Result;
use std::io::Write;

/// Writes remote call frames as JSON lines.
pub struct FrameWriter<W: Write> {
    writer: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_frames(&mut self, frames: impl IntoIterator<Item = RemoteCall>) -> Result<()> {
        for frame in frames {
            serde_json::to_writer(&mut self.writer, &frame)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
