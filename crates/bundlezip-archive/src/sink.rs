//! Destinations for finalized archive bytes.

use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};

/// A destination stream that receives the finalized archive.
///
/// The zip encoder patches headers after writing entry data, so sinks must
/// be seekable.
pub trait ArchiveSink: Write + Seek + Send + 'static {
    /// Flush everything and release the underlying resource.
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ArchiveSink for File {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl ArchiveSink for BufWriter<File> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_ref().sync_all()
    }
}

impl ArchiveSink for io::Cursor<Vec<u8>> {}
