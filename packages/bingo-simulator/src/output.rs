//! JSON-lines writer for simulation results.

use std::io::Write;

use serde::Serialize;

pub struct JsonLineWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W, Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
