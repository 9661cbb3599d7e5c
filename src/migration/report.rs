use std::fmt::Display;
use std::io::{self, Write};


/// Narrates a run into a caller-supplied sink, one line per attempted migration:
/// `applying {i}/{total}: {name} ...SUCCESS` or `... ...FAILURE: {error}`.
pub struct Reporter<'a> {
    sink: &'a mut dyn Write,
    total: usize,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a mut dyn Write, total: usize) -> Self {
        Reporter { sink, total }
    }

    /// Opens the line for the migration at 1-based `position`; the outcome follows.
    pub fn attempt(&mut self, position: usize, name: &str) -> io::Result<()> {
        write!(self.sink, "applying {}/{}: {} ", position, self.total, name)
    }

    pub fn success(&mut self) -> io::Result<()> {
        self.sink.write_all(b"...SUCCESS\n")?;
        self.sink.flush()
    }

    pub fn failure(&mut self, error: impl Display) -> io::Result<()> {
        writeln!(self.sink, "...FAILURE: {error}")?;
        self.sink.flush()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_exact_progress_lines() {
        let mut sink = Vec::new();
        let mut reporter = Reporter::new(&mut sink, 3);

        reporter.attempt(1, "001_a.up.sql").unwrap();
        reporter.success().unwrap();
        reporter.attempt(2, "002_b.up.sql").unwrap();
        reporter.failure("syntax error at or near \"TABL\"").unwrap();

        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "applying 1/3: 001_a.up.sql ...SUCCESS\n\
             applying 2/3: 002_b.up.sql ...FAILURE: syntax error at or near \"TABL\"\n"
        );
    }
}
