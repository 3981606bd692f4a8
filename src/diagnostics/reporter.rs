//! Statistics reporters
//!
//! Sinks for the per-generation snapshot emitted by the generation loop.

use std::io::Write;

use tracing::info;

use crate::diagnostics::GenerationStats;
use crate::error::EvoResult;

/// Consumer of per-generation statistics
pub trait StatsReporter {
    /// Handle one generation's snapshot
    fn report(&mut self, stats: &GenerationStats) -> EvoResult<()>;
}

impl<T: StatsReporter + ?Sized> StatsReporter for &mut T {
    fn report(&mut self, stats: &GenerationStats) -> EvoResult<()> {
        (**self).report(stats)
    }
}

/// Collects every snapshot in memory
impl StatsReporter for Vec<GenerationStats> {
    fn report(&mut self, stats: &GenerationStats) -> EvoResult<()> {
        self.push(stats.clone());
        Ok(())
    }
}

/// Writes the three five-number summaries per generation as plain text
///
/// ```text
/// Model1 stats: [0.47, 0.52, 0.55, 0.58, 0.66]
/// Model2 stats: [0.43, 0.49, 0.51, 0.54, 0.61]
/// Min reward diffs: [-3, -1, 0, 2, 3]
/// ```
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    writer: W,
}

impl<W: Write> TextReporter<W> {
    /// Create a reporter writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StatsReporter for TextReporter<W> {
    fn report(&mut self, stats: &GenerationStats) -> EvoResult<()> {
        writeln!(self.writer, "Model1 stats: {}", stats.model1_match)?;
        writeln!(self.writer, "Model2 stats: {}", stats.model2_match)?;
        writeln!(self.writer, "Min reward diffs: {}", stats.task_threshold)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes each snapshot as one line of JSON
#[derive(Debug)]
pub struct JsonLinesReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesReporter<W> {
    /// Create a reporter writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StatsReporter for JsonLinesReporter<W> {
    fn report(&mut self, stats: &GenerationStats) -> EvoResult<()> {
        serde_json::to_writer(&mut self.writer, stats)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Emits each snapshot as a structured `tracing` event
#[derive(Clone, Debug, Default)]
pub struct TracingReporter;

impl StatsReporter for TracingReporter {
    fn report(&mut self, stats: &GenerationStats) -> EvoResult<()> {
        info!(
            generation = stats.generation,
            model1_median = stats.model1_match.median,
            model2_median = stats.model2_match.median,
            threshold_median = stats.task_threshold.median,
            best_fitness = stats.fitness.as_ref().map(|f| f.best_fitness),
            cooperative_rounds = stats.cooperative_rounds,
            "generation complete",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::FiveNumberSummary;

    fn stats() -> GenerationStats {
        GenerationStats {
            generation: 3,
            model1_match: FiveNumberSummary::from_values(vec![0.5, 0.75]).unwrap(),
            model2_match: FiveNumberSummary::from_values(vec![0.25]).unwrap(),
            task_threshold: FiveNumberSummary::from_values(vec![-3.0, -1.0, 0.0, 2.0]).unwrap(),
            fitness: None,
            cooperative_rounds: 10,
            elapsed_ms: 1.5,
        }
    }

    #[test]
    fn test_text_reporter_format() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(&stats()).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "Model1 stats: [0.5, 0.5, 0.75, 0.75, 0.75]\n\
             Model2 stats: [0.25, 0.25, 0.25, 0.25, 0.25]\n\
             Min reward diffs: [-3, -1, 0, 2, 2]\n"
        );
    }

    #[test]
    fn test_json_lines_reporter_roundtrip() {
        let mut reporter = JsonLinesReporter::new(Vec::new());
        reporter.report(&stats()).unwrap();
        reporter.report(&stats()).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: GenerationStats = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, stats());
    }

    #[test]
    fn test_vec_reporter_collects() {
        let mut collected: Vec<GenerationStats> = Vec::new();
        collected.report(&stats()).unwrap();
        (&mut collected).report(&stats()).unwrap();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_tracing_reporter_is_infallible() {
        assert!(TracingReporter.report(&stats()).is_ok());
    }
}
