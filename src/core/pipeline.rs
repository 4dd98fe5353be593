use crate::core::rewrite::{rewrite_line, RewriteOptions};
use crate::core::{ConfigProvider, Pipeline, SourceLine, Storage, TransformResult};
use crate::domain::model::{LineOutcome, MalformedPolicy, RewrittenLine, RunStats};
use crate::utils::error::{FixError, Result};
use std::io::Write;

pub struct RectFixPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RectFixPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            scale: self.config.scale(),
            marker: self.config.marker().to_string(),
        }
    }

    fn render(lines: &[RewrittenLine]) -> String {
        let mut out = String::new();
        for line in lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RectFixPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceLine>> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let raw = self.storage.read_file(self.config.input_path()).await?;

        let text = String::from_utf8(raw).map_err(|e| FixError::DecodeError {
            message: e.to_string(),
        })?;

        // str::lines strips both \n and \r\n, so CRLF input normalizes here.
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| SourceLine {
                number: i + 1,
                text: l.to_string(),
            })
            .collect::<Vec<_>>();

        tracing::debug!("Read {} lines", lines.len());
        Ok(lines)
    }

    async fn transform(&self, lines: Vec<SourceLine>) -> Result<TransformResult> {
        let opts = self.rewrite_options();
        let mut out = Vec::with_capacity(lines.len());
        let mut stats = RunStats {
            total_lines: lines.len(),
            ..RunStats::default()
        };

        for line in lines {
            match rewrite_line(line.number, &line.text, &opts) {
                Ok(Some(text)) => {
                    stats.rewritten += 1;
                    out.push(RewrittenLine {
                        number: line.number,
                        text,
                        outcome: LineOutcome::Rewritten,
                    });
                }
                Ok(None) => {
                    stats.passed += 1;
                    out.push(RewrittenLine {
                        number: line.number,
                        text: line.text,
                        outcome: LineOutcome::Passed,
                    });
                }
                Err(e) => match self.config.on_malformed() {
                    MalformedPolicy::Abort => return Err(e),
                    MalformedPolicy::Skip => {
                        tracing::warn!("⚠️ Skipping malformed line: {}", e);
                        stats.recovered += 1;
                        out.push(RewrittenLine {
                            number: line.number,
                            text: line.text,
                            outcome: LineOutcome::Recovered,
                        });
                    }
                },
            }
        }

        Ok(TransformResult { lines: out, stats })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let rendered = Self::render(&result.lines);
        let destination = self.config.output_path().to_string();

        if destination == "-" {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()?;
        } else {
            tracing::debug!(
                "Writing {} bytes to {}",
                rendered.len(),
                destination
            );
            self.storage
                .write_file(&destination, rendered.as_bytes())
                .await?;
        }

        if let Some(report_path) = self.config.report_path() {
            let report = serde_json::to_string_pretty(&result.stats)?;
            tracing::debug!("Writing run report to {}", report_path);
            self.storage
                .write_file(report_path, report.as_bytes())
                .await?;
        }

        if destination == "-" {
            Ok("<stdout>".to_string())
        } else {
            Ok(destination)
        }
    }
}
