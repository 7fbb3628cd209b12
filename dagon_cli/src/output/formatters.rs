use super::{CrackReport, HashReport, OutputFormatter};
use crate::progress::{format_count, format_duration};
use anyhow::Result;
use colored::*;
use dagon_core::{AlgorithmSpec, CandidateRanking, RecoveryOutcome};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn label(spec: &AlgorithmSpec) -> String {
        let mut label = format!("{} ({})", spec.name().to_uppercase(), spec.code());
        if !spec.is_implemented() {
            label.push_str(" (not implemented yet)");
        }
        label
    }
}

impl OutputFormatter for TextFormatter {
    fn format_ranking(&self, ranking: &CandidateRanking) -> Result<String> {
        let mut output = String::new();

        if ranking.is_empty() {
            writeln!(
                output,
                "{}",
                self.colorize("No known algorithm matches this digest", |s| s.yellow())
            )?;
            return Ok(output);
        }

        writeln!(output, "Digest: {}", ranking.digest())?;
        writeln!(output, "\nMost likely hash type(s):")?;
        for spec in ranking.likely() {
            let marker = self.colorize("[+]", |s| s.green());
            writeln!(output, "  {marker} {}", Self::label(spec))?;
        }

        let unlikely: Vec<_> = ranking.unlikely().collect();
        if !unlikely.is_empty() {
            writeln!(output, "\nLeast likely hash type(s):")?;
            for spec in unlikely {
                let marker = self.colorize("[-]", |s| s.red());
                writeln!(output, "  {marker} {}", Self::label(spec))?;
            }
        }

        for advisory in ranking.advisories() {
            writeln!(output, "\nNote: {advisory}")?;
        }

        Ok(output)
    }

    fn format_crack(&self, report: &CrackReport) -> Result<String> {
        let mut output = String::new();

        match &report.outcome {
            Some(RecoveryOutcome::Found(result)) => {
                writeln!(output, "{}", self.colorize("Match found", |s| s.bold().green()))?;
                let plaintext = self.colorize(&result.plaintext, |s| s.cyan());
                writeln!(output, "  Plaintext: {plaintext}")?;
                if let Some(hex) = &result.plaintext_hex {
                    writeln!(output, "  Bytes:     {hex}")?;
                }
                writeln!(output, "  Digest:    {}", result.digest)?;
                writeln!(
                    output,
                    "  Algorithm: {} ({})",
                    result.algorithm.to_uppercase(),
                    result.code
                )?;
                writeln!(output, "  Attempts:  {}", format_count(result.attempts))?;
                writeln!(output, "  Time:      {}", format_duration(result.elapsed))?;
            }
            Some(RecoveryOutcome::Failed(failure)) => {
                writeln!(
                    output,
                    "{}",
                    self.colorize("No match found", |s| s.bold().yellow())
                )?;
                writeln!(output, "  Digest:    {}", report.digest)?;
                writeln!(output, "  Tried:     {}", report.algorithms.join(", "))?;
                writeln!(output, "  Reason:    {}", failure.reason)?;
                writeln!(output, "  Attempts:  {}", format_count(failure.attempts))?;
                writeln!(output, "  Time:      {}", format_duration(failure.elapsed))?;
            }
            None => {
                writeln!(
                    output,
                    "{}",
                    self.colorize("No implemented algorithm matches this digest", |s| {
                        s.yellow()
                    })
                )?;
                writeln!(output, "  Digest:    {}", report.digest)?;
            }
        }

        Ok(output)
    }

    fn format_hash(&self, report: &HashReport) -> Result<String> {
        let mut output = String::new();

        writeln!(
            output,
            "{}: {}",
            self.colorize(&report.algorithm.to_uppercase(), |s| s.yellow()),
            self.colorize(&report.digest, |s| s.cyan())
        )?;
        writeln!(output, "  Plaintext: {}", report.plaintext)?;
        if let Some(salt) = &report.salt {
            writeln!(output, "  Salt:      {} ({})", salt.value(), salt.placement())?;
        }
        for advisory in &report.advisories {
            writeln!(output, "  Note:      {advisory}")?;
        }

        Ok(output)
    }

    fn format_algorithms(&self, specs: &[&AlgorithmSpec]) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "    ID#    {:<26} Primitive", "Algorithm")?;
        writeln!(output, "    ---    {:<26} ---------", "---------")?;

        let (implemented, pending): (Vec<&&AlgorithmSpec>, Vec<&&AlgorithmSpec>) =
            specs.iter().partition(|spec| spec.is_implemented());

        for spec in implemented {
            let marker = self.colorize("[+]", |s| s.blue());
            writeln!(
                output,
                "{marker} {:<6} {:<26} {}",
                spec.code(),
                spec.name().to_uppercase(),
                spec.display_name().unwrap_or_default()
            )?;
        }
        if !pending.is_empty() {
            writeln!(output, "\nNot implemented yet:")?;
            for spec in pending {
                let marker = self.colorize("[-]", |s| s.red());
                writeln!(output, "{marker} {:<6} {}", spec.code(), spec.name().to_uppercase())?;
            }
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_ranking(&self, ranking: &CandidateRanking) -> Result<String> {
        self.render(ranking)
    }

    fn format_crack(&self, report: &CrackReport) -> Result<String> {
        self.render(report)
    }

    fn format_crack_batch(&self, reports: &[CrackReport]) -> Result<String> {
        self.render(reports)
    }

    fn format_hash(&self, report: &HashReport) -> Result<String> {
        self.render(report)
    }

    fn format_algorithms(&self, specs: &[&AlgorithmSpec]) -> Result<String> {
        let entries: Vec<_> = specs
            .iter()
            .map(|spec| {
                json!({
                    "code": spec.code(),
                    "name": spec.name(),
                    "aliases": spec.aliases(),
                    "display_name": spec.display_name(),
                    "implemented": spec.is_implemented(),
                })
            })
            .collect();
        self.render(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagon_core::{AlgorithmRegistry, Classifier, RecoveryEngine};

    const MD5_PASSWORD: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    fn found_report() -> CrackReport {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let outcome = RecoveryEngine::new()
            .recover(MD5_PASSWORD, md5, ["hello", "password"], None)
            .unwrap();
        CrackReport {
            digest: MD5_PASSWORD.to_string(),
            algorithms: vec!["md5".to_string()],
            outcome: Some(outcome),
        }
    }

    #[test]
    fn test_text_ranking_marks_unimplemented() {
        let registry = AlgorithmRegistry::with_builtins();
        let ranking =
            Classifier::new(&registry).classify("5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8", false);

        let text = TextFormatter::new(false).format_ranking(&ranking).unwrap();
        assert!(text.contains("[+] SHA1 (300)"));
        assert!(text.contains("HAVAL160 (1240) (not implemented yet)"));
        assert!(!text.contains("Least likely"));
    }

    #[test]
    fn test_text_crack_found() {
        let text = TextFormatter::new(false).format_crack(&found_report()).unwrap();
        assert!(text.contains("Plaintext: password"));
        assert!(text.contains("Algorithm: MD5 (100)"));
        assert!(text.contains("Attempts:  2"));
    }

    #[test]
    fn test_text_crack_shows_raw_bytes() {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let target = registry.get("md5").unwrap().hash_bytes(b"caf\xe9");
        let words: [&[u8]; 1] = [b"caf\xe9"];
        let report = CrackReport {
            digest: target.clone(),
            algorithms: vec!["md5".to_string()],
            outcome: Some(RecoveryEngine::new().recover(&target, md5, words, None).unwrap()),
        };

        let text = TextFormatter::new(false).format_crack(&report).unwrap();
        assert!(text.contains("Bytes:     636166e9"));
        assert!(!TextFormatter::new(false)
            .format_crack(&found_report())
            .unwrap()
            .contains("Bytes:"));
    }

    #[test]
    fn test_json_crack_found() {
        let json = JsonFormatter::new(false).format_crack(&found_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"]["status"], "found");
        assert_eq!(value["outcome"]["plaintext"], "password");
        assert_eq!(value["outcome"]["attempts"], 2);
    }

    #[test]
    fn test_json_batch_is_array() {
        let reports = vec![found_report(), found_report()];
        let json = JsonFormatter::new(true).format_crack_batch(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_algorithm_listing() {
        let registry = AlgorithmRegistry::with_builtins();
        let specs: Vec<_> = registry.specs().collect();

        let text = TextFormatter::new(false).format_algorithms(&specs).unwrap();
        assert!(text.contains("[+] 100    MD5"));
        assert!(text.contains("Tiger/192"));
        assert!(text.contains("Double MD5"));
        assert!(text.contains("Not implemented yet:"));
    }
}
