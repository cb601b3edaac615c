use dagger_sdk::{Directory, Query};

use crate::containers;

/// Unit tests plus the in-memory HTTP suite. The Postgres suite skips itself
/// here and runs in the integration stage instead.
pub async fn run(client: &Query, source: Directory) -> eyre::Result<String> {
    let output = containers::rust_base(client, source)
        .with_env_variable("RUST_LOG", "warn")
        .with_exec(vec![
            "cargo",
            "test",
            "--package",
            "zisodb-server",
            "--lib",
            "--test",
            "http",
        ])
        .stdout()
        .await?;

    let totals = Totals::from_output(&output);
    Ok(format!(
        "[test] {} suites: {} passed, {} failed, {} ignored.\n{output}",
        totals.suites, totals.passed, totals.failed, totals.ignored
    ))
}

/// Sums of every `test result:` line cargo prints.
#[derive(Debug, Default, PartialEq, Eq)]
struct Totals {
    suites: usize,
    passed: usize,
    failed: usize,
    ignored: usize,
}

impl Totals {
    fn from_output(output: &str) -> Self {
        let mut totals = Self::default();
        for line in output.lines() {
            let Some(rest) = line.trim().strip_prefix("test result: ") else {
                continue;
            };
            totals.suites += 1;
            // "ok. 12 passed; 0 failed; 1 ignored; 0 measured; ..."
            let counts = rest.split_once(". ").map_or(rest, |(_, counts)| counts);
            for part in counts.split(';') {
                let mut words = part.split_whitespace();
                let (Some(count), Some(label)) = (words.next(), words.next()) else {
                    continue;
                };
                let Ok(count) = count.parse::<usize>() else {
                    continue;
                };
                match label {
                    "passed" => totals.passed += count,
                    "failed" => totals.failed += count,
                    "ignored" => totals.ignored += count,
                    _ => {}
                }
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_add_up_across_suites() {
        let output = "\
running 40 tests
test result: ok. 39 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 0.21s

running 18 tests
test result: ok. 18 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.40s
";
        assert_eq!(
            Totals::from_output(output),
            Totals {
                suites: 2,
                passed: 57,
                failed: 0,
                ignored: 1,
            }
        );
    }

    #[test]
    fn output_without_results_counts_nothing() {
        assert_eq!(Totals::from_output("error: could not compile"), Totals::default());
    }
}
