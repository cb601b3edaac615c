use dagger_sdk::{Directory, Query};

use crate::containers;

/// Static gates: nothing here starts a database or runs a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Check,
    Fmt,
    Lint,
}

impl Gate {
    pub fn name(self) -> &'static str {
        match self {
            Gate::Check => "check",
            Gate::Fmt => "fmt",
            Gate::Lint => "lint",
        }
    }

    fn command(self) -> Vec<&'static str> {
        match self {
            // Tests and the pipeline binary must compile too.
            Gate::Check => vec!["cargo", "check", "--workspace", "--all-targets"],
            Gate::Fmt => vec!["cargo", "fmt", "--all", "--check"],
            Gate::Lint => vec![
                "cargo",
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ],
        }
    }

    /// Formatting needs no libpq and no build cache.
    fn needs_build_deps(self) -> bool {
        !matches!(self, Gate::Fmt)
    }
}

pub async fn run(client: &Query, source: Directory, gate: Gate) -> eyre::Result<String> {
    let container = if gate.needs_build_deps() {
        containers::rust_base(client, source)
    } else {
        containers::toolchain(client, source)
    };
    let output = container.with_exec(gate.command()).stdout().await?;

    Ok(format!("[{}] passed.\n{output}", gate.name()))
}

/// Run every gate concurrently; the first failure aborts the rest.
pub async fn run_all(client: &Query, source: Directory) -> eyre::Result<String> {
    let (check, fmt, lint) = tokio::try_join!(
        run(client, source.clone(), Gate::Check),
        run(client, source.clone(), Gate::Fmt),
        run(client, source, Gate::Lint),
    )?;
    Ok(format!("{check}\n{fmt}\n{lint}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_and_lint_cover_test_targets() {
        for gate in [Gate::Check, Gate::Lint] {
            assert!(gate.command().contains(&"--all-targets"), "{}", gate.name());
            assert!(gate.needs_build_deps());
        }
    }

    #[test]
    fn fmt_runs_without_build_deps() {
        assert_eq!(Gate::Fmt.command(), ["cargo", "fmt", "--all", "--check"]);
        assert!(!Gate::Fmt.needs_build_deps());
    }
}
