use dagger_sdk::{Directory, Query};

use crate::containers;

/// Audit the resolved dependency graph of the server and report how many
/// distinct crates it pulls in.
pub async fn run(client: &Query, source: Directory) -> eyre::Result<String> {
    let output = containers::rust_base(client, source)
        .with_exec(vec!["cargo", "install", "cargo-audit", "--locked"])
        .with_exec(vec!["cargo", "fetch"])
        .with_exec(vec!["cargo", "audit", "--deny", "unsound", "--deny", "yanked"])
        .with_exec(vec![
            "sh",
            "-c",
            "echo \"zisodb-server depends on $(cargo tree --package zisodb-server \
             --edges normal --prefix none | sort -u | wc -l) crates\"",
        ])
        .stdout()
        .await?;

    Ok(format!("[security] Audit passed.\n{output}"))
}
