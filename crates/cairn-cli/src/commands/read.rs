//! `cairn read`: print the decoded content of discovered resources.

use anyhow::Context;
use cairn_resource::{ResourceSet, TextResource};
use futures::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use super::{TRACING_TARGET, discover};
use crate::config::{ReadArgs, StorageConfig, parse_locations};

/// Streams every matching resource to stdout in path order.
///
/// The first fetch or decode failure aborts the command.
pub async fn read(config: &StorageConfig, args: &ReadArgs) -> anyhow::Result<()> {
    let locations = parse_locations(&args.locations)?;
    let resources = discover(config, |provider| config.backend(provider), &locations).await;

    let mut stdout = BufWriter::new(tokio::io::stdout());
    write_contents(&resources, args.name.as_deref(), args.quiet, &mut stdout).await
}

async fn write_contents<W>(
    resources: &ResourceSet,
    name: Option<&str>,
    quiet: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut matched = 0usize;

    for resource in resources {
        if name.is_some_and(|name| resource.filename() != name) {
            continue;
        }
        matched += 1;

        if !quiet {
            let header = format!("==> {} <==\n", resource.absolute_path());
            out.write_all(header.as_bytes()).await?;
        }

        let mut text = resource.read().await?;
        while let Some(chunk) = text.next().await {
            let chunk = chunk.with_context(|| format!("failed to read {resource}"))?;
            out.write_all(chunk.as_bytes()).await?;
        }
        out.flush().await?;
    }

    if matched == 0 {
        tracing::warn!(target: TRACING_TARGET, "no resources matched");
    }

    Ok(())
}
