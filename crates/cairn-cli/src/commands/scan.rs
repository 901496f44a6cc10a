//! `cairn scan`: list the resources found under each location.

use cairn_resource::ResourceSet;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use super::discover;
use crate::config::{ScanArgs, StorageConfig, parse_locations};

/// Prints the absolute path of every discovered resource, one per line.
pub async fn scan(config: &StorageConfig, args: &ScanArgs) -> anyhow::Result<()> {
    let locations = parse_locations(&args.locations)?;
    let resources = discover(config, |provider| config.backend(provider), &locations).await;

    let mut stdout = BufWriter::new(tokio::io::stdout());
    write_listing(&resources, args.long, &mut stdout).await
}

async fn write_listing<W>(resources: &ResourceSet, long: bool, out: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for resource in resources {
        let line = match (long, resource.size()) {
            (true, Some(size)) => format!("{size:>12}  {resource}\n"),
            (true, None) => format!("{:>12}  {resource}\n", "-"),
            (false, _) => format!("{resource}\n"),
        };
        out.write_all(line.as_bytes()).await?;
    }
    out.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{discover_in, seeded};

    #[tokio::test]
    async fn lists_one_path_per_line() {
        let connector = seeded(&[("sql/V2__b.sql", b"--"), ("sql/V1__a.sql", b"--")]).await;
        let resources = discover_in(&connector, &["bucket/sql"]).await;

        let mut out = Vec::new();
        write_listing(&resources, false, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "bucket/sql/V1__a.sql\nbucket/sql/V2__b.sql\n"
        );
    }

    #[tokio::test]
    async fn long_listing_prefixes_sizes() {
        let connector = seeded(&[("sql/V1__a.sql", b"select 1;")]).await;
        let resources = discover_in(&connector, &["bucket/sql"]).await;

        let mut out = Vec::new();
        write_listing(&resources, true, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "           9  bucket/sql/V1__a.sql\n"
        );
    }
}
