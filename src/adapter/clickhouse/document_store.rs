use crate::adapter::clickhouse::row::MovieRow;
use crate::domain::StoredMovie;
use crate::error::StoreError;
use crate::port::DocumentStore;
use clickhouse::Client;
use clickhouse::sql::Identifier;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const INSERTER_SEND_TIMEOUT: Duration = Duration::from_secs(10);
const INSERTER_END_TIMEOUT: Duration = Duration::from_secs(10);

// ReplacingMergeTree keeps the row with the highest version per movie_id once
// parts merge; reads use FINAL so a scan never sees superseded rows.
const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS ? (
    movie_id String,
    info String,
    version UInt64
) ENGINE = ReplacingMergeTree(version)
ORDER BY movie_id";

const SCAN_SQL: &str = "SELECT ?fields FROM ? FINAL";

pub struct ClickHouseDocumentStore {
    client: Client,
}

impl ClickHouseDocumentStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Backtick-quote a table name. `Client::inserter` splices the name into
/// `INSERT INTO` verbatim, unlike `Identifier` binds.
fn quoted_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('`');
    for c in name.chars() {
        match c {
            '\\' | '\'' | '`' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\t' => quoted.push_str("\\t"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('`');
    quoted
}

fn next_version() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

impl DocumentStore for ClickHouseDocumentStore {
    fn ensure_table(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            self.client
                .query(CREATE_TABLE_SQL)
                .bind(Identifier(&table))
                .execute()
                .await?;
            info!(table = %table, "Ensured ClickHouse movie table");
            Ok(())
        })
    }

    fn put_item(
        &self,
        table: &str,
        item: StoredMovie,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            let row = MovieRow::from_document(&item, next_version())?;
            let mut inserter = self
                .client
                .inserter::<MovieRow>(&quoted_identifier(&table))?
                .with_timeouts(Some(INSERTER_SEND_TIMEOUT), Some(INSERTER_END_TIMEOUT));
            inserter.write(&row)?;
            inserter.end().await?;
            debug!(table = %table, movie_id = %row.movie_id, "Upserted movie row");
            Ok(())
        })
    }

    fn scan(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StoredMovie>, StoreError>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            let rows = self
                .client
                .query(SCAN_SQL)
                .bind(Identifier(&table))
                .fetch_all::<MovieRow>()
                .await?;
            rows.into_iter().map(MovieRow::into_document).collect()
        })
    }
}
