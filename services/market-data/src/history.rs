//! Paginated instrument history
//!
//! The history collection is a JSON:API endpoint capped at 250 records per
//! page. Pages are requested newest-first and concatenated in the order
//! received, so the accumulated series stays sorted by session date
//! descending.
//!
//! Paging stops on the first short page (fewer records than the page
//! size), on an empty page, or on a failure. Only a failure of the very
//! first page is reported as an error; later failures truncate the series.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};
use types::history::{DateRange, HistoricalBar};
use types::ids::InstrumentId;

use crate::client::UpstreamClient;
use crate::config::UpstreamConfig;
use crate::error::AdapterError;
use crate::mapping::bars_from_page;

const HISTORY_ENDPOINT: &str = "instrument_history";

/// Fields requested from the collection
pub const HISTORY_FIELDS: &str = "symbol,created,openingPrice,coursCourant,highPrice,lowPrice,cumulTitresEchanges,cumulVolumeEchange,totalTrades,capitalisation,closingPrice";

/// Site path of the history collection.
pub fn history_path(locale: &str) -> String {
    format!("/api/proxy/{}/api/bourse_data/instrument_history", locale)
}

/// Query pairs for one page of an instrument's history.
pub fn history_query(
    instrument: &InstrumentId,
    range: &DateRange,
    offset: usize,
    limit: usize,
) -> Vec<(&'static str, String)> {
    vec![
        ("fields[instrument_history]", HISTORY_FIELDS.to_string()),
        ("sort[date-seance][path]", "created".to_string()),
        ("sort[date-seance][direction]", "DESC".to_string()),
        ("filter[published]", "1".to_string()),
        ("page[offset]", offset.to_string()),
        ("page[limit]", limit.to_string()),
        ("filter[filter-date-start-vh][condition][path]", "field_seance_date".to_string()),
        ("filter[filter-date-start-vh][condition][operator]", ">=".to_string()),
        ("filter[filter-date-start-vh][condition][value]", range.from_param()),
        ("filter[filter-date-end-vh][condition][path]", "field_seance_date".to_string()),
        ("filter[filter-date-end-vh][condition][operator]", "<=".to_string()),
        ("filter[filter-date-end-vh][condition][value]", range.to_param()),
        (
            "filter[filter-historique-instrument-emetteur][condition][path]",
            "symbol.meta.drupal_internal__target_id".to_string(),
        ),
        ("filter[filter-historique-instrument-emetteur][condition][operator]", "=".to_string()),
        (
            "filter[filter-historique-instrument-emetteur][condition][value]",
            instrument.to_string(),
        ),
    ]
}

/// Drive `fetch_page(offset)` until the series is exhausted.
///
/// `fetch_page` is called with offsets `0, page_size, 2 * page_size, ...`.
/// `delay` is slept between consecutive fetches, never before the first.
pub async fn collect_pages<F, Fut>(
    page_size: usize,
    delay: Duration,
    mut fetch_page: F,
) -> Result<Vec<HistoricalBar>, AdapterError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<HistoricalBar>, AdapterError>>,
{
    let page_size = page_size.max(1);
    let mut bars = Vec::new();
    let mut offset = 0;

    loop {
        let page = match fetch_page(offset).await {
            Ok(page) => page,
            Err(err) if offset == 0 => return Err(err),
            Err(err) => {
                warn!(offset, collected = bars.len(), error = %err, "History page failed, truncating series");
                break;
            }
        };

        let received = page.len();
        debug!(offset, received, "History page received");
        bars.extend(page);

        if received < page_size {
            break;
        }
        offset += page_size;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(bars)
}

/// Fetch one page of the collection.
pub async fn fetch_page(
    client: &UpstreamClient,
    config: &UpstreamConfig,
    instrument: &InstrumentId,
    range: &DateRange,
    offset: usize,
) -> Result<Vec<HistoricalBar>, AdapterError> {
    let query = history_query(instrument, range, offset, config.page_size);
    let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let url = client.url(&history_path(&config.locale), &pairs)?;

    let payload = client
        .get_json_api(HISTORY_ENDPOINT, url, config.data_timeout)
        .await?;
    bars_from_page(&payload).map_err(|reason| AdapterError::schema(HISTORY_ENDPOINT, reason))
}

/// Fetch the whole history of `instrument` over `range`.
pub async fn fetch_history(
    client: &UpstreamClient,
    config: &UpstreamConfig,
    instrument: &InstrumentId,
    range: &DateRange,
) -> Result<Vec<HistoricalBar>, AdapterError> {
    collect_pages(config.page_size, config.page_delay, |offset| {
        fetch_page(client, config, instrument, range, offset)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn bar(tag: usize) -> HistoricalBar {
        HistoricalBar {
            date: Some(format!("bar-{}", tag)),
            ..Default::default()
        }
    }

    fn page(start: usize, len: usize) -> Vec<HistoricalBar> {
        (start..start + len).map(bar).collect()
    }

    /// Canned pages keyed by offset; missing offsets fail with a status error.
    fn canned(
        pages: HashMap<usize, Vec<HistoricalBar>>,
        calls: Arc<Mutex<Vec<usize>>>,
    ) -> impl FnMut(usize) -> std::future::Ready<Result<Vec<HistoricalBar>, AdapterError>> {
        move |offset| {
            calls.lock().unwrap().push(offset);
            std::future::ready(pages.get(&offset).cloned().ok_or(AdapterError::Status {
                endpoint: "instrument_history",
                status: 500,
            }))
        }
    }

    #[test]
    fn test_history_query_pairs() {
        let range = DateRange::parse("2024-01-01", "2024-03-31").unwrap();
        let query = history_query(&InstrumentId::new("511"), &range, 500, 250);
        let find = |key: &str| query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());

        assert_eq!(find("page[offset]"), Some("500"));
        assert_eq!(find("page[limit]"), Some("250"));
        assert_eq!(find("sort[date-seance][direction]"), Some("DESC"));
        assert_eq!(find("filter[filter-date-start-vh][condition][value]"), Some("2024-01-01"));
        assert_eq!(find("filter[filter-date-end-vh][condition][value]"), Some("2024-03-31"));
        assert_eq!(
            find("filter[filter-historique-instrument-emetteur][condition][value]"),
            Some("511")
        );
    }

    #[tokio::test]
    async fn test_stops_on_short_page() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pages = HashMap::from([(0, page(0, 3)), (3, page(3, 3)), (6, page(6, 1))]);

        let bars = collect_pages(3, Duration::ZERO, canned(pages, calls.clone()))
            .await
            .unwrap();

        assert_eq!(bars, page(0, 7));
        assert_eq!(*calls.lock().unwrap(), vec![0, 3, 6]);
    }

    #[tokio::test]
    async fn test_full_last_page_needs_empty_follow_up() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pages = HashMap::from([(0, page(0, 2)), (2, Vec::new())]);

        let bars = collect_pages(2, Duration::ZERO, canned(pages, calls.clone()))
            .await
            .unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec![0, 2]);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_an_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let result = collect_pages(3, Duration::ZERO, canned(HashMap::new(), calls)).await;
        assert!(matches!(result, Err(AdapterError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_later_page_failure_truncates() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pages = HashMap::from([(0, page(0, 3))]);

        let bars = collect_pages(3, Duration::ZERO, canned(pages, calls.clone()))
            .await
            .unwrap();

        assert_eq!(bars, page(0, 3));
        assert_eq!(*calls.lock().unwrap(), vec![0, 3]);
    }

    #[tokio::test]
    async fn test_empty_first_page_is_empty_series() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pages = HashMap::from([(0, Vec::new())]);
        let bars = collect_pages(250, Duration::ZERO, canned(pages, calls)).await.unwrap();
        assert!(bars.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_pages_only() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pages = HashMap::from([(0, page(0, 2)), (2, page(2, 2)), (4, page(4, 1))]);
        let started = tokio::time::Instant::now();

        collect_pages(2, Duration::from_millis(300), canned(pages, calls))
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::from_millis(600));
    }

    proptest! {
        #[test]
        fn accumulation_preserves_order_and_stops_on_short_page(
            page_size in 1usize..8,
            full_pages in 0usize..5,
            tail in 0usize..8,
        ) {
            let tail = tail % page_size;
            let mut pages = HashMap::new();
            for n in 0..full_pages {
                pages.insert(n * page_size, page(n * page_size, page_size));
            }
            pages.insert(full_pages * page_size, page(full_pages * page_size, tail));

            let calls = Arc::new(Mutex::new(Vec::new()));
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let bars = runtime
                .block_on(collect_pages(page_size, Duration::ZERO, canned(pages, calls.clone())))
                .unwrap();

            prop_assert_eq!(bars, page(0, full_pages * page_size + tail));
            prop_assert_eq!(calls.lock().unwrap().len(), full_pages + 1);
        }
    }
}
