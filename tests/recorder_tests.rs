//! View recorder integration tests
//!
//! 使用内存存储和手动时钟覆盖去重窗口的边界行为。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use bioview::analytics::{DeviceType, ManualClock, RecordOutcome, ViewMetadata, ViewRecorder};
use bioview::config::{AnalyticsConfig, MAX_DEDUP_WINDOW_SECS};
use bioview::errors::{BioviewError, Result};
use bioview::storage::{EventStore, MemoryEventStore, Page, ViewEvent};

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0";
const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) Mobile/15E148";

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

fn setup() -> (Arc<MemoryEventStore>, Arc<ManualClock>, ViewRecorder) {
    let store = Arc::new(MemoryEventStore::new());
    let clock = Arc::new(ManualClock::new(start_time()));
    let recorder = ViewRecorder::with_clock(store.clone(), clock.clone(), Duration::minutes(5));
    (store, clock, recorder)
}

fn ua(user_agent: &str) -> ViewMetadata {
    ViewMetadata::new().with_user_agent(user_agent)
}

async fn views_of(store: &MemoryEventStore, owner_id: i64) -> i64 {
    store
        .find_page_by_owner(owner_id)
        .await
        .unwrap()
        .map(|p| p.views)
        .unwrap_or_default()
}

#[tokio::test]
async fn test_duplicate_within_window_counts_once() {
    let (store, clock, recorder) = setup();
    let page = store.create_page(1).await.unwrap();

    let first = recorder.record_view(1, &ua(DESKTOP_UA)).await;
    clock.advance(Duration::minutes(4));
    let second = recorder.record_view(1, &ua(DESKTOP_UA)).await;

    assert_eq!(first, RecordOutcome::Recorded(DeviceType::Desktop));
    assert_eq!(second, RecordOutcome::Duplicate(DeviceType::Desktop));
    assert_eq!(store.events_for_page(page.id).len(), 1);
    assert_eq!(views_of(&store, 1).await, 1);
}

#[tokio::test]
async fn test_views_outside_window_both_count() {
    let (store, clock, recorder) = setup();
    let page = store.create_page(1).await.unwrap();

    recorder.record_view(1, &ua(DESKTOP_UA)).await;
    clock.advance(Duration::minutes(5) + Duration::seconds(1));
    let second = recorder.record_view(1, &ua(DESKTOP_UA)).await;

    assert!(second.is_counted());
    assert_eq!(store.events_for_page(page.id).len(), 2);
    assert_eq!(views_of(&store, 1).await, 2);
}

#[tokio::test]
async fn test_window_boundary_is_inclusive() {
    let (store, clock, recorder) = setup();
    store.create_page(1).await.unwrap();

    recorder.record_view(1, &ua(DESKTOP_UA)).await;
    // 恰好 5 分钟：上一条 created_at == windowStart，仍然算重复
    clock.advance(Duration::minutes(5));
    let outcome = recorder.record_view(1, &ua(DESKTOP_UA)).await;

    assert_eq!(outcome, RecordOutcome::Duplicate(DeviceType::Desktop));
    assert_eq!(views_of(&store, 1).await, 1);
}

#[tokio::test]
async fn test_dedup_is_per_device() {
    let (store, clock, recorder) = setup();
    let page = store.create_page(1).await.unwrap();

    let desktop = recorder.record_view(1, &ua(DESKTOP_UA)).await;
    clock.advance(Duration::seconds(30));
    let mobile = recorder.record_view(1, &ua(IPHONE_UA)).await;
    let tablet = recorder.record_view(1, &ua(IPAD_UA)).await;

    assert_eq!(desktop, RecordOutcome::Recorded(DeviceType::Desktop));
    assert_eq!(mobile, RecordOutcome::Recorded(DeviceType::Mobile));
    assert_eq!(tablet, RecordOutcome::Recorded(DeviceType::Tablet));
    assert_eq!(store.events_for_page(page.id).len(), 3);
    assert_eq!(views_of(&store, 1).await, 3);
}

#[tokio::test]
async fn test_dedup_is_per_page() {
    let (store, _clock, recorder) = setup();
    store.create_page(1).await.unwrap();
    store.create_page(2).await.unwrap();

    assert!(recorder.record_view(1, &ua(DESKTOP_UA)).await.is_counted());
    assert!(recorder.record_view(2, &ua(DESKTOP_UA)).await.is_counted());
    assert_eq!(views_of(&store, 1).await, 1);
    assert_eq!(views_of(&store, 2).await, 1);
}

#[tokio::test]
async fn test_missing_user_agent_is_desktop() {
    let (store, _clock, recorder) = setup();
    let page = store.create_page(1).await.unwrap();

    let outcome = recorder.record_view(1, &ViewMetadata::new()).await;
    assert_eq!(outcome, RecordOutcome::Recorded(DeviceType::Desktop));
    assert_eq!(store.events_for_page(page.id)[0].device_type, "desktop");
}

#[tokio::test]
async fn test_missing_page_is_silent() {
    let (store, _clock, recorder) = setup();

    let outcome = recorder
        .record_view(404, &ua(DESKTOP_UA).with_referer("https://example.com"))
        .await;

    assert_eq!(outcome, RecordOutcome::PageMissing);
    assert!(!outcome.is_counted());
    assert_eq!(store.event_count(), 0);
}

#[tokio::test]
async fn test_mixed_device_scenario() {
    let (store, clock, recorder) = setup();
    let page = store.create_page(9).await.unwrap();

    // T: desktop
    recorder.record_view(9, &ua(DESKTOP_UA)).await;
    // T+1: mobile
    clock.set(start_time() + Duration::minutes(1));
    recorder.record_view(9, &ua(IPHONE_UA)).await;
    // T+2: desktop，窗口内重复
    clock.set(start_time() + Duration::minutes(2));
    let dup = recorder.record_view(9, &ua(DESKTOP_UA)).await;
    // T+10: desktop，窗口外
    clock.set(start_time() + Duration::minutes(10));
    recorder.record_view(9, &ua(DESKTOP_UA)).await;

    assert_eq!(dup, RecordOutcome::Duplicate(DeviceType::Desktop));

    let events = store.events_for_page(page.id);
    let desktop = events.iter().filter(|e| e.device_type == "desktop").count();
    let mobile = events.iter().filter(|e| e.device_type == "mobile").count();
    assert_eq!(desktop, 2);
    assert_eq!(mobile, 1);
    assert_eq!(views_of(&store, 9).await, 3);
}

#[tokio::test]
async fn test_accepted_event_is_stamped_with_clock_time() {
    let (store, clock, recorder) = setup();
    let page = store.create_page(1).await.unwrap();
    clock.set(start_time() + Duration::hours(3));

    recorder.record_view(1, &ua(DESKTOP_UA)).await;

    let events = store.events_for_page(page.id);
    assert_eq!(events[0].created_at, start_time() + Duration::hours(3));
    let page = store.find_page_by_owner(1).await.unwrap().unwrap();
    assert_eq!(page.updated_at, start_time() + Duration::hours(3));
}

#[tokio::test]
async fn test_spawn_record_runs_in_background() {
    let (store, _clock, recorder) = setup();
    store.create_page(5).await.unwrap();

    let handle = recorder.spawn_record(5, ua(IPHONE_UA));
    let outcome = handle.await.unwrap();

    assert_eq!(outcome, RecordOutcome::Recorded(DeviceType::Mobile));
    assert_eq!(views_of(&store, 5).await, 1);
}

#[tokio::test]
async fn test_full_metadata_is_accepted() {
    let (store, _clock, recorder) = setup();
    let page = store.create_page(3).await.unwrap();

    let metadata = ua(IPAD_UA)
        .with_referer("https://social.example/post/1")
        .with_country("DE");
    assert_eq!(metadata.country.as_deref(), Some("DE"));

    let outcome = recorder.record_view(3, &metadata).await;
    assert_eq!(outcome, RecordOutcome::Recorded(DeviceType::Tablet));
    assert_eq!(store.events_for_page(page.id)[0].device_type, "tablet");
}

// =============================================================================
// 窗口配置
// =============================================================================

#[test]
fn test_new_rejects_out_of_range_window() {
    let store = Arc::new(MemoryEventStore::new());

    for secs in [0, MAX_DEDUP_WINDOW_SECS + 1, u64::MAX] {
        let config = AnalyticsConfig {
            dedup_window_secs: secs,
            ..AnalyticsConfig::default()
        };
        let err = ViewRecorder::new(store.clone(), &config).err().unwrap();
        assert!(matches!(err, BioviewError::Validation(_)), "window {secs}s");
    }

    assert!(ViewRecorder::new(store, &AnalyticsConfig::default()).is_ok());
}

#[tokio::test]
async fn test_unrepresentable_window_start_fails_without_panic() {
    let store = Arc::new(MemoryEventStore::new());
    let page = store.create_page(1).await.unwrap();
    let clock = Arc::new(ManualClock::new(start_time()));
    // 窗口起点早于可表示的最小日期
    let recorder =
        ViewRecorder::with_clock(store.clone(), clock, Duration::days(1_000_000_000));

    let outcome = recorder.record_view(1, &ua(DESKTOP_UA)).await;

    assert_eq!(outcome, RecordOutcome::Failed);
    assert!(store.events_for_page(page.id).is_empty());
    assert_eq!(views_of(&store, 1).await, 0);
}

// =============================================================================
// 存储故障
// =============================================================================

/// 页面存在，但所有写入都失败
struct FailingStore {
    page: Page,
}

#[async_trait]
impl EventStore for FailingStore {
    fn backend_name(&self) -> &str {
        "failing"
    }

    async fn find_page_by_owner(&self, owner_id: i64) -> Result<Option<Page>> {
        Ok((owner_id == self.page.owner_id).then(|| self.page.clone()))
    }

    async fn create_page(&self, _owner_id: i64) -> Result<Page> {
        Err(BioviewError::database_operation("read-only"))
    }

    async fn insert_view_event(
        &self,
        _page_id: i64,
        _device: DeviceType,
        _timestamp: DateTime<Utc>,
    ) -> Result<ViewEvent> {
        Err(BioviewError::database_operation("database is locked"))
    }

    async fn find_most_recent_event(
        &self,
        _page_id: i64,
        _device: DeviceType,
        _min_timestamp: DateTime<Utc>,
    ) -> Result<Option<ViewEvent>> {
        Ok(None)
    }

    async fn increment_page_view_counter(
        &self,
        _page_id: i64,
        _timestamp: DateTime<Utc>,
    ) -> Result<()> {
        Err(BioviewError::database_operation("database is locked"))
    }

    async fn find_events_in_range(
        &self,
        _page_id: i64,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<ViewEvent>> {
        Err(BioviewError::database_connection("connection refused"))
    }

    async fn count_events_in_range(
        &self,
        _page_id: i64,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<u64> {
        Err(BioviewError::database_connection("connection refused"))
    }
}

#[tokio::test]
async fn test_store_failure_is_swallowed() {
    let store = Arc::new(FailingStore {
        page: Page {
            id: 1,
            owner_id: 1,
            views: 0,
            updated_at: start_time(),
        },
    });
    let clock = Arc::new(ManualClock::new(start_time()));
    let recorder = ViewRecorder::with_clock(store, clock, Duration::minutes(5));

    let outcome = recorder.record_view(1, &ua(DESKTOP_UA)).await;
    assert_eq!(outcome, RecordOutcome::Failed);

    let spawned = recorder.spawn_record(1, ua(DESKTOP_UA)).await.unwrap();
    assert_eq!(spawned, RecordOutcome::Failed);
}
