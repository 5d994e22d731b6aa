//! Controller-level tests: the full filter → sort → paginate pipeline.

use super::*;
use crate::fetch::{DateWindow, FetchError, LoadState};
use crate::fields::{Catalog, FieldSpec, MatchKind};
use crate::pagenav::PageMarker;
use crate::record::{FieldValue, Record};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyModifiers};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
struct Invoice {
    code: String,
    customer: String,
    tax_id: String,
    amount: i64,
    issued: NaiveDateTime,
}

impl Record for Invoice {
    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.code.clone())),
            "customer" => Some(FieldValue::Text(self.customer.clone())),
            "tax_id" => Some(FieldValue::Text(self.tax_id.clone())),
            "amount" => Some(FieldValue::Integer(self.amount)),
            // Time of day is stripped at projection; range matching is
            // by calendar date.
            "issued" => Some(FieldValue::Date(self.issued.date())),
            _ => None,
        }
    }
}

fn invoice(i: usize) -> Invoice {
    let day = (i % 31) as u32 + 1;
    Invoice {
        code: format!("2024.{}", 10000 + i),
        customer: if i % 5 == 0 {
            "Acme Corp".to_string()
        } else {
            format!("Customer {:02}", i)
        },
        tax_id: format!("{:02}.345.678/0001-{:02}", i % 4, i % 100),
        amount: ((i % 5) as i64) * 1000,
        issued: NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap(),
    }
}

fn invoices(n: usize) -> Vec<Invoice> {
    (0..n).map(invoice).collect()
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        FieldSpec::new("code", "Code", MatchKind::NumericSubstring),
        FieldSpec::new("customer", "Customer", MatchKind::TextSubstring),
        FieldSpec::new("tax_id", "Tax ID", MatchKind::DocumentNumber),
        FieldSpec::new("issued", "Issued", MatchKind::DateRange),
    ])
}

fn window() -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

/// A table seeded with `n` rows whose source re-serves the same rows.
fn table(n: usize) -> Model<Invoice> {
    let rows = invoices(n);
    let source_rows = rows.clone();
    Model::new(
        vec![
            Column::new("code", "Code"),
            Column::new("customer", "Customer"),
            Column::new("amount", "Amount"),
            Column::new("issued", "Issued"),
        ],
        catalog(),
        Arc::new(move |_| Ok(source_rows.clone())),
        window(),
    )
    .with_title("Invoices")
    .with_debounce_delay(Duration::from_millis(1))
    .with_fetch_delay(Duration::from_millis(1))
    .with_records(rows)
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }) as Msg
}

fn press(t: &mut Model<Invoice>, code: KeyCode) -> Option<Cmd> {
    t.update(&key(code))
}

/// Runs a command to completion and feeds its message back, as the
/// runtime would.
async fn deliver(t: &mut Model<Invoice>, cmd: Cmd) {
    let msg = cmd.await.expect("command produced no message");
    t.update(&msg);
}

#[test]
fn test_starts_unfiltered_in_dataset_order() {
    let t = table(50);
    assert_eq!(t.total_filtered_count(), 50);
    assert_eq!(t.total_count(), 50);
    assert_eq!(t.current_page(), 1);
    assert_eq!(t.page_count(), 5);
    assert_eq!(t.visible_rows()[0].code, "2024.10000");
    assert_eq!(t.input_mode(), InputMode::Browsing);
}

#[tokio::test]
async fn test_numeric_code_filter_strips_punctuation() {
    let mut t = table(50);
    let cmd = t.set_filter_value("1000").expect("debounce scheduled");
    deliver(&mut t, cmd).await;

    // Codes "2024.10000" through "2024.10009" contain the digit run.
    assert_eq!(t.total_filtered_count(), 10);
    assert!(t
        .visible_rows()
        .iter()
        .all(|r| r.code.replace('.', "").contains("1000")));
    assert_eq!(t.current_page(), 1);
}

#[test]
fn test_date_range_includes_end_of_day_timestamp() {
    let mut t = table(50);
    t.set_filter_field("issued");
    t.set_filter_range(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 31),
    );
    // Every row is stamped 23:59:59 and every issue day is in January,
    // including the ones on the end bound itself.
    assert_eq!(t.total_filtered_count(), 50);

    t.set_filter_range(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 30),
    );
    // Day-31 rows sit one day past the end bound now.
    assert!(t.total_filtered_count() < 50);
    assert!(t
        .visible_rows()
        .iter()
        .all(|r| r.issued.date().day() <= 30));
}

#[test]
fn test_page_count_and_out_of_range_page_clamp() {
    let mut t = table(13);
    t.set_page_size(6);
    assert_eq!(t.page_count(), 3);

    t.set_page(5);
    assert_eq!(t.current_page(), 3);
    assert_eq!(t.visible_rows().len(), 1);
}

#[tokio::test]
async fn test_field_switch_reverts_pending_query() {
    let mut t = table(50);
    t.set_filter_field("customer");
    let stale = t.set_filter_value("acme").expect("debounce scheduled");

    // Before the quiet period elapses the user switches to the range
    // field: the table reverts to the full dataset immediately.
    t.set_filter_field("issued");
    assert_eq!(t.total_filtered_count(), 50);
    assert_eq!(t.input_mode(), InputMode::EditingRange);

    // The superseded timer fires anyway and must change nothing.
    deliver(&mut t, stale).await;
    assert_eq!(t.total_filtered_count(), 50);
    assert_eq!(t.criterion().raw_value(), "");
}

#[test]
fn test_page_sequence_render_contract() {
    let mut t = table(200);
    t.set_page(10);
    assert_eq!(
        t.page_sequence(),
        vec![
            PageMarker::Number(1),
            PageMarker::Ellipsis,
            PageMarker::Number(9),
            PageMarker::Number(10),
            PageMarker::Number(11),
            PageMarker::Ellipsis,
            PageMarker::Number(20),
        ]
    );
}

#[tokio::test]
async fn test_keystroke_burst_evaluates_once() {
    let mut t = table(50);
    t.set_filter_field("customer");
    press(&mut t, KeyCode::Char('/'));
    assert_eq!(t.input_mode(), InputMode::EditingQuery);

    let mut cmds = Vec::new();
    for c in ['a', 'c', 'm', 'e'] {
        cmds.push(press(&mut t, KeyCode::Char(c)).expect("debounce scheduled"));
    }
    let last = cmds.pop().unwrap();

    // The first three timers are superseded; replaying them does not
    // evaluate anything.
    for stale in cmds {
        deliver(&mut t, stale).await;
        assert_eq!(t.criterion().raw_value(), "");
        assert_eq!(t.total_filtered_count(), 50);
    }

    // The final timer carries the whole word.
    deliver(&mut t, last).await;
    assert_eq!(t.criterion().raw_value(), "acme");
    assert_eq!(t.total_filtered_count(), 10);
}

#[tokio::test]
async fn test_clearing_query_evaluates_immediately() {
    let mut t = table(50);
    t.set_filter_field("customer");
    let cmd = t.set_filter_value("acme").expect("debounce scheduled");
    deliver(&mut t, cmd).await;
    assert_eq!(t.total_filtered_count(), 10);

    // No command, no quiet period: the full dataset is back at once.
    assert!(t.set_filter_value("").is_none());
    assert_eq!(t.total_filtered_count(), 50);
}

#[tokio::test]
async fn test_refetch_preserves_criterion() {
    let mut t = table(50);
    t.set_filter_field("customer");
    let cmd = t.set_filter_value("acme").expect("debounce scheduled");
    deliver(&mut t, cmd).await;
    assert_eq!(t.total_filtered_count(), 10);

    let fetch_cmd = t.refetch(window());
    assert!(t.is_loading());
    deliver(&mut t, fetch_cmd).await;

    assert!(!t.is_loading());
    assert_eq!(t.criterion().raw_value(), "acme");
    assert_eq!(t.total_filtered_count(), 10);
}

#[tokio::test]
async fn test_stale_fetch_result_is_dropped() {
    let mut t = table(5);
    let first = t.refetch(window());
    let second = t.refetch(window());

    // The superseded request resolves first; its payload must not land.
    deliver(&mut t, first).await;
    assert!(t.is_loading());
    assert_eq!(t.total_count(), 5);

    deliver(&mut t, second).await;
    assert!(!t.is_loading());
    assert_eq!(t.total_count(), 5);
}

#[tokio::test]
async fn test_fetch_failure_keeps_last_known_good_dataset() {
    let rows = invoices(8);
    let mut t = Model::new(
        vec![Column::new("code", "Code")],
        catalog(),
        Arc::new(|_| Err(FetchError::Unavailable("connection refused".into()))),
        window(),
    )
    .with_fetch_delay(Duration::from_millis(1))
    .with_records(rows);

    let cmd = t.refetch(window());
    deliver(&mut t, cmd).await;

    assert!(matches!(t.load_state(), LoadState::Failed(_)));
    assert!(!t.is_loading());
    assert_eq!(t.total_count(), 8);
    assert!(t.view().contains("Could not refresh data"));
}

#[test]
fn test_loading_blocks_pagination_and_sorting() {
    let mut t = table(50);
    let _cmd = t.refetch(window());
    assert!(t.is_loading());

    t.set_page(3);
    assert_eq!(t.current_page(), 1);
    t.set_page_size(25);
    assert_eq!(t.page_size(), 10);
    t.toggle_sort("amount");
    assert_eq!(t.sort_state(), None);
    press(&mut t, KeyCode::Right);
    assert_eq!(t.current_page(), 1);

    assert!(t.view().contains("Loading"));
}

#[test]
fn test_sort_is_stable_and_keeps_page() {
    let mut t = table(50);
    t.set_page(2);
    t.toggle_sort("amount");

    assert_eq!(t.current_page(), 2);
    assert_eq!(
        t.sort_state(),
        Some(SortState {
            column: "amount",
            direction: SortDirection::Ascending,
        })
    );

    // Amounts cycle i%5 * 1000, so the first page is all zeroes; equal
    // keys keep dataset order.
    t.set_page(1);
    let first_page: Vec<&Invoice> = t.visible_rows();
    assert!(first_page.iter().all(|r| r.amount == 0));
    assert_eq!(first_page[0].code, "2024.10000");
    assert_eq!(first_page[1].code, "2024.10005");

    // Toggling reverses direction without touching the page.
    t.set_page(3);
    t.toggle_sort("amount");
    assert_eq!(
        t.sort_state(),
        Some(SortState {
            column: "amount",
            direction: SortDirection::Descending,
        })
    );
    assert_eq!(t.current_page(), 3);

    t.set_page(1);
    assert!(t.visible_rows().iter().all(|r| r.amount == 4000));
}

#[test]
fn test_page_size_change_clamps_only_when_out_of_range() {
    let mut t = table(50);

    // In range: page 2 of 5 survives a growth to 25 rows per page.
    t.set_page(2);
    t.set_page_size(25);
    assert_eq!(t.page_count(), 2);
    assert_eq!(t.current_page(), 2);

    // Out of range: the last page pulls back to the new last page.
    t.set_page_size(10);
    t.set_page(5);
    t.set_page_size(25);
    assert_eq!(t.current_page(), 2);
    assert!(!t.visible_rows().is_empty());
}

#[tokio::test]
async fn test_clear_filter_restores_mount_state() {
    let mut t = table(50);
    t.set_filter_field("customer");
    let cmd = t.set_filter_value("acme").expect("debounce scheduled");
    deliver(&mut t, cmd).await;
    t.set_page(2);

    t.clear_filter();
    assert_eq!(t.total_filtered_count(), 50);
    assert_eq!(t.current_page(), 1);
    assert_eq!(t.criterion().field().key, "code");
    assert_eq!(t.criterion().raw_value(), "");
    assert_eq!(t.input_mode(), InputMode::Browsing);
}

#[test]
fn test_range_editing_flow_through_keys() {
    let mut t = table(50);

    // Cycle code → customer → tax id → issued; the range field opens its
    // editor as part of the switch.
    press(&mut t, KeyCode::Tab);
    press(&mut t, KeyCode::Tab);
    press(&mut t, KeyCode::Tab);
    assert_eq!(t.criterion().field().key, "issued");
    assert_eq!(t.input_mode(), InputMode::EditingRange);

    for c in "01/01/2024".chars() {
        press(&mut t, KeyCode::Char(c));
    }
    // Bound edits alone never evaluate.
    assert_eq!(t.total_filtered_count(), 50);

    press(&mut t, KeyCode::Tab);
    for c in "15/01/2024".chars() {
        press(&mut t, KeyCode::Char(c));
    }
    press(&mut t, KeyCode::Enter);

    // Days 1–15 of January over i % 31 + 1: thirty rows.
    assert_eq!(t.total_filtered_count(), 30);
    assert_eq!(t.current_page(), 1);
    assert_eq!(t.input_mode(), InputMode::Browsing);
}

#[test]
fn test_clear_range_evaluates_immediately() {
    let mut t = table(50);
    t.set_filter_field("issued");
    t.set_filter_range(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 5),
    );
    assert!(t.total_filtered_count() < 50);

    press(&mut t, KeyCode::Char('u'));
    // Plain 'u' is a date character candidate, not the clear chord.
    let ctrl_u = Box::new(KeyMsg {
        key: KeyCode::Char('u'),
        modifiers: KeyModifiers::CONTROL,
    }) as Msg;
    t.update(&ctrl_u);
    assert_eq!(t.total_filtered_count(), 50);
}

#[test]
fn test_navigation_keys_and_page_size_cycle() {
    let mut t = table(50);

    press(&mut t, KeyCode::Right);
    assert_eq!(t.current_page(), 2);
    press(&mut t, KeyCode::End);
    assert_eq!(t.current_page(), 5);
    press(&mut t, KeyCode::Right);
    assert_eq!(t.current_page(), 5);
    press(&mut t, KeyCode::Home);
    assert_eq!(t.current_page(), 1);
    press(&mut t, KeyCode::Left);
    assert_eq!(t.current_page(), 1);

    press(&mut t, KeyCode::Char('p'));
    assert_eq!(t.page_size(), 25);
    press(&mut t, KeyCode::Char('p'));
    assert_eq!(t.page_size(), 50);
}

#[test]
fn test_sort_key_cycles_columns_and_directions() {
    let mut t = table(20);

    press(&mut t, KeyCode::Char('s'));
    assert_eq!(
        t.sort_state(),
        Some(SortState {
            column: "code",
            direction: SortDirection::Ascending,
        })
    );
    press(&mut t, KeyCode::Char('s'));
    assert_eq!(
        t.sort_state(),
        Some(SortState {
            column: "code",
            direction: SortDirection::Descending,
        })
    );
    press(&mut t, KeyCode::Char('s'));
    assert_eq!(
        t.sort_state(),
        Some(SortState {
            column: "customer",
            direction: SortDirection::Ascending,
        })
    );

    // Six more advances exhaust customer, amount, and issued, landing on
    // unsorted again.
    for _ in 0..6 {
        press(&mut t, KeyCode::Char('s'));
    }
    assert_eq!(t.sort_state(), None);
}

#[test]
fn test_view_renders_rows_counts_and_pages() {
    let mut t = table(50);
    t.set_page_size(6);
    let view = t.view();

    assert!(view.contains("Invoices"));
    assert!(view.contains("2024.10000"));
    assert!(view.contains("50 of 50 records"));
    assert!(!t.page_sequence().is_empty());
}

#[test]
fn test_view_omits_page_control_for_single_page() {
    let t = table(3);
    assert!(t.page_sequence().is_empty());
}

#[tokio::test]
async fn test_programmatic_unmount_cancels_pending_evaluation() {
    let mut t = table(50);
    t.set_filter_field("customer");
    let stale = t.set_filter_value("acme").expect("debounce scheduled");
    t.cancel_pending();

    deliver(&mut t, stale).await;
    assert_eq!(t.total_filtered_count(), 50);
    assert_eq!(t.criterion().raw_value(), "");
}
