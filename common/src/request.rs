//! 古いレスポンスの破棄
//!
//! 画面遷移が重なったとき、遅れて返ってきた前回の読み込み結果で
//! 新しい状態を上書きしないためのチケット。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// 最新のリクエストだけを有効とする
///
/// clone は同じカウンタを共有する
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいリクエストを開始（以前のチケットは無効になる）
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_clones_share_counter() {
        let tracker = RequestTracker::new();
        let view = tracker.clone();

        let ticket = tracker.begin();
        view.begin();
        assert!(!tracker.is_current(ticket));
    }
}
