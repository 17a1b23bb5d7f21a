use std::sync::{Arc, Mutex};

use insider_screener::notify::NotifyFuture;
use insider_screener::{
    Company, IsClient, Notifier, RunSummary, Tracker, TrackerConfig, TransactionRecord,
};

/// Remembers every notification instead of delivering it.
#[derive(Default)]
pub struct Recorder {
    pub alerts: Mutex<Vec<(String, Vec<TransactionRecord>)>>,
    pub summaries: Mutex<Vec<usize>>,
}

impl Notifier for Recorder {
    fn notify_new_transactions<'a>(
        &'a self,
        company: &'a Company,
        _source_url: &'a str,
        transactions: &'a [TransactionRecord],
    ) -> NotifyFuture<'a> {
        Box::pin(async move {
            self.alerts
                .lock()
                .unwrap()
                .push((company.slug.clone(), transactions.to_vec()));
            Ok(())
        })
    }

    fn notify_summary<'a>(&'a self, summary: &'a RunSummary) -> NotifyFuture<'a> {
        Box::pin(async move {
            self.summaries
                .lock()
                .unwrap()
                .push(summary.total_new_transactions());
            Ok(())
        })
    }
}

pub fn tracker(
    client: IsClient,
    root: &std::path::Path,
    config: TrackerConfig,
) -> (Tracker, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let notifier: Arc<dyn Notifier> = recorder.clone();
    let tracker = Tracker::new(
        client,
        crate::common::open_store(root, 100),
        Some(notifier),
        config,
    );
    (tracker, recorder)
}
