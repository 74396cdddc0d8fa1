//! Snapshot capture orchestration.

use crate::driver::DeviceDriver;
use crate::model::{CategoryData, Snapshot};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// Options for multi-device capture.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Upper bound on concurrently captured devices.
    pub concurrency: usize,
    /// Per-device wall-clock budget. Vendor SDK calls can hang indefinitely,
    /// so every device capture runs under this deadline.
    pub device_timeout: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            device_timeout: Duration::from_secs(120),
        }
    }
}

/// Outcome of one device's capture within a multi-device run.
///
/// Category-level collection failures do not surface here; they are recorded
/// inline in the snapshot. Only whole-device conditions (timeout,
/// cancellation) prevent a snapshot from being produced.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// Capture completed; the snapshot may still carry per-category error
    /// markers.
    Captured(Snapshot),
    /// The device did not answer within the per-device budget.
    TimedOut { device: String, timeout: Duration },
    /// Cancellation was requested before this device's capture started.
    Cancelled { device: String },
}

impl CaptureOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Captured(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn device(&self) -> &str {
        match self {
            Self::Captured(snapshot) => &snapshot.device.hostname,
            Self::TimedOut { device, .. } | Self::Cancelled { device } => device,
        }
    }
}

/// Builds snapshots from driver capability calls.
///
/// Each category is collected independently: a failed capability call is
/// caught locally and recorded as that category's error marker rather than
/// aborting the capture. No vendor or transport logic lives here.
#[derive(Debug, Clone, Default)]
pub struct SnapshotEngine {
    options: CaptureOptions,
}

impl SnapshotEngine {
    pub fn new() -> Self {
        Self {
            options: CaptureOptions::default(),
        }
    }

    /// Set the multi-device concurrency bound.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.options.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-device capture timeout.
    pub fn with_device_timeout(mut self, timeout: Duration) -> Self {
        self.options.device_timeout = timeout;
        self
    }

    /// Capture a snapshot from a single device.
    ///
    /// Never fails as a whole: categories whose capability call errored are
    /// marked and left empty, and the caller can inspect
    /// [`Snapshot::failed_categories`].
    pub fn capture(&self, driver: &dyn DeviceDriver, label: &str) -> Snapshot {
        let identity = driver.identity().clone();
        tracing::info!(device = %identity.hostname, label, "capturing snapshot");

        let mut snapshot = Snapshot::new(identity, label);

        snapshot.bgp_neighbors = match driver.get_bgp_neighbors() {
            Ok(records) => CategoryData::collected(records),
            Err(err) => Self::mark_failed(&snapshot.device.hostname, "bgp_neighbors", &err),
        };
        snapshot.interfaces = match driver.get_interfaces() {
            Ok(records) => CategoryData::collected(records),
            Err(err) => Self::mark_failed(&snapshot.device.hostname, "interfaces", &err),
        };
        snapshot.routes = match driver.get_routing_table() {
            Ok(entries) => {
                CategoryData::collected(entries.into_iter().map(|r| (r.natural_key(), r)).collect())
            }
            Err(err) => Self::mark_failed(&snapshot.device.hostname, "routes", &err),
        };
        snapshot.lldp_neighbors = match driver.get_lldp_neighbors() {
            Ok(records) => CategoryData::collected(records),
            Err(err) => Self::mark_failed(&snapshot.device.hostname, "lldp_neighbors", &err),
        };
        snapshot.evpn_routes = match driver.get_evpn_routes() {
            Ok(entries) => {
                CategoryData::collected(entries.into_iter().map(|r| (r.natural_key(), r)).collect())
            }
            Err(err) => Self::mark_failed(&snapshot.device.hostname, "evpn_routes", &err),
        };

        snapshot.calculate_content_hash();

        if snapshot.is_partial() {
            tracing::warn!(
                device = %snapshot.device.hostname,
                failed = snapshot.failed_categories().len(),
                "snapshot captured with collection errors"
            );
        }
        snapshot
    }

    /// Capture snapshots from many devices concurrently.
    ///
    /// Runs one task per device on a bounded worker pool; outcomes come back
    /// in input order. One device timing out or being cancelled never blocks
    /// or cancels the others. Setting `cancel` stops new device captures from
    /// being issued; in-flight captures run to completion or timeout.
    pub fn capture_all(
        &self,
        drivers: &[Arc<dyn DeviceDriver>],
        label: &str,
        cancel: &AtomicBool,
    ) -> Vec<CaptureOutcome> {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.concurrency)
            .build();
        let pool = match pool {
            Ok(pool) => pool,
            Err(err) => {
                // Degenerate fallback: capture sequentially on this thread.
                tracing::warn!(error = %err, "worker pool unavailable, capturing sequentially");
                return drivers
                    .iter()
                    .map(|driver| self.capture_with_timeout(driver, label, cancel))
                    .collect();
            }
        };

        pool.install(|| {
            drivers
                .par_iter()
                .map(|driver| self.capture_with_timeout(driver, label, cancel))
                .collect()
        })
    }

    /// Run one device's capture under the per-device deadline.
    ///
    /// The capture runs on a detached thread; if the deadline expires the
    /// thread is abandoned (it finishes or hangs on its own) and a timeout
    /// outcome is reported so the rest of the fleet is not held up.
    fn capture_with_timeout(
        &self,
        driver: &Arc<dyn DeviceDriver>,
        label: &str,
        cancel: &AtomicBool,
    ) -> CaptureOutcome {
        let hostname = driver.identity().hostname.clone();
        if cancel.load(Ordering::SeqCst) {
            tracing::info!(device = %hostname, "capture cancelled before start");
            return CaptureOutcome::Cancelled { device: hostname };
        }

        let (tx, rx) = mpsc::channel();
        let engine = self.clone();
        let driver = Arc::clone(driver);
        let label = label.to_string();
        std::thread::spawn(move || {
            let snapshot = engine.capture(driver.as_ref(), &label);
            // Receiver may have given up on us after the deadline.
            let _ = tx.send(snapshot);
        });

        match rx.recv_timeout(self.options.device_timeout) {
            Ok(snapshot) => CaptureOutcome::Captured(snapshot),
            Err(_) => {
                tracing::warn!(
                    device = %hostname,
                    timeout_secs = self.options.device_timeout.as_secs(),
                    "device capture timed out"
                );
                CaptureOutcome::TimedOut {
                    device: hostname,
                    timeout: self.options.device_timeout,
                }
            }
        }
    }

    fn mark_failed<T>(
        device: &str,
        category: &str,
        err: &crate::error::FabricError,
    ) -> CategoryData<T> {
        tracing::warn!(device, category, error = %err, "category collection failed");
        CategoryData::failed(err.to_string())
    }
}
