//! Device capability detection.
//!
//! The select engine needs exactly one device fact: whether the device is
//! touch-capable, which is the default for the blur-on-select policy.
//! Detection runs lazily on first use and is cached process-wide. Hosts that
//! can observe capability changes (a tablet docking a keyboard, say) call
//! [`invalidate`] to force the next query to detect again.

use std::fmt;
use std::sync::{Arc, OnceLock};

use horizon_select_core::logging::targets;
use parking_lot::Mutex;

/// Facts about the device the widget runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    /// The primary input is touch.
    pub is_touch_device: bool,
}

impl DeviceCapabilities {
    /// Capabilities of a touch-first device.
    pub const TOUCH: Self = Self {
        is_touch_device: true,
    };
    /// Capabilities of a pointer-and-keyboard device.
    pub const POINTER: Self = Self {
        is_touch_device: false,
    };
}

/// Probes the running device.
pub trait DeviceDetector: Send + Sync {
    fn detect(&self) -> DeviceCapabilities;
}

/// A detector that always reports the same capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDeviceDetector(pub DeviceCapabilities);

impl DeviceDetector for StaticDeviceDetector {
    fn detect(&self) -> DeviceCapabilities {
        self.0
    }
}

/// A lazily populated, invalidatable capability cache.
pub struct DeviceCache {
    state: Mutex<CacheState>,
}

struct CacheState {
    detector: Arc<dyn DeviceDetector>,
    cached: Option<DeviceCapabilities>,
}

impl DeviceCache {
    /// Create a cache backed by `detector`. Nothing is detected yet.
    pub fn new(detector: Arc<dyn DeviceDetector>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                detector,
                cached: None,
            }),
        }
    }

    /// Cached capabilities, detecting them first if needed.
    pub fn capabilities(&self) -> DeviceCapabilities {
        let mut state = self.state.lock();
        if let Some(capabilities) = state.cached {
            return capabilities;
        }
        let capabilities = state.detector.detect();
        tracing::debug!(target: targets::DEVICE, ?capabilities, "device capabilities detected");
        state.cached = Some(capabilities);
        capabilities
    }

    /// Drop the cached result; the next query runs detection again.
    pub fn invalidate(&self) {
        self.state.lock().cached = None;
    }

    /// Swap the detector and drop the cached result.
    pub fn set_detector(&self, detector: Arc<dyn DeviceDetector>) {
        let mut state = self.state.lock();
        state.detector = detector;
        state.cached = None;
    }

    /// Whether a detection result is currently cached.
    pub fn is_cached(&self) -> bool {
        self.state.lock().cached.is_some()
    }
}

impl Default for DeviceCache {
    fn default() -> Self {
        Self::new(Arc::new(StaticDeviceDetector::default()))
    }
}

impl fmt::Debug for DeviceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCache")
            .field("cached", &self.state.lock().cached)
            .finish()
    }
}

static DEVICE_CACHE: OnceLock<DeviceCache> = OnceLock::new();

/// The process-wide cache. Starts with a detector reporting a non-touch device.
pub fn global() -> &'static DeviceCache {
    DEVICE_CACHE.get_or_init(DeviceCache::default)
}

/// Process-wide device capabilities.
pub fn capabilities() -> DeviceCapabilities {
    global().capabilities()
}

/// Install the detector the process-wide cache uses.
pub fn set_detector(detector: Arc<dyn DeviceDetector>) {
    global().set_detector(detector);
}

/// Force the process-wide cache to detect again on next use.
pub fn invalidate() {
    global().invalidate();
}
