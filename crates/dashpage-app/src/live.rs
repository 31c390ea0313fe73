//! Live timer synchronization
//!
//! One shared fast-tick scheduler serves every live consumer in the host.
//! This module computes the range this page wants pushed: the current time
//! range while a live dashboard is mounted, `None` otherwise so the
//! scheduler can wind down when the last live consumer leaves.

use dashpage_core::{DashboardModel, TimeRange};

use crate::services::TimeRangeService;

/// The live range the shared scheduler should run with for this page.
pub fn desired_live_range(
    dashboard: Option<&DashboardModel>,
    time: &dyn TimeRangeService,
) -> Option<TimeRange> {
    match dashboard {
        Some(dash) if dash.live_now => Some(time.current_range()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockTimeRangeService;

    fn time_service() -> MockTimeRangeService {
        let mut time = MockTimeRangeService::new();
        time.expect_current_range()
            .return_const(TimeRange::new("now-5m", "now"));
        time
    }

    #[test]
    fn test_live_dashboard_pushes_current_range() {
        let mut dash = DashboardModel::new("abc", "T");
        dash.live_now = true;
        let range = desired_live_range(Some(&dash), &time_service());
        assert_eq!(range, Some(TimeRange::new("now-5m", "now")));
    }

    #[test]
    fn test_non_live_dashboard_releases_the_timer() {
        let dash = DashboardModel::new("abc", "T");
        assert_eq!(desired_live_range(Some(&dash), &time_service()), None);
    }

    #[test]
    fn test_no_dashboard_releases_the_timer() {
        assert_eq!(desired_live_range(None, &time_service()), None);
    }
}
