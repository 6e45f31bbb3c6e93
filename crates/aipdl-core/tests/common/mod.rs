#![allow(dead_code)]

pub mod http_server;
pub mod pdf;
pub mod stub_fetcher;

use aipdl_core::config::{AipdlConfig, RetryConfig};
use aipdl_core::model::{Airport, DocumentInfo, UnitDescriptor, ValidityWindow};
use chrono::{Duration, Utc};
use std::path::Path;

pub const BASE_URL: &str = "http://stub.invalid/eAIP/";

/// Edition that started yesterday, so files written now are inside it.
pub fn current_document() -> DocumentInfo {
    let now = Utc::now();
    DocumentInfo {
        country_code: "JP".to_string(),
        base_url: BASE_URL.to_string(),
        window: ValidityWindow::new(now - Duration::days(1), now + Duration::days(27)),
    }
}

pub fn test_config(root: &Path) -> AipdlConfig {
    AipdlConfig {
        root_dir: root.to_path_buf(),
        max_workers: 2,
        queue_capacity: 2,
        max_concurrent_airports: 2,
        retry: Some(RetryConfig {
            max_attempts: 1,
            base_delay_secs: 0.0,
            max_delay_secs: 0,
        }),
        ..AipdlConfig::default()
    }
}

/// RJAA: one text unit and two charts (the second chart has two pages).
pub fn rjaa() -> Airport {
    let mut apt = Airport::new("RJAA", "NARITA INTL");
    apt.push_unit(UnitDescriptor::text("RJAA", "pdf/RJAA-AD2.pdf"));
    apt.push_unit(UnitDescriptor::chart("RJAA", "pdf/RJAA-ADC.pdf"));
    apt.push_unit(UnitDescriptor::chart("RJAA", "pdf/RJAA-SID.pdf"));
    apt
}

pub fn rjtt() -> Airport {
    let mut apt = Airport::new("RJTT", "TOKYO INTL");
    apt.push_unit(UnitDescriptor::text("RJTT", "pdf/RJTT-AD2.pdf"));
    apt.push_unit(UnitDescriptor::chart("RJTT", "pdf/RJTT-ADC.pdf"));
    apt
}

/// Stub fetcher serving every unit of `rjaa()` and `rjtt()`.
pub fn stub_with_airports() -> stub_fetcher::StubFetcher {
    let stub = stub_fetcher::StubFetcher::new();
    stub.serve("RJAA-AD2.pdf", pdf::stub_pdf(&["RJAA TEXT"]));
    stub.serve("RJAA-ADC.pdf", pdf::stub_pdf(&["RJAA ADC"]));
    stub.serve("RJAA-SID.pdf", pdf::stub_pdf(&["RJAA SID 1", "RJAA SID 2"]));
    stub.serve("RJTT-AD2.pdf", pdf::stub_pdf(&["RJTT TEXT"]));
    stub.serve("RJTT-ADC.pdf", pdf::stub_pdf(&["RJTT ADC"]));
    stub
}
