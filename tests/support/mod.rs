//! Shared helpers for integration tests: a recording logger and service builders
//! pointed at a wiremock server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use figma_fetch::{FigmaConfig, FigmaService, Logger, PassthroughSimplifier};
use wiremock::MockServer;

/// Token used by every test service.
pub const TEST_TOKEN: &str = "figd_test_token_123";

/// Logger that keeps every line for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("logger lock").clone()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.lines
            .lock()
            .expect("logger lock")
            .push(message.to_string());
    }
}

/// Config pointed at the mock server's `/v1`.
pub fn test_config(server: &MockServer) -> FigmaConfig {
    FigmaConfig::new(TEST_TOKEN).with_base_url(format!("{}/v1", server.uri()))
}

/// Service with a recording logger and the passthrough simplifier.
pub fn test_service(server: &MockServer) -> (FigmaService, Arc<RecordingLogger>) {
    service_with_config(test_config(server))
}

/// Service built from an explicit config.
pub fn service_with_config(config: FigmaConfig) -> (FigmaService, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let service = FigmaService::with_parts(config, logger.clone(), PassthroughSimplifier)
        .expect("service should build");
    (service, logger)
}
