// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use sylva_core::platform::{FaultDisposition, HostEnvironment, HostFault, Location};
use sylva_infra::{HeadlessHost, ProcessHost};
use sylva_sdk::error_reporter::ALERT_BANNER;
use sylva_sdk::{Engine, EngineBuilder};

fn fault(n: usize) -> HostFault {
    HostFault::new(format!("TypeError: x is undefined ({n})"))
        .with_origin("game.js:10:4")
        .with_stack("at update (game.js:10:4)")
}

#[test]
fn alerts_are_capped_per_activation() {
    let host = HeadlessHost::default();
    let mut engine = Engine::builder(host.clone()).build();

    engine.set_alert_global_error(true);
    assert!(engine.alert_global_error());
    for n in 0..7 {
        assert_eq!(host.raise_fault(fault(n)), FaultDisposition::Intercepted);
    }
    assert_eq!(host.alerts().len(), 5);

    engine.set_alert_global_error(false);
    engine.set_alert_global_error(true);
    host.raise_fault(fault(7));
    host.raise_fault(fault(8));

    let alerts = host.alerts();
    assert_eq!(alerts.len(), 7);
    assert!(alerts[6].starts_with(ALERT_BANNER));
    assert!(alerts[6].contains("(8)"));
    assert!(alerts[6].ends_with("at update (game.js:10:4)"));
}

#[test]
fn disabling_restores_default_handling() {
    let host = HeadlessHost::default();
    let mut engine = Engine::builder(host.clone())
        .alert_global_error(true)
        .build();
    assert!(host.has_fault_handler());

    engine.set_alert_global_error(false);
    assert!(!engine.alert_global_error());
    assert!(!host.has_fault_handler());
    assert_eq!(host.raise_fault(fault(0)), FaultDisposition::Unhandled);
    assert!(host.alerts().is_empty());
}

#[test]
fn reenabling_while_enabled_starts_a_fresh_budget() {
    let host = HeadlessHost::default();
    let mut engine = Engine::builder(host.clone()).build();

    engine.set_alert_global_error(true);
    for n in 0..5 {
        host.raise_fault(fault(n));
    }
    engine.set_alert_global_error(true);
    host.raise_fault(fault(5));

    assert_eq!(host.alerts().len(), 6);
}

#[test]
fn dropping_the_engine_removes_the_handler() {
    let host = HeadlessHost::default();
    let engine = Engine::builder(host.clone())
        .alert_global_error(true)
        .build();
    drop(engine);

    assert!(!host.has_fault_handler());
}

#[test]
fn panicking_owner_of_an_alerting_process_engine_unwinds() {
    let host = Arc::new(ProcessHost::with_location(Location::file("/tmp/sylva/")));
    let shared: Arc<dyn HostEnvironment> = host.clone();

    let joined = std::thread::spawn(move || {
        let mut engine = EngineBuilder::with_shared_host(shared)
            .alert_global_error(true)
            .build();
        engine.init(64, 64, &mut []).unwrap();
        panic!("game loop crashed");
    })
    .join();

    let payload = joined.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"game loop crashed"));

    // The hook outlives the unwinding engine; detach from a healthy thread.
    assert!(host.has_fault_handler());
    host.set_fault_handler(None);
    assert!(!host.has_fault_handler());
}
