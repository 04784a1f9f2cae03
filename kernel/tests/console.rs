//! Снимок очередей через консоль / Queue snapshot through the console

mod common;

use std::fmt;
use std::sync::{Arc, Mutex};

use common::Bench;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<String>>);

impl fmt::Write for Capture {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.lock().unwrap().push_str(s);
        Ok(())
    }
}

#[test]
fn dump_lists_each_tier_in_selection_order() {
    let mut b = Bench::new();
    let low_a = b.spawn(10);
    let high = b.spawn(120);
    let low_b = b.spawn(30);
    b.ready(low_a);
    b.ready(high);
    b.ready(low_b);

    let capture = Capture::default();
    kernel::console::set_sink(Box::new(capture.clone()));
    b.sched.dump();
    kernel::console::take_sink();

    let text = capture.0.lock().unwrap().clone();
    assert_eq!(text, format!("L[1]: {}\nL[2]:\nL[3]: {} {}\n", high, low_a, low_b));
}
